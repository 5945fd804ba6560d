//! Error types for the analysis pipeline

use docket_domain::ProviderError;
use thiserror::Error;

/// Errors that can end an analysis.
///
/// Citation-reconciliation rejections are deliberately not here: dropping
/// an unverifiable citation is a silent correction reported as a warning,
/// not a failure.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The completion service failed; never retried by the pipeline
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Raw completion text is not parseable JSON
    #[error("malformed completion: {0}")]
    MalformedCompletion(String),

    /// Normalized JSON failed a type, enumeration, or range check
    #[error("schema violation at {path}: {message}")]
    SchemaViolation {
        /// Path of the offending field (e.g. `primary_arguments[2].risk`)
        path: String,
        /// What was wrong with it
        message: String,
    },

    /// An invariant broke after repair passes; a defect signal, not a
    /// recoverable user-facing case
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),

    /// Motion text exceeds the configured maximum
    #[error("motion text too long: {0} chars (max: {1})")]
    MotionTooLong(usize, usize),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl AnalyzerError {
    /// Construct a schema violation for the given field path
    pub fn violation(path: impl Into<String>, message: impl Into<String>) -> Self {
        AnalyzerError::SchemaViolation {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_violation_names_the_path() {
        let err = AnalyzerError::violation("primary_arguments[0].risk", "out of range");
        assert_eq!(
            err.to_string(),
            "schema violation at primary_arguments[0].risk: out of range"
        );
    }

    #[test]
    fn provider_errors_convert() {
        let err: AnalyzerError = ProviderError::NotReady.into();
        assert!(matches!(err, AnalyzerError::Provider(_)));
    }
}
