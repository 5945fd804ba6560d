//! Docket Guard
//!
//! Deterministic post-processing of a validated motion analysis. This is
//! the pipeline's anti-hallucination layer: no citation survives unless it
//! is independently verifiable against the source document. The model's
//! assertion alone is never sufficient.
//!
//! The guard provides:
//! - Citation reconciliation against the source text and the deterministic
//!   extraction set
//! - Required-category backfill with neutral placeholders
//! - Keyword-driven omission detection (recall safety net)
//! - Research-priority cross-linking
//! - Metadata recomputation
//!
//! Every pass is a corrective value transformation; none of them fail.
//!
//! # Examples
//!
//! ```no_run
//! use docket_guard::{Guard, GuardConfig, SourceIndex};
//!
//! let guard = Guard::new(GuardConfig::default());
//! # let analysis: docket_domain::MotionAnalysis = unimplemented!();
//! # let citations = vec![];
//! let source = SourceIndex::build("...motion text...", &citations);
//! let (clean, report) = guard.apply(analysis, &source);
//! assert!(clean.count_is_consistent());
//! # let _ = report;
//! ```

#![warn(missing_docs)]

mod config;
mod guard;
mod source;

pub use config::GuardConfig;
pub use guard::{Guard, GuardReport, GuardWarning};
pub use source::SourceIndex;
