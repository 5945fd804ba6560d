//! Docket Citations
//!
//! Deterministic, regex-driven citation extraction from raw motion text.
//! No model involvement: the records produced here are the ground truth that
//! the anti-hallucination guard reconciles model output against.
//!
//! # Guarantees
//!
//! - **Determinism**: identical input text yields an identical, order-stable
//!   sequence of records across repeated runs
//! - **Bounded output**: a configurable cap (default 20) bounds prompt size
//! - **Tolerant matching**: matches whose numeric fields fail to parse are
//!   silently dropped; duplicates across overlapping patterns are tolerated,
//!   since downstream validation checks membership, not count
//!
//! # Example
//!
//! ```
//! use docket_citations::{ExtractionConfig, PatternExtractor};
//! use docket_domain::traits::CitationExtractor;
//!
//! let extractor = PatternExtractor::new(ExtractionConfig::default());
//! let citations = extractor.extract(
//!     "As held in Smith v. Jones, 123 F.3d 456 (9th Cir. 2020), \
//!      claims under 42 U.S.C. § 1983 require state action.",
//! );
//! assert_eq!(citations.len(), 2);
//! ```

#![warn(missing_docs)]

mod config;
mod extractor;
mod patterns;

pub use config::ExtractionConfig;
pub use extractor::PatternExtractor;
pub use patterns::PatternKind;
