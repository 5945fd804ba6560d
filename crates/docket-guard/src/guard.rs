//! The corrective post-processing passes

use crate::config::GuardConfig;
use crate::source::SourceIndex;
use docket_domain::{Argument, ArgumentCategory, MotionAnalysis, ResearchPriority};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Defense themes scanned for in the source text. A pattern found in the
/// source but echoed by no argument summary becomes an omission note.
/// Keywords are multi-word phrases so that e.g. "notwithstanding" never
/// triggers the standing pattern.
const OMISSION_PATTERNS: &[(&str, &[&str])] = &[
    (
        "statute of limitations",
        &["statute of limitations", "time-barred", "untimely"],
    ),
    (
        "standing",
        &["lack of standing", "no standing", "standing to sue"],
    ),
    (
        "venue",
        &["improper venue", "venue is improper", "transfer venue"],
    ),
    (
        "jurisdiction",
        &[
            "lack of jurisdiction",
            "subject matter jurisdiction",
            "personal jurisdiction",
        ],
    ),
    (
        "preclusion",
        &[
            "res judicata",
            "collateral estoppel",
            "claim preclusion",
            "issue preclusion",
        ],
    ),
    (
        "arbitration",
        &["arbitration agreement", "compel arbitration", "arbitration clause"],
    ),
    (
        "immunity",
        &["sovereign immunity", "qualified immunity", "governmental immunity"],
    ),
    (
        "comparative fault",
        &["comparative fault", "comparative negligence", "contributory negligence"],
    ),
    (
        "assumption of risk",
        &["assumption of risk", "assumed the risk"],
    ),
    (
        "failure to mitigate",
        &["failure to mitigate", "mitigate damages"],
    ),
];

/// A silent correction recorded during post-processing.
///
/// These are not errors: the pipeline's contract is "never expose an
/// unverifiable citation", not "never accept imperfect model output".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardWarning {
    /// A cited case could not be verified against the source document
    UnverifiableCase {
        /// Argument the citation was attached to
        argument_id: String,
        /// The unverifiable case name
        case_name: String,
    },
    /// A statute reference could not be verified against the source document
    UnverifiableStatute {
        /// Argument the reference was attached to
        argument_id: String,
        /// The unverifiable citation string
        citation: String,
    },
}

/// Summary of the corrections one guard run applied
#[derive(Debug, Clone, Default)]
pub struct GuardReport {
    /// Citations dropped during reconciliation
    pub warnings: Vec<GuardWarning>,
    /// Required categories synthesized as placeholders
    pub backfilled_categories: Vec<ArgumentCategory>,
    /// Omission notes appended by keyword detection
    pub omission_notes_added: usize,
}

/// The post-processor. Stateless apart from configuration; one instance
/// serves arbitrarily many concurrent analyses.
pub struct Guard {
    config: GuardConfig,
}

impl Guard {
    /// Create a Guard with the given configuration
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Create a Guard with default configuration
    pub fn default_config() -> Self {
        Self::new(GuardConfig::default())
    }

    /// Run every pass over a validated analysis. Never fails; corrections
    /// are recorded in the returned report.
    pub fn apply(
        &self,
        mut analysis: MotionAnalysis,
        source: &SourceIndex,
    ) -> (MotionAnalysis, GuardReport) {
        let mut report = GuardReport::default();

        self.reconcile_citations(&mut analysis, source, &mut report);
        self.backfill_categories(&mut analysis, &mut report);
        self.detect_omissions(&mut analysis, source, &mut report);
        self.cross_link(&mut analysis);
        rebuild_metadata(&mut analysis);

        info!(
            dropped_citations = report.warnings.len(),
            backfilled = report.backfilled_categories.len(),
            omission_notes = report.omission_notes_added,
            "post-processing complete"
        );

        (analysis, report)
    }

    /// Pass 1: drop every citation that cannot be verified against the
    /// source text or the extraction set.
    fn reconcile_citations(
        &self,
        analysis: &mut MotionAnalysis,
        source: &SourceIndex,
        report: &mut GuardReport,
    ) {
        for argument in &mut analysis.primary_arguments {
            argument.cited_cases.retain(|cited| {
                if source.supports_case(&cited.case_name) {
                    return true;
                }
                warn!(
                    argument_id = %argument.argument_id,
                    case_name = %cited.case_name,
                    "removed potentially fabricated case citation"
                );
                report.warnings.push(GuardWarning::UnverifiableCase {
                    argument_id: argument.argument_id.clone(),
                    case_name: cited.case_name.clone(),
                });
                false
            });

            argument.statute_citations.retain(|citation| {
                if source.supports_statute(citation) {
                    return true;
                }
                warn!(
                    argument_id = %argument.argument_id,
                    citation = %citation,
                    "removed potentially fabricated statute reference"
                );
                report.warnings.push(GuardWarning::UnverifiableStatute {
                    argument_id: argument.argument_id.clone(),
                    citation: citation.clone(),
                });
                false
            });
        }
    }

    /// Pass 2: guarantee the required categories are present, synthesizing
    /// neutral placeholders where the model produced nothing.
    fn backfill_categories(&self, analysis: &mut MotionAnalysis, report: &mut GuardReport) {
        let present = analysis.categories_present();
        for category in &self.config.required_categories {
            if present.contains(category) {
                continue;
            }
            let placeholder =
                Argument::placeholder(next_argument_id(analysis), category.clone());
            analysis.primary_arguments.push(placeholder);
            report.backfilled_categories.push(category.clone());
        }
    }

    /// Pass 3: scan the source for common defense themes the analysis does
    /// not echo. A recall safety net: false positives are acceptable.
    fn detect_omissions(
        &self,
        analysis: &mut MotionAnalysis,
        source: &SourceIndex,
        report: &mut GuardReport,
    ) {
        for (label, keywords) in OMISSION_PATTERNS {
            if analysis.notable_omissions.len() >= self.config.max_omission_notes {
                break;
            }

            let in_source = keywords.iter().any(|k| source.mentions(k));
            if !in_source {
                continue;
            }

            let echoed = analysis.primary_arguments.iter().any(|argument| {
                argument.summary_mentions(label)
                    || keywords.iter().any(|k| argument.summary_mentions(k))
            });
            if echoed {
                continue;
            }

            analysis.notable_omissions.push(format!(
                "Motion raises {} but no corresponding argument was identified",
                label
            ));
            report.omission_notes_added += 1;
        }

        analysis
            .notable_omissions
            .truncate(self.config.max_omission_notes);
    }

    /// Pass 4: best-effort linking of research priorities to arguments
    /// whose summaries mention the research area.
    fn cross_link(&self, analysis: &mut MotionAnalysis) {
        let arguments = &analysis.primary_arguments;
        for priority in &mut analysis.research_priorities {
            if !priority.related_argument_ids.is_empty() {
                continue;
            }
            priority.related_argument_ids = arguments
                .iter()
                .filter(|a| a.summary_mentions(&priority.research_area))
                .take(self.config.max_linked_arguments)
                .map(|a| a.argument_id.clone())
                .collect();
        }

        if analysis.research_priorities.is_empty() && self.config.ensure_research_priorities {
            analysis.research_priorities.push(ResearchPriority {
                research_area: "General motion response".to_string(),
                priority_level: 1,
                suggested_sources: vec![
                    "Case law databases".to_string(),
                    "Legal precedents".to_string(),
                ],
                key_questions: vec!["What are the strongest counterarguments?".to_string()],
                related_argument_ids: Vec::new(),
            });
        }
    }
}

/// Pass 5: recompute every derived field from the final argument list.
fn rebuild_metadata(analysis: &mut MotionAnalysis) {
    analysis.total_arguments_found = analysis.primary_arguments.len();

    let mut grouping: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut used: Vec<String> = Vec::new();
    for argument in &analysis.primary_arguments {
        let label = argument.category.as_label().to_string();
        grouping
            .entry(label.clone())
            .or_default()
            .push(argument.argument_id.clone());
        if !used.contains(&label) {
            used.push(label);
        }
    }

    analysis.arguments_by_category = grouping;
    analysis.custom_categories = used
        .iter()
        .filter(|label| !ArgumentCategory::parse(label).is_standard())
        .cloned()
        .collect();
    analysis.categories_used = used;
}

/// Next free placeholder id, continuing the `arg_NNN` sequence
fn next_argument_id(analysis: &MotionAnalysis) -> String {
    let mut n = analysis.primary_arguments.len() + 1;
    loop {
        let id = format!("arg_{:03}", n);
        if analysis.argument(&id).is_none() {
            return id;
        }
        n += 1;
    }
}
