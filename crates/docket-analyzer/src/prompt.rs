//! Prompt engineering for motion analysis
//!
//! The builder is pure with respect to its inputs: no I/O, and identical
//! inputs produce identical prompt strings. The system instruction
//! enumerates every recognized category and strength level verbatim so the
//! model cannot invent incompatible enumerants.

use docket_domain::{AnalysisOptions, ArgumentCategory, ExtractedCitation, StrengthLevel};

/// The two immutable prompt strings sent to the completion service
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    /// System instruction: role, taxonomy, no-fabrication rules, output shape
    pub system: String,
    /// User instruction: motion text, context, extracted citations
    pub user: String,
}

/// Builds the system and user instructions for one analysis
pub struct PromptBuilder<'a> {
    motion_text: &'a str,
    case_context: Option<&'a str>,
    citations: &'a [ExtractedCitation],
    options: AnalysisOptions,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder for the given motion text
    pub fn new(motion_text: &'a str) -> Self {
        Self {
            motion_text,
            case_context: None,
            citations: &[],
            options: AnalysisOptions::default(),
        }
    }

    /// Add optional case context
    pub fn with_case_context(mut self, case_context: Option<&'a str>) -> Self {
        self.case_context = case_context;
        self
    }

    /// Embed the deterministic extraction set
    pub fn with_citations(mut self, citations: &'a [ExtractedCitation]) -> Self {
        self.citations = citations;
        self
    }

    /// Honor per-request analysis switches
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// Build both prompt strings
    pub fn build(&self) -> PromptPair {
        PromptPair {
            system: self.system_instruction(),
            user: self.user_instruction(),
        }
    }

    fn system_instruction(&self) -> String {
        let categories = ArgumentCategory::STANDARD
            .iter()
            .map(|c| c.as_label())
            .collect::<Vec<_>>()
            .join("|");
        let strengths = StrengthLevel::ALL
            .iter()
            .map(|s| s.as_label())
            .collect::<Vec<_>>()
            .join("|");

        let mut areas = vec![
            "1. NEGLIGENCE ELEMENTS: Analyze duty, breach, causation, and damages arguments"
                .to_string(),
            "2. LIABILITY ISSUES: Identify comparative fault, joint liability, and immunity claims"
                .to_string(),
        ];
        if self.options.analyze_procedural_defenses {
            areas.push(
                "3. PROCEDURAL DEFENSES: Evaluate jurisdiction, venue, statute of limitations, and service issues"
                    .to_string(),
            );
        }
        if self.options.extract_expert_challenges {
            areas.push(
                "4. EXPERT WITNESS CHALLENGES: Assess Daubert/Frye challenges and qualification attacks"
                    .to_string(),
            );
            areas.push(
                "5. EVIDENCE ADMISSIBILITY: Review Rule 702, 403, and other evidentiary challenges"
                    .to_string(),
            );
        }
        if self.options.include_citations {
            areas.push(
                "6. LEGAL CITATIONS: Extract and categorize case law WITHOUT fabricating citations"
                    .to_string(),
            );
        }

        format!(
            "{role}\n\nKey Analysis Areas:\n{areas}\n\n{standards}\n\n\
             Recognized argument categories (use exactly these labels, or a short custom label \
             only when none fits):\n{categories}\n\n\
             Recognized strength levels (use exactly these labels):\n{strengths}\n\n\
             You must respond with a valid JSON object that follows this exact structure:\n{shape}",
            role = SYSTEM_ROLE,
            areas = areas.join("\n"),
            standards = ANALYSIS_STANDARDS,
            categories = categories,
            strengths = strengths,
            shape = OUTPUT_SHAPE,
        )
    }

    fn user_instruction(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(
            "Please analyze the following legal motion and provide a comprehensive structured response.\n\n",
        );
        prompt.push_str("MOTION TEXT:\n");
        prompt.push_str(self.motion_text);
        prompt.push_str("\n\n");

        if let Some(context) = self.case_context {
            prompt.push_str("CASE CONTEXT: ");
            prompt.push_str(context);
            prompt.push_str("\n\n");
        }

        if self.options.include_citations {
            prompt.push_str("EXTRACTED CITATIONS (use only these):\n");
            let serialized = serde_json::to_string_pretty(self.citations)
                .unwrap_or_else(|_| "[]".to_string());
            prompt.push_str(&serialized);
            prompt.push_str("\n\n");
        }

        prompt.push_str(
            "Analyze all arguments, identify the motion type, assess strength and risk, and \
             provide actionable recommendations.\n\
             Remember to ONLY use citations that appear in the motion text.",
        );

        prompt
    }
}

const SYSTEM_ROLE: &str = "You are an expert legal analyst specializing in personal injury law \
and motion practice. Your role is to analyze opposing counsel motions with precision and provide \
structured, actionable insights for legal response strategy.";

const ANALYSIS_STANDARDS: &str = "Analysis Standards:
- ACCURACY: Only extract citations that appear in the document
- PRECISION: Provide specific legal principles and applications
- STRATEGY: Focus on practical response recommendations
- COMPREHENSIVENESS: Address all major legal arguments presented
- RISK ASSESSMENT: Evaluate realistic success probability for opposing motion

Legal Citation Requirements:
- Extract ONLY citations that appear in the motion text
- Include full citation format, case name, legal principle, and application
- Assess binding vs. persuasive authority based on jurisdiction
- NEVER create or invent citations not present in the document";

const OUTPUT_SHAPE: &str = r#"{
    "motion_type": "string (e.g., Motion to Dismiss, Motion for Summary Judgment)",
    "case_number": "string or null",
    "parties": ["array of party names"],
    "filing_date": "string or null",
    "primary_arguments": [
        {
            "argument_id": "string (optional; assigned automatically when absent)",
            "category": "one of the recognized category labels",
            "argument_summary": "Brief summary of the argument",
            "legal_basis": "Legal foundation for the argument",
            "strength_indicators": ["List of factors indicating argument strength"],
            "cited_cases": [
                {
                    "full_citation": "Complete legal citation",
                    "case_name": "Case name",
                    "legal_principle": "Legal principle or holding",
                    "application": "How it applies to current case",
                    "jurisdiction": "Court jurisdiction",
                    "year": 2020,
                    "is_binding": true,
                    "citation_strength": "one of the recognized strength labels"
                }
            ],
            "statute_citations": ["Statutory citations supporting the argument"],
            "counterarguments": ["Potential counterarguments"],
            "weaknesses": ["Weaknesses in the argument"],
            "strength_assessment": "one of the recognized strength labels",
            "confidence_score": 0.8,
            "response_priority": 2
        }
    ],
    "procedural_issues": ["List of procedural issues identified"],
    "evidence_challenges": ["Evidence admissibility challenges"],
    "expert_witness_issues": ["Expert witness challenges"],
    "research_priorities": [
        {
            "research_area": "Area requiring research",
            "priority_level": 1,
            "suggested_sources": ["Recommended research sources"],
            "key_questions": ["Key questions to investigate"]
        }
    ],
    "overall_strength": "one of the recognized strength labels",
    "risk_assessment": 7,
    "recommended_actions": ["List of recommended response actions"]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use docket_domain::{CaseCitation, StatuteCitation};

    fn sample_citations() -> Vec<ExtractedCitation> {
        vec![
            ExtractedCitation::Case(CaseCitation {
                full_citation: "Smith v. Jones, 123 F.3d 456 (9th Cir. 2020)".to_string(),
                case_name: "Smith v. Jones".to_string(),
                volume: 123,
                reporter: "F.3d".to_string(),
                page: 456,
                court: "9th Cir.".to_string(),
                year: Some(2020),
            }),
            ExtractedCitation::Statute(StatuteCitation {
                full_citation: "42 U.S.C. § 1983".to_string(),
                title: 42,
                code: "U.S.C.".to_string(),
                section: "1983".to_string(),
            }),
        ]
    }

    #[test]
    fn system_enumerates_every_category_and_strength() {
        let prompts = PromptBuilder::new("text").build();
        for category in ArgumentCategory::STANDARD {
            assert!(
                prompts.system.contains(category.as_label()),
                "system prompt missing category {}",
                category
            );
        }
        for level in StrengthLevel::ALL {
            assert!(prompts.system.contains(level.as_label()));
        }
    }

    #[test]
    fn system_forbids_fabrication() {
        let prompts = PromptBuilder::new("text").build();
        assert!(prompts.system.contains("NEVER create or invent citations"));
    }

    #[test]
    fn user_embeds_motion_text_and_citations() {
        let citations = sample_citations();
        let prompts = PromptBuilder::new("Defendant relies on Smith v. Jones.")
            .with_citations(&citations)
            .build();

        assert!(prompts.user.contains("Defendant relies on Smith v. Jones."));
        assert!(prompts.user.contains("EXTRACTED CITATIONS (use only these):"));
        assert!(prompts.user.contains("Smith v. Jones"));
        assert!(prompts.user.contains("42 U.S.C. § 1983"));
    }

    #[test]
    fn case_context_is_optional() {
        let without = PromptBuilder::new("text").build();
        assert!(!without.user.contains("CASE CONTEXT:"));

        let with = PromptBuilder::new("text")
            .with_case_context(Some("rear-end collision, disputed damages"))
            .build();
        assert!(with.user.contains("CASE CONTEXT: rear-end collision, disputed damages"));
    }

    #[test]
    fn options_trim_analysis_areas() {
        let options = AnalysisOptions {
            include_citations: false,
            verify_citations: false,
            extract_expert_challenges: false,
            analyze_procedural_defenses: false,
        };
        let citations = sample_citations();
        let prompts = PromptBuilder::new("text")
            .with_citations(&citations)
            .with_options(options)
            .build();

        assert!(!prompts.system.contains("EXPERT WITNESS CHALLENGES"));
        assert!(!prompts.system.contains("PROCEDURAL DEFENSES:"));
        assert!(!prompts.user.contains("EXTRACTED CITATIONS"));
    }

    #[test]
    fn builder_is_deterministic() {
        let citations = sample_citations();
        let first = PromptBuilder::new("text").with_citations(&citations).build();
        let second = PromptBuilder::new("text").with_citations(&citations).build();
        assert_eq!(first, second);
    }
}
