//! Argument module - legal arguments and their classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification label for a legal argument.
///
/// The standard variants form a closed taxonomy that the prompt enumerates
/// verbatim. Labels outside the taxonomy are preserved as [`Custom`] rather
/// than rejected, so the model can surface argument types the taxonomy does
/// not anticipate.
///
/// [`Custom`]: ArgumentCategory::Custom
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArgumentCategory {
    /// Duty-of-care arguments
    NegligenceDuty,
    /// Breach-of-duty arguments
    NegligenceBreach,
    /// Causation arguments (negligence element)
    NegligenceCausation,
    /// Damages arguments (negligence element)
    NegligenceDamages,
    /// Comparative fault, joint liability, immunity claims
    LiabilityIssues,
    /// Disputes over causal connection
    CausationDisputes,
    /// Challenges to claimed damages
    DamagesArguments,
    /// Jurisdiction, venue, limitations, service issues
    ProceduralDefenses,
    /// Daubert/Frye and qualification attacks
    ExpertWitnessChallenges,
    /// Rule 702, 403 and other evidentiary challenges
    EvidenceAdmissibility,
    /// Free-form label outside the standard taxonomy
    Custom(String),
}

impl ArgumentCategory {
    /// The closed standard taxonomy, in prompt order
    pub const STANDARD: [ArgumentCategory; 10] = [
        ArgumentCategory::NegligenceDuty,
        ArgumentCategory::NegligenceBreach,
        ArgumentCategory::NegligenceCausation,
        ArgumentCategory::NegligenceDamages,
        ArgumentCategory::LiabilityIssues,
        ArgumentCategory::CausationDisputes,
        ArgumentCategory::DamagesArguments,
        ArgumentCategory::ProceduralDefenses,
        ArgumentCategory::ExpertWitnessChallenges,
        ArgumentCategory::EvidenceAdmissibility,
    ];

    /// Parse a label into a category. Never fails: unknown labels become
    /// [`ArgumentCategory::Custom`].
    pub fn parse(label: &str) -> Self {
        match label {
            "negligence_duty" => ArgumentCategory::NegligenceDuty,
            "negligence_breach" => ArgumentCategory::NegligenceBreach,
            "negligence_causation" => ArgumentCategory::NegligenceCausation,
            "negligence_damages" => ArgumentCategory::NegligenceDamages,
            "liability_issues" => ArgumentCategory::LiabilityIssues,
            "causation_disputes" => ArgumentCategory::CausationDisputes,
            "damages_arguments" => ArgumentCategory::DamagesArguments,
            "procedural_defenses" => ArgumentCategory::ProceduralDefenses,
            "expert_witness_challenges" => ArgumentCategory::ExpertWitnessChallenges,
            "evidence_admissibility" => ArgumentCategory::EvidenceAdmissibility,
            other => ArgumentCategory::Custom(other.to_string()),
        }
    }

    /// The wire label for this category
    pub fn as_label(&self) -> &str {
        match self {
            ArgumentCategory::NegligenceDuty => "negligence_duty",
            ArgumentCategory::NegligenceBreach => "negligence_breach",
            ArgumentCategory::NegligenceCausation => "negligence_causation",
            ArgumentCategory::NegligenceDamages => "negligence_damages",
            ArgumentCategory::LiabilityIssues => "liability_issues",
            ArgumentCategory::CausationDisputes => "causation_disputes",
            ArgumentCategory::DamagesArguments => "damages_arguments",
            ArgumentCategory::ProceduralDefenses => "procedural_defenses",
            ArgumentCategory::ExpertWitnessChallenges => "expert_witness_challenges",
            ArgumentCategory::EvidenceAdmissibility => "evidence_admissibility",
            ArgumentCategory::Custom(label) => label,
        }
    }

    /// Whether this category is part of the standard taxonomy
    pub fn is_standard(&self) -> bool {
        !matches!(self, ArgumentCategory::Custom(_))
    }

    /// A human-readable phrase for placeholder text
    pub fn describe(&self) -> String {
        self.as_label().replace('_', " ")
    }
}

impl From<String> for ArgumentCategory {
    fn from(label: String) -> Self {
        ArgumentCategory::parse(&label)
    }
}

impl From<ArgumentCategory> for String {
    fn from(category: ArgumentCategory) -> Self {
        category.as_label().to_string()
    }
}

impl fmt::Display for ArgumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// Five-point strength scale used for arguments, citations, and the motion
/// as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    /// Very weak
    VeryWeak,
    /// Weak
    Weak,
    /// Moderate (the neutral default for synthesized placeholders)
    Moderate,
    /// Strong
    Strong,
    /// Very strong
    VeryStrong,
}

impl StrengthLevel {
    /// All levels in ascending order, as enumerated in the prompt
    pub const ALL: [StrengthLevel; 5] = [
        StrengthLevel::VeryWeak,
        StrengthLevel::Weak,
        StrengthLevel::Moderate,
        StrengthLevel::Strong,
        StrengthLevel::VeryStrong,
    ];

    /// Parse a wire label. Returns `None` for labels outside the scale;
    /// strength levels are a closed enumeration, unlike categories.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "very_weak" => Some(StrengthLevel::VeryWeak),
            "weak" => Some(StrengthLevel::Weak),
            "moderate" => Some(StrengthLevel::Moderate),
            "strong" => Some(StrengthLevel::Strong),
            "very_strong" => Some(StrengthLevel::VeryStrong),
            _ => None,
        }
    }

    /// The wire label for this level
    pub fn as_label(&self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "very_weak",
            StrengthLevel::Weak => "weak",
            StrengthLevel::Moderate => "moderate",
            StrengthLevel::Strong => "strong",
            StrengthLevel::VeryStrong => "very_strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// A case citation attributed to an argument by the model.
///
/// Distinct from [`crate::citation::CaseCitation`], which is the
/// deterministic extraction record: this type carries the model's legal
/// analysis of the citation, and only survives post-processing when the case
/// name is independently verifiable against the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitedCase {
    /// Complete citation string
    pub full_citation: String,
    /// Primary case name (e.g. "Smith v. Jones")
    pub case_name: String,
    /// Legal principle or holding
    pub legal_principle: String,
    /// How the citation applies to the current case
    pub application: String,
    /// Court jurisdiction
    pub jurisdiction: String,
    /// Year of decision
    pub year: i32,
    /// Whether the authority is binding in this jurisdiction
    pub is_binding: bool,
    /// Strength of the citation's support for the argument
    pub citation_strength: StrengthLevel,
}

/// A legal argument identified in the motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// Stable identifier within one analysis (`arg_001`, `arg_002`, ...)
    pub argument_id: String,
    /// Classification label
    pub category: ArgumentCategory,
    /// Brief summary of the argument
    pub argument_summary: String,
    /// Legal foundation for the argument
    pub legal_basis: String,
    /// Factors indicating argument strength
    pub strength_indicators: Vec<String>,
    /// Supporting case law; every entry is traceable to the source text
    pub cited_cases: Vec<CitedCase>,
    /// Supporting statutory references (full citation strings)
    pub statute_citations: Vec<String>,
    /// Potential counterarguments
    pub counterarguments: Vec<String>,
    /// Weaknesses in the argument
    pub weaknesses: Vec<String>,
    /// Overall argument strength
    pub strength_assessment: StrengthLevel,
    /// Confidence score in [0.0, 1.0]
    pub confidence_score: f64,
    /// Response priority rank in [1, 5]; 1 is most urgent
    pub response_priority: u8,
}

impl Argument {
    /// Synthesize a neutral placeholder for a required category that the
    /// model produced no argument for
    pub fn placeholder(argument_id: String, category: ArgumentCategory) -> Self {
        Self {
            argument_id,
            argument_summary: format!(
                "No specific {} arguments identified in motion",
                category.describe()
            ),
            category,
            legal_basis: "Standard personal injury law analysis".to_string(),
            strength_indicators: vec!["Analysis pending".to_string()],
            cited_cases: Vec::new(),
            statute_citations: Vec::new(),
            counterarguments: Vec::new(),
            weaknesses: Vec::new(),
            strength_assessment: StrengthLevel::Moderate,
            confidence_score: 0.5,
            response_priority: 3,
        }
    }

    /// Whether the argument's summary mentions the given phrase,
    /// case-insensitively
    pub fn summary_mentions(&self, phrase: &str) -> bool {
        self.argument_summary
            .to_lowercase()
            .contains(&phrase.to_lowercase())
    }
}
