//! Integration tests for the full analysis pipeline

#[cfg(test)]
mod tests {
    use crate::{AnalysisRequest, AnalyzerConfig, AnalyzerError, MotionAnalyzer};
    use docket_domain::{AnalysisOptions, ArgumentCategory};
    use docket_guard::GuardWarning;
    use docket_llm::MockProvider;

    const MOTION: &str = "Defendant moves for summary judgment on plaintiff's negligence \
        claims. In Smith v. Jones, 123 F.3d 456 (9th Cir. 2020), the court held that \
        proximate cause requires foreseeability. Plaintiff's claim is also barred by the \
        statute of limitations. The claim under 42 U.S.C. § 1983 fails for the same reason.";

    const RESPONSE: &str = r#"{
        "motion_type": "Motion for Summary Judgment",
        "parties": ["Plaintiff", "Defendant"],
        "primary_arguments": [
            {
                "category": "negligence_causation",
                "argument_summary": "No proximate cause between conduct and injury",
                "legal_basis": "Foreseeability requirement",
                "cited_cases": [
                    {
                        "full_citation": "Smith v. Jones, 123 F.3d 456 (9th Cir. 2020)",
                        "case_name": "Smith v. Jones",
                        "legal_principle": "Foreseeability limits proximate cause",
                        "application": "Breaks the causal chain",
                        "jurisdiction": "9th Cir.",
                        "year": 2020,
                        "is_binding": true,
                        "citation_strength": "strong"
                    },
                    {
                        "full_citation": "Doe v. Roe, 1 U.S. 1 (1999)",
                        "case_name": "Doe v. Roe",
                        "legal_principle": "Fabricated",
                        "application": "None",
                        "jurisdiction": "U.S.",
                        "year": 1999,
                        "is_binding": false,
                        "citation_strength": "weak"
                    }
                ],
                "statute_citations": ["42 U.S.C. § 1983", "18 U.S.C. § 1961"],
                "strength_assessment": "strong",
                "confidence_score": 0.9,
                "response_priority": 1
            },
            {
                "category": "liability_issues",
                "argument_summary": "Comparative fault bars recovery"
            }
        ],
        "research_priorities": [
            {
                "research_area": "proximate cause",
                "priority_level": 2,
                "suggested_sources": ["Case law databases"],
                "key_questions": ["Was the harm foreseeable?"]
            }
        ],
        "overall_strength": "strong",
        "risk_assessment": 7,
        "recommended_actions": ["File opposition brief"],
        "total_arguments_found": 10
    }"#;

    fn analyzer_with(response: &str) -> MotionAnalyzer<MockProvider> {
        MotionAnalyzer::new(MockProvider::new(response), AnalyzerConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn full_pipeline_flow() {
        let analyzer = analyzer_with(RESPONSE);
        let outcome = analyzer.analyze(AnalysisRequest::new(MOTION)).await.unwrap();
        let analysis = &outcome.analysis;

        // Ids assigned in input order; placeholder continues the sequence.
        assert_eq!(analysis.primary_arguments[0].argument_id, "arg_001");
        assert_eq!(analysis.primary_arguments[1].argument_id, "arg_002");

        // The verifiable citation survives; the fabricated one is dropped
        // with a warning.
        let causation = &analysis.primary_arguments[0];
        assert_eq!(causation.cited_cases.len(), 1);
        assert_eq!(causation.cited_cases[0].case_name, "Smith v. Jones");
        assert!(outcome.warnings.contains(&GuardWarning::UnverifiableCase {
            argument_id: "arg_001".to_string(),
            case_name: "Doe v. Roe".to_string(),
        }));

        // Statute reconciliation: the one in the text survives, the other
        // is dropped.
        assert_eq!(causation.statute_citations, vec!["42 U.S.C. § 1983".to_string()]);

        // Required category coverage, synthesized where missing.
        let present = analysis.categories_present();
        assert!(present.contains(&ArgumentCategory::NegligenceCausation));
        assert!(present.contains(&ArgumentCategory::LiabilityIssues));
        assert!(present.contains(&ArgumentCategory::ProceduralDefenses));

        // The model's bogus count is never trusted.
        assert!(analysis.count_is_consistent());
        assert_eq!(analysis.total_arguments_found, 3);

        // Limitations language in the source with no echoing argument
        // becomes an omission note.
        assert!(analysis
            .notable_omissions
            .iter()
            .any(|note| note.contains("statute of limitations")));
        assert!(analysis.notable_omissions.len() <= 5);

        // Research priority cross-linked to the argument mentioning it.
        assert_eq!(
            analysis.research_priorities[0].related_argument_ids,
            vec!["arg_001".to_string()]
        );
    }

    #[tokio::test]
    async fn normalization_defaults_flow_through() {
        let analyzer = analyzer_with(RESPONSE);
        let outcome = analyzer.analyze(AnalysisRequest::new(MOTION)).await.unwrap();

        // The second argument arrived with only category and summary.
        let liability = &outcome.analysis.primary_arguments[1];
        assert_eq!(liability.confidence_score, 0.5);
        assert_eq!(liability.response_priority, 3);
        assert!(liability.cited_cases.is_empty());
    }

    #[tokio::test]
    async fn markdown_fenced_response_is_accepted() {
        let fenced = format!("```json\n{}\n```", RESPONSE);
        let analyzer = analyzer_with(&fenced);
        let outcome = analyzer.analyze(AnalysisRequest::new(MOTION)).await.unwrap();
        assert!(outcome.analysis.count_is_consistent());
    }

    #[tokio::test]
    async fn unparseable_completion_is_malformed() {
        let analyzer = analyzer_with("The motion seems weak to me.");
        let err = analyzer.analyze(AnalysisRequest::new(MOTION)).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::MalformedCompletion(_)));
    }

    #[tokio::test]
    async fn invalid_enumerant_is_schema_violation() {
        let response = r#"{
            "primary_arguments": [
                { "category": "liability_issues", "strength_assessment": "colossal" }
            ]
        }"#;
        let analyzer = analyzer_with(response);
        let err = analyzer.analyze(AnalysisRequest::new(MOTION)).await.unwrap_err();

        match err {
            AnalyzerError::SchemaViolation { path, .. } => {
                assert_eq!(path, "primary_arguments[0].strength_assessment");
            }
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_object_response_still_produces_coverage() {
        let analyzer = analyzer_with("{}");
        let outcome = analyzer.analyze(AnalysisRequest::new(MOTION)).await.unwrap();
        let analysis = &outcome.analysis;

        // Backfill alone supplies the required categories.
        assert_eq!(analysis.total_arguments_found, 3);
        assert!(analysis.count_is_consistent());
        assert_eq!(analysis.research_priorities.len(), 1);
    }

    #[tokio::test]
    async fn oversized_motion_is_rejected_before_any_call() {
        let provider = MockProvider::new(RESPONSE);
        let probe = provider.clone();
        let analyzer = MotionAnalyzer::new(provider, AnalyzerConfig::default()).unwrap();

        let huge = "a".repeat(60_000);
        let err = analyzer.analyze(AnalysisRequest::new(huge)).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::MotionTooLong(60_000, 50_000)));
        assert_eq!(probe.call_count(), 0);
    }

    #[tokio::test]
    async fn disabling_citations_removes_them_from_the_prompt() {
        let provider = MockProvider::new(RESPONSE);
        let probe = provider.clone();
        let analyzer = MotionAnalyzer::new(provider, AnalyzerConfig::default()).unwrap();

        let options = AnalysisOptions {
            include_citations: false,
            ..AnalysisOptions::default()
        };
        analyzer
            .analyze(AnalysisRequest::new(MOTION).with_options(options))
            .await
            .unwrap();

        let request = probe.last_request().unwrap();
        assert!(!request.user.contains("EXTRACTED CITATIONS"));
        assert!(request.json_object);
        assert_eq!(request.max_output_tokens, 3_000);
    }

    #[tokio::test]
    async fn case_context_reaches_the_prompt() {
        let provider = MockProvider::new(RESPONSE);
        let probe = provider.clone();
        let analyzer = MotionAnalyzer::new(provider, AnalyzerConfig::default()).unwrap();

        analyzer
            .analyze(AnalysisRequest::new(MOTION).with_case_context("rear-end collision"))
            .await
            .unwrap();

        let request = probe.last_request().unwrap();
        assert!(request.user.contains("CASE CONTEXT: rear-end collision"));
    }

    #[tokio::test]
    async fn provider_failure_propagates_untouched() {
        let analyzer =
            MotionAnalyzer::new(MockProvider::failing(), AnalyzerConfig::default()).unwrap();

        let err = analyzer.analyze(AnalysisRequest::new(MOTION)).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Provider(_)));
        assert!(!analyzer.health_check().await);
    }

    #[tokio::test]
    async fn health_check_succeeds_with_responsive_provider() {
        let analyzer = analyzer_with(RESPONSE);
        assert!(analyzer.health_check().await);
    }
}
