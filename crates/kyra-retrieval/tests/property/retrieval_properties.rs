use kyra_core::config::KyraConfig;
use kyra_core::models::{CombinedEvidence, ConversationTurn, RetrievedNode};
use kyra_retrieval::{EvidenceGate, ScoreWeights, WeightedRetriever};
use proptest::prelude::*;
use test_fixtures::{hit, ScriptedSearch};

fn evidence_with(blended: f64, allowed: bool) -> CombinedEvidence {
    let url = "https://www.nhs.uk/conditions/asthma/";
    CombinedEvidence {
        primary_score: blended,
        contextual_score: 0.0,
        blended_score: blended,
        candidate_nodes: vec![RetrievedNode {
            text: "asthma".to_string(),
            score: 1.0,
            source_url: url.to_string(),
            collection_id: "nhs_docs".to_string(),
        }],
        source_urls: if allowed { vec![url.to_string()] } else { vec![] },
    }
}

// ── Weights always sum to one ───────────────────────────────────────────

proptest! {
    #[test]
    fn weights_sum_to_one(primary in -1.0f64..2.0) {
        let w = ScoreWeights::from_primary(primary);
        prop_assert!((w.primary() + w.context() - 1.0).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&w.primary()));
        prop_assert!((0.0..=1.0).contains(&w.context()));
    }
}

// ── Blended score stays in [0, 1] and follows the formula ───────────────

proptest! {
    #[test]
    fn blended_in_unit_interval(
        primary_weight in 0.0f64..=1.0,
        primary in 0.0f64..=1.0,
        contextual in 0.0f64..=1.0,
    ) {
        let w = ScoreWeights::from_primary(primary_weight);
        let blended = w.blend(primary, contextual);
        prop_assert!((0.0..=1.0).contains(&blended));
        let expected = w.primary() * primary + w.context() * contextual;
        prop_assert!((blended - expected).abs() < 1e-12);
    }
}

// ── Retrieval invariants hold for arbitrary scores ──────────────────────

proptest! {
    #[test]
    fn retrieval_invariants(
        nhs in prop::collection::vec(0.01f64..=1.0, 0..4),
        cruk in prop::collection::vec(0.01f64..=1.0, 0..4),
        with_history in any::<bool>(),
    ) {
        let search = ScriptedSearch::new()
            .hits("nhs_docs", nhs.iter().map(|s| hit("n", *s, "https://www.nhs.uk/p")).collect())
            .hits("cancer_research_docs", cruk.iter().map(|s| hit("c", *s, "https://blog.example.com/p")).collect());
        let config = KyraConfig::default();
        let history = if with_history { vec![ConversationTurn::user("earlier")] } else { vec![] };
        let evidence = WeightedRetriever::new(&search, &config).retrieve("q", &history);

        prop_assert!((0.0..=1.0).contains(&evidence.blended_score));
        prop_assert!(evidence.candidate_nodes.len() <= config.retrieval.candidate_limit);
        prop_assert!(evidence.candidate_nodes.windows(2).all(|w| w[0].score >= w[1].score));
        if !with_history {
            prop_assert_eq!(evidence.contextual_score, 0.0);
            prop_assert_eq!(search.calls_containing("Context:"), 0);
        }
        let expected = 0.8 * evidence.primary_score + 0.2 * evidence.contextual_score;
        prop_assert!((evidence.blended_score - expected).abs() < 1e-9);
        for url in &evidence.source_urls {
            prop_assert!(url.contains("nhs.uk"));
        }
    }
}

// ── The gate never admits unvetted sources, and is monotone in score ────

proptest! {
    #[test]
    fn gate_requires_allowed_source(blended in 0.0f64..=1.0) {
        let gate = EvidenceGate::default();
        prop_assert!(!gate.decide(&evidence_with(blended, false)).uses_evidence());
        prop_assert_eq!(
            gate.decide(&evidence_with(blended, true)).uses_evidence(),
            blended >= gate.threshold()
        );
    }
}
