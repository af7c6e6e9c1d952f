use kyra_core::config::KyraConfig;
use kyra_core::models::{last_turns, ConversationTurn};
use proptest::prelude::*;

fn with_weights(primary: f64, context: f64) -> KyraConfig {
    let mut config = KyraConfig::default();
    config.retrieval.primary_weight = primary;
    config.retrieval.context_weight = context;
    config
}

// ── Complementary weights validate and survive a TOML round trip ────────

proptest! {
    #[test]
    fn complementary_weights_round_trip(
        primary in 0.0f64..=1.0,
        threshold in 0.0f64..=1.0,
    ) {
        let mut config = with_weights(primary, 1.0 - primary);
        config.gate.threshold = threshold;
        prop_assert!(config.validate().is_ok());

        let parsed = KyraConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        prop_assert_eq!(parsed, config);
    }
}

// ── Weights that do not sum to one are rejected ─────────────────────────

proptest! {
    #[test]
    fn non_complementary_weights_rejected(
        primary in 0.0f64..=1.0,
        skew in prop_oneof![-0.5f64..-0.001, 0.001f64..0.5],
    ) {
        let context = (1.0 - primary + skew).clamp(0.0, 1.0);
        prop_assume!((primary + context - 1.0).abs() > 1e-6);
        prop_assert!(with_weights(primary, context).validate().is_err());
    }
}

// ── Thresholds outside [0, 1] are rejected ──────────────────────────────

proptest! {
    #[test]
    fn out_of_range_threshold_rejected(
        threshold in prop_oneof![-10.0f64..-1e-6, (1.0f64 + 1e-6)..10.0],
    ) {
        let mut config = KyraConfig::default();
        config.gate.threshold = threshold;
        prop_assert!(config.validate().is_err());
    }
}

// ── Environment overrides are applied verbatim ──────────────────────────

proptest! {
    #[test]
    fn threshold_override_applied(threshold in 0.0f64..=1.0) {
        let mut config = KyraConfig::default();
        let value = threshold.to_string();
        config.apply_overrides(|key| (key == "KYRA_SIMILARITY_THRESHOLD").then(|| value.clone()));
        prop_assert_eq!(config.gate.threshold, threshold);
        prop_assert!(config.validate().is_ok());
    }
}

// ── History windows keep the newest turns in order ──────────────────────

proptest! {
    #[test]
    fn last_turns_is_the_tail(len in 0usize..12, window in 0usize..16) {
        let history: Vec<_> = (0..len).map(|i| ConversationTurn::user(i.to_string())).collect();
        let tail = last_turns(&history, window);

        prop_assert_eq!(tail.len(), window.min(len));
        prop_assert_eq!(tail, &history[len - tail.len()..]);
    }
}
