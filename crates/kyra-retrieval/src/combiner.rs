//! Blends the best direct-question score with the best context-augmented score.

use kyra_core::config::RetrievalConfig;
use kyra_core::errors::ConfigError;

const SUM_TOLERANCE: f64 = 1e-9;

/// Primary and contextual weights. Always sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    primary: f64,
    context: f64,
}

impl ScoreWeights {
    /// Both weights must lie in [0, 1] and sum to 1.
    pub fn new(primary: f64, context: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&primary) || !(0.0..=1.0).contains(&context) {
            return Err(ConfigError::ValidationFailed {
                field: "weights".to_string(),
                message: format!("weights must be in [0, 1], got {primary} and {context}"),
            });
        }
        if (primary + context - 1.0).abs() > SUM_TOLERANCE {
            return Err(ConfigError::ValidationFailed {
                field: "weights".to_string(),
                message: format!("weights must sum to 1, got {}", primary + context),
            });
        }
        Ok(Self { primary, context })
    }

    /// Weights from the primary share alone; the context share is the remainder.
    pub fn from_primary(primary: f64) -> Self {
        let primary = if primary.is_nan() { 1.0 } else { primary.clamp(0.0, 1.0) };
        Self {
            primary,
            context: 1.0 - primary,
        }
    }

    pub fn primary(&self) -> f64 {
        self.primary
    }

    pub fn context(&self) -> f64 {
        self.context
    }

    /// `primary * primary_score + context * contextual_score`, held to [0, 1].
    pub fn blend(&self, primary_score: f64, contextual_score: f64) -> f64 {
        (self.primary * primary_score + self.context * contextual_score).clamp(0.0, 1.0)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::from_primary(RetrievalConfig::default().primary_weight)
    }
}

impl TryFrom<&RetrievalConfig> for ScoreWeights {
    type Error = ConfigError;

    fn try_from(config: &RetrievalConfig) -> Result<Self, Self::Error> {
        Self::new(config.primary_weight, config.context_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_weights_are_eighty_twenty() {
        let w = ScoreWeights::default();
        assert!(close(w.primary(), 0.8));
        assert!(close(w.context(), 0.2));
    }

    #[test]
    fn blend_without_context() {
        assert!(close(ScoreWeights::default().blend(0.9, 0.0), 0.72));
    }

    #[test]
    fn blend_with_context() {
        assert!(close(ScoreWeights::default().blend(0.5, 1.0), 0.6));
    }

    #[test]
    fn new_rejects_bad_sums_and_ranges() {
        assert!(ScoreWeights::new(0.7, 0.2).is_err());
        assert!(ScoreWeights::new(1.2, -0.2).is_err());
        assert!(ScoreWeights::new(0.6, 0.4).is_ok());
    }

    #[test]
    fn from_primary_clamps() {
        assert_eq!(ScoreWeights::from_primary(1.7).context(), 0.0);
        assert_eq!(ScoreWeights::from_primary(-0.3).primary(), 0.0);
        assert_eq!(ScoreWeights::from_primary(f64::NAN).primary(), 1.0);
    }
}
