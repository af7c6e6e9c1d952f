//! EvidenceGate: decides whether retrieved passages may be quoted.

use kyra_core::config::GateConfig;
use kyra_core::models::CombinedEvidence;
use kyra_core::tracing_setup::events;

/// Why evidence was withheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoEvidenceReason {
    /// No candidate came from an allow-listed domain.
    NoAllowedSource,
    /// Blended score under the threshold.
    BelowThreshold,
    /// Gate passed but no single passage cleared the per-node cut.
    NoPassageAboveNodeCut,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    UseEvidence { evidence_text: String },
    NoEvidence { reason: NoEvidenceReason },
}

impl GateDecision {
    pub fn uses_evidence(&self) -> bool {
        matches!(self, Self::UseEvidence { .. })
    }

    pub fn evidence_text(&self) -> Option<&str> {
        match self {
            Self::UseEvidence { evidence_text } => Some(evidence_text),
            Self::NoEvidence { .. } => None,
        }
    }
}

/// Domain allow-list plus threshold test.
///
/// The domain check is a hard gate: a high score from unvetted sources never
/// passes.
#[derive(Debug, Clone, Default)]
pub struct EvidenceGate {
    config: GateConfig,
}

impl EvidenceGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// Gate with the given threshold and the default per-node factor.
    pub fn with_threshold(threshold: f64) -> Self {
        Self::new(GateConfig {
            threshold,
            ..GateConfig::default()
        })
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    pub fn decide(&self, evidence: &CombinedEvidence) -> GateDecision {
        let decision = self.evaluate(evidence);
        events::evidence_gated(
            decision.uses_evidence(),
            evidence.blended_score,
            self.config.threshold,
            evidence.source_urls.len(),
        );
        decision
    }

    fn evaluate(&self, evidence: &CombinedEvidence) -> GateDecision {
        if evidence.source_urls.is_empty() {
            return GateDecision::NoEvidence {
                reason: NoEvidenceReason::NoAllowedSource,
            };
        }
        if evidence.blended_score < self.config.threshold {
            return GateDecision::NoEvidence {
                reason: NoEvidenceReason::BelowThreshold,
            };
        }

        let node_cut = self.config.node_threshold();
        let passages: Vec<&str> = evidence
            .candidate_nodes
            .iter()
            .filter(|n| n.score >= node_cut)
            .map(|n| n.text.as_str())
            .collect();

        if passages.is_empty() {
            return GateDecision::NoEvidence {
                reason: NoEvidenceReason::NoPassageAboveNodeCut,
            };
        }

        GateDecision::UseEvidence {
            evidence_text: passages.join("\n\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use kyra_core::models::RetrievedNode;

    use super::*;

    fn node(text: &str, score: f64, url: &str) -> RetrievedNode {
        RetrievedNode {
            text: text.to_string(),
            score,
            source_url: url.to_string(),
            collection_id: "nhs_docs".to_string(),
        }
    }

    fn evidence(blended: f64, nodes: Vec<RetrievedNode>, sources: &[&str]) -> CombinedEvidence {
        CombinedEvidence {
            primary_score: blended,
            contextual_score: 0.0,
            blended_score: blended,
            candidate_nodes: nodes,
            source_urls: sources.iter().map(|s| s.to_string()).collect(),
        }
    }

    const NHS: &str = "https://www.nhs.uk/conditions/diabetes/";

    #[test]
    fn domain_filter_is_independent_of_score() {
        let gate = EvidenceGate::default();
        let e = evidence(0.5, vec![node("text", 0.5, "https://example.com")], &[]);
        assert_eq!(
            gate.decide(&e),
            GateDecision::NoEvidence {
                reason: NoEvidenceReason::NoAllowedSource
            }
        );
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let gate = EvidenceGate::with_threshold(0.30);

        let below = evidence(0.29, vec![node("a", 0.5, NHS)], &[NHS]);
        assert_eq!(
            gate.decide(&below),
            GateDecision::NoEvidence {
                reason: NoEvidenceReason::BelowThreshold
            }
        );

        let at = evidence(0.30, vec![node("a", 0.5, NHS)], &[NHS]);
        assert!(gate.decide(&at).uses_evidence());
    }

    #[test]
    fn passages_use_looser_node_cut() {
        let gate = EvidenceGate::with_threshold(0.30);
        let e = evidence(
            0.40,
            vec![
                node("strong", 0.5, NHS),
                node("marginal", 0.24, "https://example.com"),
                node("weak", 0.2, NHS),
            ],
            &[NHS],
        );
        assert_eq!(gate.decide(&e).evidence_text(), Some("strong\n\nmarginal"));
    }

    #[test]
    fn no_passage_above_cut_withholds_evidence() {
        let gate = EvidenceGate::with_threshold(0.30);
        let e = evidence(0.35, vec![node("weak", 0.1, NHS)], &[NHS]);
        assert_eq!(
            gate.decide(&e),
            GateDecision::NoEvidence {
                reason: NoEvidenceReason::NoPassageAboveNodeCut
            }
        );
    }

    #[test]
    fn empty_evidence_never_passes() {
        assert!(!EvidenceGate::default().decide(&CombinedEvidence::empty()).uses_evidence());
    }
}
