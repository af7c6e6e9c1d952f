use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a question is health-related.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Medical,
    General,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Medical => "MEDICAL",
            Self::General => "GENERAL",
        }
    }

    /// Strict match against the two labels. Anything else is `None`.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "MEDICAL" => Some(Self::Medical),
            "GENERAL" => Some(Self::General),
            _ => None,
        }
    }

    pub fn is_medical(&self) -> bool {
        matches!(self, Self::Medical)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Analytics category of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    SymptomsDiagnosis,
    TreatmentMedication,
    PreventionLifestyle,
    General,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 4] = [
        Self::SymptomsDiagnosis,
        Self::TreatmentMedication,
        Self::PreventionLifestyle,
        Self::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::SymptomsDiagnosis => "Symptoms & Diagnosis",
            Self::TreatmentMedication => "Treatment & Medication",
            Self::PreventionLifestyle => "Prevention & Lifestyle",
            Self::General => "General",
        }
    }
}

/// A category plus the condition the question is about, when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCategory {
    pub kind: CategoryKind,
    pub condition: Option<String>,
}

impl QuestionCategory {
    pub fn general() -> Self {
        Self {
            kind: CategoryKind::General,
            condition: None,
        }
    }
}

/// Renders as `Category` or `Category, Condition`.
impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Some(condition) => write!(f, "{}, {}", self.kind.label(), condition),
            None => f.write_str(self.kind.label()),
        }
    }
}
