use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub repositories: u32,
    pub percentage: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub score: u8,
    pub tier: QualityTier,
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityTier {
    High,
    Medium,
    Low,
}

impl QualityTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            4..=u8::MAX => QualityTier::High,
            2..=3 => QualityTier::Medium,
            _ => QualityTier::Low,
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityTier::High => write!(f, "High"),
            QualityTier::Medium => write!(f, "Medium"),
            QualityTier::Low => write!(f, "Low"),
        }
    }
}
