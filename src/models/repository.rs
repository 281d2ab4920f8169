use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one repository owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub url: String,
    /// `None` when GitHub detected no primary language.
    pub language: Option<String>,
    pub stars: u32,
    pub last_updated: DateTime<Utc>,
}

impl Repository {
    pub fn language_label(&self) -> &str {
        self.language.as_deref().unwrap_or("none detected")
    }
}
