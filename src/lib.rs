pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod activity;
pub mod analysis;
pub mod llm;

pub use config::{Config, GitHubSettings};
pub use error::{Error, ErrorKind, Result};
pub use github::GitHubClient;
pub use llm::{ClaudeProvider, InsightAdvisor, LLMProvider};
pub use analysis::{Dashboard, DashboardLoader};
