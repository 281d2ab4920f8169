pub mod provider;
pub mod claude;
pub mod prompts;
pub mod parser;
pub mod advisor;

pub use provider::LLMProvider;
pub use claude::ClaudeProvider;
pub use prompts::PromptContext;
pub use advisor::{InsightAdvisor, PROJECT_IDEA_COUNT};
