use async_trait::async_trait;
use crate::error::Result;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Run one system + user prompt exchange and return the text reply.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
    fn name(&self) -> &str;
}
