use crate::error::{Error, Result};
use crate::llm::parser::parse_string_list;
use crate::llm::prompts::{
    improvements_prompt, projects_prompt, question_prompt, PromptContext,
    IMPROVEMENTS_SYSTEM_PROMPT, PROJECTS_SYSTEM_PROMPT, QUESTION_SYSTEM_PROMPT,
};
use crate::llm::provider::LLMProvider;

/// Number of ideas returned by [`InsightAdvisor::suggest_projects`].
pub const PROJECT_IDEA_COUNT: usize = 3;

pub const NO_REPOSITORIES_MESSAGE: &str = "This user has no public repositories or they could not be analyzed. Suggestions for code/projects cannot be generated without repository data.";

/// Free-text suggestions and answers produced from dashboard data.
pub struct InsightAdvisor<P: LLMProvider> {
    provider: P,
}

impl<P: LLMProvider> InsightAdvisor<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn suggest_improvements(&self, context: &PromptContext<'_>) -> Result<String> {
        if context.repositories.is_empty() {
            return Ok(NO_REPOSITORIES_MESSAGE.to_string());
        }

        tracing::info!("Requesting improvement suggestions from {}", self.provider.name());
        let reply = self
            .provider
            .complete(IMPROVEMENTS_SYSTEM_PROMPT, &improvements_prompt(context))
            .await?;
        Ok(reply.trim().to_string())
    }

    pub async fn suggest_projects(&self, context: &PromptContext<'_>) -> Result<Vec<String>> {
        tracing::info!("Requesting project ideas from {}", self.provider.name());
        let reply = self
            .provider
            .complete(
                PROJECTS_SYSTEM_PROMPT,
                &projects_prompt(context, PROJECT_IDEA_COUNT),
            )
            .await?;

        let mut ideas = parse_string_list(&reply)?;
        if ideas.len() < PROJECT_IDEA_COUNT {
            return Err(Error::ParseError(format!(
                "Expected {} project ideas, got {}",
                PROJECT_IDEA_COUNT,
                ideas.len()
            )));
        }
        ideas.truncate(PROJECT_IDEA_COUNT);
        Ok(ideas)
    }

    pub async fn answer_question(
        &self,
        context: &PromptContext<'_>,
        question: &str,
    ) -> Result<String> {
        if question.trim().is_empty() {
            return Err(Error::InvalidInput("question cannot be empty".to_string()));
        }

        let reply = self
            .provider
            .complete(QUESTION_SYSTEM_PROMPT, &question_prompt(context, question))
            .await?;
        Ok(reply.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::models::Repository;

    struct ScriptedProvider {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn repos() -> Vec<Repository> {
        vec![Repository {
            name: "gitpulse".to_string(),
            url: "https://github.com/octocat/gitpulse".to_string(),
            language: Some("Rust".to_string()),
            stars: 12,
            last_updated: "2024-06-01T00:00:00Z".parse().unwrap(),
        }]
    }

    #[tokio::test]
    async fn test_improvements_skip_provider_without_repos() {
        let advisor = InsightAdvisor::new(ScriptedProvider::new("unused"));
        let reply = advisor
            .suggest_improvements(&PromptContext::new("octocat", &[]))
            .await
            .unwrap();
        assert_eq!(reply, NO_REPOSITORIES_MESSAGE);
        assert_eq!(advisor.provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_improvements_trimmed() {
        let repos = repos();
        let advisor = InsightAdvisor::new(ScriptedProvider::new("\n  Add a README.  \n"));
        let reply = advisor
            .suggest_improvements(&PromptContext::new("octocat", &repos))
            .await
            .unwrap();
        assert_eq!(reply, "Add a README.");
        assert!(advisor.provider.prompts.lock().unwrap()[0].contains("gitpulse"));
    }

    #[tokio::test]
    async fn test_projects_truncated_to_three() {
        let repos = repos();
        let advisor = InsightAdvisor::new(ScriptedProvider::new(r#"["a", "b", "c", "d"]"#));
        let ideas = advisor
            .suggest_projects(&PromptContext::new("octocat", &repos))
            .await
            .unwrap();
        assert_eq!(ideas, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_too_few_projects() {
        let repos = repos();
        let advisor = InsightAdvisor::new(ScriptedProvider::new(r#"["only one"]"#));
        let result = advisor
            .suggest_projects(&PromptContext::new("octocat", &repos))
            .await;
        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[tokio::test]
    async fn test_blank_question_rejected() {
        let advisor = InsightAdvisor::new(ScriptedProvider::new("answer"));
        let result = advisor
            .answer_question(&PromptContext::new("octocat", &[]), "   ")
            .await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(advisor.provider.calls(), 0);
    }
}
