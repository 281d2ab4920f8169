use crate::models::{ActivitySeries, Profile, Repository};

pub const IMPROVEMENTS_SYSTEM_PROMPT: &str = r#"You are an experienced open-source mentor reviewing a developer's public GitHub presence.
Give specific, actionable suggestions the developer can use to improve their code quality, contributions, and projects.
Refer to repositories by name when a suggestion is about one of them. Respond in plain prose or a short bulleted list."#;

pub const PROJECTS_SYSTEM_PROMPT: &str = r#"You suggest creative, inspiring project ideas that build on a developer's existing skills and interests.
You must respond with valid JSON: an array of strings, one project idea per string, and nothing else."#;

pub const QUESTION_SYSTEM_PROMPT: &str = r#"You answer questions about a GitHub user using only the profile, repository and activity data provided.
If the data does not contain the answer, say so plainly instead of guessing."#;

/// Dashboard data embedded into every prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub username: &'a str,
    pub profile: Option<&'a Profile>,
    pub repositories: &'a [Repository],
    pub activity: Option<&'a ActivitySeries>,
}

impl<'a> PromptContext<'a> {
    pub fn new(username: &'a str, repositories: &'a [Repository]) -> Self {
        Self {
            username,
            profile: None,
            repositories,
            activity: None,
        }
    }

    pub fn with_profile(mut self, profile: &'a Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_activity(mut self, activity: &'a ActivitySeries) -> Self {
        self.activity = Some(activity);
        self
    }

    pub fn render(&self) -> String {
        let mut out = format!("GitHub user: {}\n", self.username);

        if let Some(profile) = self.profile {
            out.push_str("\nProfile:\n");
            if let Some(name) = &profile.name {
                out.push_str(&format!("- Name: {}\n", name));
            }
            if let Some(bio) = &profile.bio {
                out.push_str(&format!("- Bio: {}\n", bio));
            }
            out.push_str(&format!(
                "- Public repositories: {}\n- Followers: {}\n- Following: {}\n- Joined: {}\n",
                profile.public_repos,
                profile.followers,
                profile.following,
                profile.joined.format("%Y-%m-%d")
            ));
        }

        if !self.repositories.is_empty() {
            out.push_str("\nRepositories:\n");
            for repo in self.repositories {
                out.push_str(&format!(
                    "- Name: {}, URL: {}, Language: {}, Stars: {}, Last Updated: {}\n",
                    repo.name,
                    repo.url,
                    repo.language_label(),
                    repo.stars,
                    repo.last_updated.format("%Y-%m-%d")
                ));
            }
        }

        if let Some(activity) = self.activity {
            out.push_str(&format!(
                "\nPublic activity over the last {} days: {} events on {} active days, longest streak {} days.\n",
                activity.len(),
                activity.total_contributions(),
                activity.active_days(),
                activity.longest_streak()
            ));
        }

        out
    }
}

pub fn improvements_prompt(context: &PromptContext<'_>) -> String {
    format!(
        "Analyze the following GitHub profile and repositories, and suggest specific improvements.\n\n{}",
        context.render()
    )
}

pub fn projects_prompt(context: &PromptContext<'_>, count: usize) -> String {
    format!(
        "Based on the GitHub profile and repositories below, suggest {} project ideas that align with this developer's skills and interests.\n\n{}\nRespond with a JSON array of {} strings:\n",
        count,
        context.render(),
        count
    )
}

pub fn question_prompt(context: &PromptContext<'_>, question: &str) -> String {
    format!("{}\nQuestion: {}\n", context.render(), question.trim())
}
