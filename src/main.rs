use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gitpulse::analysis::{assess_quality, render_heatmap};
use gitpulse::llm::PromptContext;
use gitpulse::models::{LanguageShare, QualityAssessment, Repository};
use gitpulse::{ClaudeProvider, Config, Dashboard, DashboardLoader, GitHubClient, InsightAdvisor};

const TOP_REPOSITORIES: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "gitpulse")]
#[command(version)]
#[command(about = "Summarize a GitHub user's profile, repositories and public activity")]
struct Args {
    /// GitHub username to look up
    #[arg(short, long)]
    username: String,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Ask the LLM for profile improvement suggestions
    #[arg(long)]
    suggest: bool,

    /// Ask the LLM for project ideas
    #[arg(long)]
    projects: bool,

    /// Ask the LLM a question about this user
    #[arg(long)]
    ask: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    #[serde(flatten)]
    dashboard: Dashboard,
    languages: Vec<LanguageShare>,
    top_repositories: Vec<RankedRepository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    improvement_suggestions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_ideas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
}

#[derive(Serialize)]
struct RankedRepository {
    #[serde(flatten)]
    repository: Repository,
    quality: QualityAssessment,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitpulse=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    if !config.github.has_token() {
        tracing::info!("GITHUB_TOKEN not set, using anonymous (rate-limited) requests");
    }

    let github = GitHubClient::new(&config.github)?;
    let loader = DashboardLoader::new(github, config.request_timeout);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Fetching GitHub data for {}", args.username.trim()));
    let loaded = loader.load(&args.username).await;
    spinner.finish_and_clear();
    let dashboard = loaded?;

    let now = Utc::now();
    let top_repositories = dashboard
        .top_repositories(TOP_REPOSITORIES)
        .into_iter()
        .map(|repository| RankedRepository {
            quality: assess_quality(&repository, now),
            repository,
        })
        .collect();

    let mut report = Report {
        languages: dashboard.languages(),
        top_repositories,
        improvement_suggestions: None,
        project_ideas: None,
        answer: None,
        dashboard,
    };

    if args.suggest || args.projects || args.ask.is_some() {
        run_llm_flows(&mut report, &args, &config).await?;
    }

    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(&report)?,
        "markdown" => format_markdown(&report),
        _ => format_text(&report),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

async fn run_llm_flows(report: &mut Report, args: &Args, config: &Config) -> anyhow::Result<()> {
    let provider = ClaudeProvider::new(
        config.require_anthropic_key()?.to_string(),
        Some(config.llm_model.clone()),
    )?;
    let advisor = InsightAdvisor::new(provider);

    let dashboard = &report.dashboard;
    let context = PromptContext::new(&dashboard.profile.login, &dashboard.repositories)
        .with_profile(&dashboard.profile)
        .with_activity(&dashboard.activity);

    // LLM failures are reported but do not discard the dashboard
    let mut improvement_suggestions = None;
    let mut project_ideas = None;
    let mut answer = None;

    if args.suggest {
        match advisor.suggest_improvements(&context).await {
            Ok(text) => improvement_suggestions = Some(text),
            Err(e) => tracing::error!("Could not load improvement suggestions: {}", e),
        }
    }

    if args.projects {
        match advisor.suggest_projects(&context).await {
            Ok(ideas) => project_ideas = Some(ideas),
            Err(e) => tracing::error!("Could not load project ideas: {}", e),
        }
    }

    if let Some(question) = &args.ask {
        match advisor.answer_question(&context, question).await {
            Ok(text) => answer = Some(text),
            Err(e) => tracing::error!("Could not answer question: {}", e),
        }
    }

    report.improvement_suggestions = improvement_suggestions;
    report.project_ideas = project_ideas;
    report.answer = answer;
    Ok(())
}

fn format_text(report: &Report) -> String {
    let dashboard = &report.dashboard;
    let profile = &dashboard.profile;
    let activity = &dashboard.activity;
    let mut output = String::new();

    output.push_str(&format!("\n=== GitHub Dashboard: {} ===\n\n", profile.login));

    if let Some(ref name) = profile.name {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(ref bio) = profile.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    output.push_str(&format!(
        "Public repos: {}  Followers: {}  Following: {}\n",
        profile.public_repos, profile.followers, profile.following
    ));
    output.push_str(&format!("Joined: {}\n", profile.joined.format("%Y-%m-%d")));

    output.push_str("\nTop Repositories:\n");
    if report.top_repositories.is_empty() {
        output.push_str("  (none)\n");
    }
    for ranked in &report.top_repositories {
        let repo = &ranked.repository;
        output.push_str(&format!(
            "  - {} ({}) ★{} [{} quality]\n",
            repo.name,
            repo.language_label(),
            repo.stars,
            ranked.quality.tier
        ));
        if let Some(feedback) = ranked.quality.feedback.first() {
            output.push_str(&format!("      {}\n", feedback));
        }
    }

    if !report.languages.is_empty() {
        output.push_str("\nLanguages:\n");
        for share in &report.languages {
            output.push_str(&format!(
                "  {}: {} repos ({:.1}%)\n",
                share.language, share.repositories, share.percentage
            ));
        }
    }

    output.push_str(&format!(
        "\nActivity ({} to {}):\n",
        activity.first_date().map(|d| d.to_string()).unwrap_or_default(),
        activity.last_date().map(|d| d.to_string()).unwrap_or_default()
    ));
    output.push_str(&format!(
        "  Public events: {}\n  Active days: {}\n  Longest streak: {} days\n  Current streak: {} days\n",
        activity.total_contributions(),
        activity.active_days(),
        activity.longest_streak(),
        activity.current_streak()
    ));
    if let Some(day) = activity.busiest_day() {
        output.push_str(&format!(
            "  Busiest day: {} ({} events)\n",
            day.date, day.contributions
        ));
    }
    output.push('\n');
    for row in render_heatmap(activity) {
        output.push_str(&format!("  {}\n", row));
    }

    if !dashboard.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in &dashboard.warnings {
            output.push_str(&format!("  ! {}\n", warning));
        }
    }

    if let Some(ref suggestions) = report.improvement_suggestions {
        output.push_str(&format!("\nSuggested Improvements:\n{}\n", suggestions));
    }
    if let Some(ref ideas) = report.project_ideas {
        output.push_str("\nProject Ideas:\n");
        for (i, idea) in ideas.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, idea));
        }
    }
    if let Some(ref answer) = report.answer {
        output.push_str(&format!("\nAnswer:\n{}\n", answer));
    }

    output
}

fn format_markdown(report: &Report) -> String {
    let dashboard = &report.dashboard;
    let profile = &dashboard.profile;
    let activity = &dashboard.activity;
    let mut output = String::new();

    output.push_str(&format!("# GitHub Dashboard: {}\n\n", profile.login));

    if let Some(ref name) = profile.name {
        output.push_str(&format!("**Name:** {}\n\n", name));
    }
    if let Some(ref bio) = profile.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Public Repositories | {} |\n", profile.public_repos));
    output.push_str(&format!("| Followers | {} |\n", profile.followers));
    output.push_str(&format!("| Following | {} |\n", profile.following));
    output.push_str(&format!("| Joined | {} |\n", profile.joined.format("%Y-%m-%d")));
    output.push_str(&format!(
        "| Public Events (365 days) | {} |\n",
        activity.total_contributions()
    ));
    output.push_str(&format!("| Active Days | {} |\n", activity.active_days()));
    output.push_str(&format!(
        "| Longest Streak | {} days |\n",
        activity.longest_streak()
    ));

    output.push_str("\n## Activity\n\n```text\n");
    for row in render_heatmap(activity) {
        output.push_str(&row);
        output.push('\n');
    }
    output.push_str("```\n");

    output.push_str("\n## Top Repositories\n\n");
    output.push_str("| Repository | Language | Stars | Updated | Quality |\n");
    output.push_str("|------------|----------|-------|---------|---------|\n");
    for ranked in &report.top_repositories {
        let repo = &ranked.repository;
        output.push_str(&format!(
            "| [{}]({}) | {} | {} | {} | {} ({}/5) |\n",
            repo.name,
            repo.url,
            repo.language_label(),
            repo.stars,
            repo.last_updated.format("%Y-%m-%d"),
            ranked.quality.tier,
            ranked.quality.score
        ));
    }

    if !report.languages.is_empty() {
        output.push_str("\n## Languages\n\n");
        for share in &report.languages {
            output.push_str(&format!(
                "- **{}**: {} repos ({:.1}%)\n",
                share.language, share.repositories, share.percentage
            ));
        }
    }

    if !dashboard.warnings.is_empty() {
        output.push_str("\n## Warnings\n\n");
        for warning in &dashboard.warnings {
            output.push_str(&format!("- {}\n", warning));
        }
    }

    if let Some(ref suggestions) = report.improvement_suggestions {
        output.push_str(&format!("\n## Suggested Improvements\n\n{}\n", suggestions));
    }
    if let Some(ref ideas) = report.project_ideas {
        output.push_str("\n## Project Ideas\n\n");
        for (i, idea) in ideas.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, idea));
        }
    }
    if let Some(ref answer) = report.answer {
        output.push_str(&format!("\n## Answer\n\n{}\n", answer));
    }

    output.push_str(&format!(
        "\n---\n*Generated on {}*\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
