use chrono::{DateTime, Utc};

use crate::models::{QualityAssessment, QualityTier, Repository};

const MAX_SCORE: u8 = 5;

/// Heuristic 0-5 score from stars, freshness and language detection.
pub fn assess_quality(repo: &Repository, now: DateTime<Utc>) -> QualityAssessment {
    let mut score = 0u8;
    let mut feedback = Vec::new();

    if repo.stars > 50 {
        score += 3;
    } else if repo.stars > 10 {
        score += 1;
    } else {
        feedback.push("Low stars count.".to_string());
    }

    // 30-day months
    let months_since_update = (now - repo.last_updated).num_seconds() as f64 / (60.0 * 60.0 * 24.0 * 30.0);
    if months_since_update < 3.0 {
        score += 2;
    } else if months_since_update < 6.0 {
        score += 1;
    } else {
        feedback.push("Repository not updated recently.".to_string());
    }

    match repo.language.as_deref() {
        Some(language) if !language.trim().is_empty() => score += 1,
        _ => feedback.push("Primary language not detected.".to_string()),
    }

    let score = score.min(MAX_SCORE);
    QualityAssessment {
        score,
        tier: QualityTier::from_score(score),
        feedback,
    }
}

/// The `n` most starred repositories, newest update first among equals.
pub fn top_repositories(repos: &[Repository], n: usize) -> Vec<Repository> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| {
        b.stars
            .cmp(&a.stars)
            .then_with(|| b.last_updated.cmp(&a.last_updated))
    });
    sorted.truncate(n);
    sorted
}
