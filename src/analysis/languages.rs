use std::collections::HashMap;

use crate::models::{LanguageShare, Repository};

/// Repositories per primary language, most common first.
///
/// Repositories without a detected language are left out of both the
/// counts and the percentage base.
pub fn language_distribution(repos: &[Repository]) -> Vec<LanguageShare> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for repo in repos {
        if let Some(language) = repo.language.as_deref().filter(|l| !l.trim().is_empty()) {
            *counts.entry(language).or_insert(0) += 1;
        }
    }

    let total: u32 = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare> = counts
        .into_iter()
        .map(|(language, count)| LanguageShare {
            language: language.to_string(),
            repositories: count,
            percentage: count as f32 / total as f32 * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| {
        b.repositories
            .cmp(&a.repositories)
            .then_with(|| a.language.cmp(&b.language))
    });

    shares
}
