// Project model.
// The normalized representation consumed by the UI, derived from remote records.

use serde::{Deserialize, Serialize};

use crate::github::types::Repository;

use super::classify;

/// Maximum length of the short description, in characters.
const SHORT_DESCRIPTION_CHARS: usize = 140;

/// Project category, assigned by keyword rules or the curated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "AI/ML")]
    AiMl,
    Physics,
    Systems,
    Web,
    Research,
}

/// Complexity tier, from the override table or the popularity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Uniform project representation consumed by the portfolio UI.
///
/// Derived deterministically from a [`Repository`] plus the classification
/// rules; never mutated after creation, replaced wholesale on cache refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProject {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub long_description: String,
    pub url: String,
    pub demo_url: Option<String>,
    pub category: Category,
    pub complexity: Complexity,
    pub technologies: Vec<String>,
    pub featured: bool,
    pub image: String,
}

/// Derive the stable project identifier from owner and repository name.
///
/// Lower-cased `"<owner>/<name>"` with every non-alphanumeric character
/// stripped, so differing case or separators can never produce two ids for
/// the same repository.
pub fn project_id(owner: &str, name: &str) -> String {
    format!("{}/{}", owner, name)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Map a remote record to a [`NormalizedProject`].
///
/// `category` overrides automatic classification (used for curated entries).
pub fn normalize(
    repo: &Repository,
    featured: bool,
    category: Option<Category>,
) -> NormalizedProject {
    let id = project_id(&repo.owner.login, &repo.name);
    let category = category.unwrap_or_else(|| classify::category(repo));
    let complexity = classify::complexity(repo);
    let description = repo.description.clone().unwrap_or_default();

    NormalizedProject {
        title: display_title(&repo.name),
        short_description: truncate(&description, SHORT_DESCRIPTION_CHARS),
        long_description: description,
        url: repo.html_url.clone(),
        demo_url: repo.homepage.clone().filter(|h| !h.is_empty()),
        category,
        complexity,
        technologies: technologies(repo),
        featured,
        image: format!("/assets/projects/{}.png", id),
        id,
    }
}

/// Turn a repository name into a display title ("orbit-sim" -> "Orbit Sim").
fn display_title(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Primary language followed by topics, deduplicated case-insensitively.
fn technologies(repo: &Repository) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();

    let candidates = repo
        .language
        .iter()
        .chain(repo.topics.iter())
        .map(|s| s.as_str());
    for candidate in candidates {
        let folded = candidate.to_lowercase();
        if !seen.contains(&folded) {
            seen.push(folded);
            out.push(candidate.to_string());
        }
    }

    out
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut short: String = text.chars().take(limit).collect();
    short.push('…');
    short
}
