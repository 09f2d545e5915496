// Classification rules.
// Pure, table-driven category and complexity assignment for repositories.

use crate::github::types::Repository;

use super::curated;
use super::model::{Category, Complexity};

/// An ordered classification rule: first match wins.
struct CategoryRule {
    category: Category,
    /// Case-insensitive substrings matched against topic labels.
    keywords: &'static [&'static str],
    /// Primary languages that also select this category.
    languages: &'static [&'static str],
}

// Priority order is fixed: AI/ML beats Physics beats Web beats Systems.
// Anything matching nothing falls through to Research.
const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::AiMl,
        keywords: &["ai", "ml", "neural", "cognitive", "ethics", "llm"],
        languages: &[],
    },
    CategoryRule {
        category: Category::Physics,
        keywords: &[
            "physics",
            "simulation",
            "game",
            "engine",
            "collision",
            "3d",
            "rendering",
        ],
        languages: &[],
    },
    CategoryRule {
        category: Category::Web,
        keywords: &[
            "web",
            "frontend",
            "react",
            "next",
            "typescript",
            "javascript",
            "html",
            "css",
        ],
        languages: &["TypeScript", "JavaScript"],
    },
    CategoryRule {
        category: Category::Systems,
        keywords: &[
            "system",
            "distributed",
            "microservice",
            "api",
            "backend",
            "server",
            "database",
            "cli",
            "security",
        ],
        languages: &["Go", "Rust"],
    },
];

impl CategoryRule {
    fn matches(&self, topics: &[String], language: Option<&str>) -> bool {
        let topic_hit = topics.iter().any(|topic| {
            let topic = topic.to_lowercase();
            self.keywords.iter().any(|keyword| topic.contains(keyword))
        });
        if topic_hit {
            return true;
        }

        language.is_some_and(|lang| {
            self.languages
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(lang))
        })
    }
}

/// Assign a category from topics and primary language.
pub fn category(repo: &Repository) -> Category {
    for rule in RULES {
        if rule.matches(&repo.topics, repo.language.as_deref()) {
            return rule.category;
        }
    }
    Category::Research
}

/// Assign a complexity tier.
///
/// The manual override table wins unconditionally; otherwise a popularity
/// score (`stars + 2*forks + 5*topics`) is bucketed. This is a heuristic
/// proxy, not a structural analysis.
pub fn complexity(repo: &Repository) -> Complexity {
    if let Some(tier) = curated::complexity_override(&repo.name) {
        return tier;
    }

    let score = repo.stargazers_count + 2 * repo.forks_count + 5 * repo.topics.len() as u64;
    match score {
        100.. => Complexity::Expert,
        50.. => Complexity::Advanced,
        20.. => Complexity::Intermediate,
        _ => Complexity::Beginner,
    }
}

#[cfg(test)]
mod tests {
    use crate::github::endpoints::testing::make_repo;

    use super::*;

    #[test]
    fn test_ai_ml_beats_systems() {
        // A repo tagged with both buckets lands in the higher-priority one.
        let mut repo = make_repo("octocat", "agent-server", &["llm", "backend"]);
        repo.language = None;
        assert_eq!(category(&repo), Category::AiMl);
    }

    #[test]
    fn test_physics_beats_web() {
        let mut repo = make_repo("octocat", "engine", &["collision", "web"]);
        repo.language = None;
        assert_eq!(category(&repo), Category::Physics);
    }

    #[test]
    fn test_language_selects_web() {
        let mut repo = make_repo("octocat", "site", &[]);
        repo.language = Some("TypeScript".to_string());
        assert_eq!(category(&repo), Category::Web);
    }

    #[test]
    fn test_rust_without_topics_is_systems() {
        let repo = make_repo("octocat", "tool", &[]);
        assert_eq!(category(&repo), Category::Systems);
    }

    #[test]
    fn test_unmatched_falls_through_to_research() {
        let mut repo = make_repo("octocat", "thesis", &["latex"]);
        repo.language = Some("TeX".to_string());
        assert_eq!(category(&repo), Category::Research);
    }

    #[test]
    fn test_keyword_match_is_substring() {
        let mut repo = make_repo("octocat", "study", &["neural-networks"]);
        repo.language = None;
        assert_eq!(category(&repo), Category::AiMl);
    }

    #[test]
    fn test_manual_override_beats_score() {
        // Zero stars and forks would normally score Beginner.
        let repo = make_repo("octocat", "ColorCoded", &[]);
        assert_eq!(complexity(&repo), Complexity::Intermediate);
    }

    #[test]
    fn test_score_buckets() {
        let mut repo = make_repo("octocat", "tool", &[]);

        repo.stargazers_count = 10;
        assert_eq!(complexity(&repo), Complexity::Beginner);

        repo.stargazers_count = 20;
        assert_eq!(complexity(&repo), Complexity::Intermediate);

        repo.stargazers_count = 40;
        repo.forks_count = 5;
        assert_eq!(complexity(&repo), Complexity::Advanced);

        repo.stargazers_count = 80;
        repo.forks_count = 5;
        repo.topics = vec!["a".to_string(), "b".to_string()];
        assert_eq!(complexity(&repo), Complexity::Expert);
    }
}
