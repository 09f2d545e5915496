// Curated project tables.
// The hand-maintained catalog list and the manual complexity overrides.

use super::model::{Category, Complexity};

/// A hand-picked catalog entry with its pre-assigned category.
#[derive(Debug, Clone)]
pub struct CuratedEntry {
    pub name: String,
    pub category: Category,
}

impl CuratedEntry {
    pub fn new(name: &str, category: Category) -> Self {
        Self {
            name: name.to_string(),
            category,
        }
    }
}

/// Repository names shown in the catalog view, with manually assigned
/// categories that override automatic classification.
const CATALOG: &[(&str, Category)] = &[
    ("cognitive-bias-lab", Category::AiMl),
    ("llm-eval-harness", Category::AiMl),
    ("orbit-sim", Category::Physics),
    ("collision-playground", Category::Physics),
    ("ColorCoded", Category::Web),
    ("portfolio-site", Category::Web),
    ("distributed-kv", Category::Systems),
    ("repo-metrics-cli", Category::Systems),
    ("ml-ethics-survey", Category::Research),
];

/// Manual complexity tiers for repositories whose popularity score is a poor
/// proxy. Checked before the score, matched case-insensitively.
const COMPLEXITY_OVERRIDES: &[(&str, Complexity)] = &[
    ("ColorCoded", Complexity::Intermediate),
    ("distributed-kv", Complexity::Expert),
    ("portfolio-site", Complexity::Beginner),
];

/// The default curated catalog list.
pub fn catalog() -> Vec<CuratedEntry> {
    CATALOG
        .iter()
        .map(|(name, category)| CuratedEntry::new(name, *category))
        .collect()
}

/// Look up a manual complexity override by repository name.
pub fn complexity_override(name: &str) -> Option<Complexity> {
    COMPLEXITY_OVERRIDES
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
        .map(|(_, tier)| *tier)
}
