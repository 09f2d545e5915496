// Cache slot names.
// Builds slot keys matching the kinds of data the provider stores.

/// Featured projects derived from pinned repositories.
pub const FEATURED: &str = "featured";

/// Catalog projects derived from the curated list.
pub const CATALOG: &str = "catalog";

/// Slot for a single repository's raw remote record.
pub fn repo_slot(name: &str) -> String {
    format!("repo:{}", name.to_lowercase())
}

/// Slot for a repository's README text.
pub fn readme_slot(name: &str) -> String {
    format!("readme:{}", name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_names_are_case_insensitive() {
        assert_eq!(repo_slot("ColorCoded"), repo_slot("colorcoded"));
        assert_eq!(readme_slot("Orbit-Sim"), "readme:orbit-sim");
    }
}
