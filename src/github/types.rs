// GitHub API response types.
// Defines structs for deserializing REST and GraphQL responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub user or organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// GitHub repository as returned by the REST API.
///
/// Pinned repositories arrive via GraphQL with a different shape and are
/// converted into this struct so the rest of the service sees one record type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub private: bool,
}

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
}

/// `data` payload of the pinned-items query.
#[derive(Debug, Deserialize)]
pub struct PinnedData {
    pub user: Option<PinnedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedUser {
    pub pinned_items: PinnedItems,
}

#[derive(Debug, Deserialize)]
pub struct PinnedItems {
    pub nodes: Vec<PinnedRepo>,
}

/// Repository node inside the pinned-items GraphQL connection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedRepo {
    pub name: String,
    pub owner: Owner,
    pub description: Option<String>,
    pub url: String,
    pub homepage_url: Option<String>,
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub primary_language: Option<LanguageNode>,
    pub repository_topics: TopicConnection,
}

#[derive(Debug, Deserialize)]
pub struct LanguageNode {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TopicConnection {
    pub nodes: Vec<TopicNode>,
}

#[derive(Debug, Deserialize)]
pub struct TopicNode {
    pub topic: Topic,
}

#[derive(Debug, Deserialize)]
pub struct Topic {
    pub name: String,
}

impl From<PinnedRepo> for Repository {
    fn from(pinned: PinnedRepo) -> Self {
        Repository {
            name: pinned.name,
            owner: pinned.owner,
            description: pinned.description,
            html_url: pinned.url,
            homepage: pinned.homepage_url,
            language: pinned.primary_language.map(|l| l.name),
            topics: pinned
                .repository_topics
                .nodes
                .into_iter()
                .map(|n| n.topic.name)
                .collect(),
            stargazers_count: pinned.stargazer_count,
            forks_count: pinned.fork_count,
            created_at: None,
            updated_at: None,
            archived: false,
            disabled: false,
            private: false,
        }
    }
}
