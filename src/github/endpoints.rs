// GitHub API endpoint functions.
// Provides the RepoSource trait and its GitHubClient implementation.

use async_trait::async_trait;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{PinnedData, Repository};

const PINNED_QUERY: &str = r#"
query($login: String!, $limit: Int!) {
  user(login: $login) {
    pinnedItems(first: $limit, types: REPOSITORY) {
      nodes {
        ... on Repository {
          name
          owner { login }
          description
          url
          homepageUrl
          stargazerCount
          forkCount
          primaryLanguage { name }
          repositoryTopics(first: 20) { nodes { topic { name } } }
        }
      }
    }
  }
}
"#;

/// Read-only view of the remote repository source.
///
/// The provider depends on this trait rather than on `GitHubClient` directly
/// so tests can substitute a mock with call counters.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Repositories the account owner pinned on their profile.
    ///
    /// Returns [`crate::error::FolioError::MissingToken`] when no credential
    /// is configured; callers soften that to an empty result.
    async fn pinned_repositories(&self, login: &str, limit: u32) -> Result<Vec<Repository>>;

    /// Most-recently-updated public repositories for an account.
    async fn recent_repositories(&self, login: &str, limit: u32) -> Result<Vec<Repository>>;

    /// A single repository by owner and name.
    async fn repository(&self, owner: &str, name: &str) -> Result<Repository>;

    /// Raw README text for a repository.
    async fn readme(&self, owner: &str, name: &str) -> Result<String>;
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn pinned_repositories(&self, login: &str, limit: u32) -> Result<Vec<Repository>> {
        let variables = serde_json::json!({ "login": login, "limit": limit });
        let data: PinnedData = self.graphql(PINNED_QUERY, variables).await?;

        let nodes = data
            .user
            .map(|user| user.pinned_items.nodes)
            .unwrap_or_default();
        Ok(nodes.into_iter().map(Repository::from).collect())
    }

    async fn recent_repositories(&self, login: &str, limit: u32) -> Result<Vec<Repository>> {
        let params = [
            ("sort", "updated"),
            ("direction", "desc"),
            ("per_page", &limit.to_string()),
        ];
        let response = self
            .get_with_params(&format!("/users/{}/repos", login), &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }

    async fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let response = self.get(&format!("/repos/{}/{}", owner, name)).await?;
        let repository: Repository = response.json().await?;
        Ok(repository)
    }

    async fn readme(&self, owner: &str, name: &str) -> Result<String> {
        let response = self
            .get_raw(&format!("/repos/{}/{}/readme", owner, name))
            .await?;
        let text = response.text().await?;
        Ok(text)
    }
}
