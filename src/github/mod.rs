// GitHub API module.
// Provides the client, typed responses, and the RepoSource seam used by the provider.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use endpoints::RepoSource;
pub use types::*;
