// Project data provider.
// Resolves featured and catalog projects through the cache, single-flighting refreshes.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{MemoryCache, slots};
use crate::error::{FolioError, Result};
use crate::github::RepoSource;

use super::curated::{self, CuratedEntry};
use super::model::{self, NormalizedProject};

/// Upper bound on pinned repositories fetched for the featured view.
const MAX_FEATURED: u32 = 6;

/// Produces the featured and catalog project lists, caching results in memory.
///
/// The cache mutex is held across the whole check-fetch-store sequence, so two
/// concurrent requests observing a stale cache cannot both hit the remote
/// source: the second waits and reads the value the first stored.
pub struct ProjectProvider {
    source: Arc<dyn RepoSource>,
    cache: Mutex<MemoryCache>,
    login: String,
    curated: Vec<CuratedEntry>,
}

impl ProjectProvider {
    pub fn new(source: Arc<dyn RepoSource>, cache: MemoryCache, login: String) -> Self {
        Self::with_curated(source, cache, login, curated::catalog())
    }

    pub fn with_curated(
        source: Arc<dyn RepoSource>,
        cache: MemoryCache,
        login: String,
        curated: Vec<CuratedEntry>,
    ) -> Self {
        Self {
            source,
            cache: Mutex::new(cache),
            login,
            curated,
        }
    }

    /// Projects for the featured view, derived from pinned repositories.
    ///
    /// Falls back to the most-recently-updated public repositories when
    /// nothing is pinned. A missing credential yields an empty list rather
    /// than an error; any other remote failure propagates so callers can tell
    /// "no projects" from "fetch failed".
    pub async fn fetch_featured(&self) -> Result<Vec<NormalizedProject>> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.get::<Vec<NormalizedProject>>(slots::FEATURED) {
            return Ok(cached);
        }

        let pinned = match self
            .source
            .pinned_repositories(&self.login, MAX_FEATURED)
            .await
        {
            Ok(pinned) => pinned,
            Err(FolioError::MissingToken) => {
                tracing::warn!("no GITHUB_TOKEN configured, featured projects unavailable");
                let empty: Vec<NormalizedProject> = Vec::new();
                cache.put(slots::FEATURED, &empty)?;
                return Ok(empty);
            }
            Err(err) => return Err(err),
        };

        let repos = if pinned.is_empty() {
            tracing::info!(login = %self.login, "no pinned repositories, using recent");
            self.source
                .recent_repositories(&self.login, MAX_FEATURED)
                .await?
        } else {
            pinned
        };

        let projects: Vec<NormalizedProject> = repos
            .iter()
            .map(|repo| model::normalize(repo, true, None))
            .collect();
        cache.put(slots::FEATURED, &projects)?;

        tracing::info!(count = projects.len(), "refreshed featured projects");
        Ok(projects)
    }

    /// Projects for the catalog view, resolved from the curated list.
    ///
    /// Names that fail to resolve, and entries whose derived identifier
    /// collides with one already produced, are logged and skipped; the
    /// returned list always has unique identifiers.
    pub async fn fetch_catalog(&self) -> Result<Vec<NormalizedProject>> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.get::<Vec<NormalizedProject>>(slots::CATALOG) {
            return Ok(cached);
        }

        let mut projects = Vec::new();
        let mut seen = HashSet::new();

        for entry in &self.curated {
            let repo = match self.source.repository(&self.login, &entry.name).await {
                Ok(repo) => repo,
                Err(err) => {
                    tracing::warn!(name = %entry.name, %err, "skipping curated repository");
                    continue;
                }
            };

            cache.put(&slots::repo_slot(&entry.name), &repo)?;

            let project = model::normalize(&repo, false, Some(entry.category));
            if !seen.insert(project.id.clone()) {
                tracing::warn!(name = %entry.name, id = %project.id, "duplicate project id, skipping");
                continue;
            }
            projects.push(project);
        }

        cache.put(slots::CATALOG, &projects)?;

        tracing::info!(count = projects.len(), "refreshed catalog projects");
        Ok(projects)
    }

    /// README text for a curated repository, cached per name.
    pub async fn fetch_readme(&self, name: &str) -> Result<String> {
        if !self
            .curated
            .iter()
            .any(|entry| entry.name.eq_ignore_ascii_case(name))
        {
            return Err(FolioError::NotFound(name.to_string()));
        }

        let slot = slots::readme_slot(name);
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.get::<String>(&slot) {
            return Ok(cached);
        }

        let readme = self.source.readme(&self.login, name).await?;
        cache.put(&slot, &readme)?;
        Ok(readme)
    }

    /// Clear every cache slot and reset the staleness clock unconditionally.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.lock().await;
        cache.clear();
        tracing::info!("project cache invalidated");
    }
}
