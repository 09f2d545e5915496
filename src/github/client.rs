// GitHub API HTTP client.
// Handles authentication, rate limit detection, and request/response processing.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{FolioError, Result};

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client.
///
/// The token is optional: REST lookups on public repositories work without
/// one, but the pinned-repository GraphQL query does not and reports
/// [`FolioError::MissingToken`] instead.
pub struct GitHubClient {
    client: Client,
    has_token: bool,
}

impl GitHubClient {
    /// Create a new GitHub client, authenticated when a token is given.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| FolioError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("folio-api"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(FolioError::Api)?;

        Ok(Self {
            client,
            has_token: token.is_some(),
        })
    }

    /// Whether a bearer token was configured.
    pub fn has_token(&self) -> bool {
        self.has_token
    }

    /// Make a GET request to the GitHub REST API.
    pub(crate) async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", GITHUB_API_BASE, endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FolioError::Api)?;

        check_response(response).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", GITHUB_API_BASE, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(FolioError::Api)?;

        check_response(response).await
    }

    /// Make a GET request asking for the raw media type (README bodies).
    pub(crate) async fn get_raw(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", GITHUB_API_BASE, endpoint);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github.raw+json")
            .send()
            .await
            .map_err(FolioError::Api)?;

        check_response(response).await
    }

    /// Run a GraphQL query and deserialize the `data` payload.
    ///
    /// GraphQL requires authentication; callers decide how to soften a
    /// missing token.
    pub(crate) async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        if !self.has_token {
            return Err(FolioError::MissingToken);
        }

        let response = self
            .client
            .post(GITHUB_GRAPHQL_URL)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(FolioError::Api)?;

        let response = check_response(response).await?;
        let envelope: super::types::GraphQlResponse<T> = response.json().await?;
        envelope
            .data
            .ok_or_else(|| FolioError::Other("GraphQL response had no data".to_string()))
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
        StatusCode::UNAUTHORIZED => Err(FolioError::Unauthorized),
        StatusCode::NOT_FOUND => {
            let url = response.url().to_string();
            Err(FolioError::NotFound(url))
        }
        StatusCode::FORBIDDEN => {
            // 403 with an exhausted quota is a rate limit, not a permission problem.
            if rate_limit_remaining(&response) == Some(0) {
                let reset_at = rate_limit_reset(&response)
                    .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(FolioError::RateLimited { reset_at })
            } else {
                Err(FolioError::Other(format!(
                    "Forbidden: {}",
                    response.text().await.unwrap_or_default()
                )))
            }
        }
        status => Err(FolioError::Other(format!(
            "HTTP {}: {}",
            status,
            response.text().await.unwrap_or_default()
        ))),
    }
}

fn rate_limit_remaining(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

fn rate_limit_reset(response: &Response) -> Option<i64> {
    response
        .headers()
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_token() {
        let client = GitHubClient::new(None).unwrap();
        assert!(!client.has_token());
    }

    #[test]
    fn test_client_with_token() {
        let client = GitHubClient::new(Some("ghp_example")).unwrap();
        assert!(client.has_token());
    }
}
