// HTTP routes.
// Thin axum handlers over the project provider; all logic lives in the provider.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::FolioError;
use crate::projects::{NormalizedProject, ProjectProvider};

/// Build the API router.
pub fn router(provider: Arc<ProjectProvider>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/featured", get(featured))
        .route("/api/projects", get(catalog))
        .route("/api/projects/:name/readme", get(readme))
        .route("/api/cache/clear", post(clear_cache))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(provider)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn featured(
    State(provider): State<Arc<ProjectProvider>>,
) -> Result<Json<Vec<NormalizedProject>>, FolioError> {
    let projects = provider.fetch_featured().await?;
    Ok(Json(projects))
}

async fn catalog(
    State(provider): State<Arc<ProjectProvider>>,
) -> Result<Json<Vec<NormalizedProject>>, FolioError> {
    let projects = provider.fetch_catalog().await?;
    Ok(Json(projects))
}

async fn readme(
    State(provider): State<Arc<ProjectProvider>>,
    Path(name): Path<String>,
) -> Result<String, FolioError> {
    provider.fetch_readme(&name).await
}

async fn clear_cache(
    State(provider): State<Arc<ProjectProvider>>,
) -> Json<serde_json::Value> {
    provider.invalidate().await;
    Json(json!({ "success": true, "message": "project cache cleared" }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::cache::MemoryCache;
    use crate::cache::store::testing::ManualClock;
    use crate::github::endpoints::testing::{MockSource, make_repo};
    use crate::projects::model::Category;
    use crate::projects::curated::CuratedEntry;

    use super::*;

    fn test_router() -> Router {
        let mut source = MockSource::with_token();
        source.pinned = vec![make_repo("octocat", "orbit-sim", &["physics"])];
        source.add_repo(make_repo("octocat", "ColorCoded", &["web"]));

        let cache = MemoryCache::new(Duration::from_secs(60), Arc::new(ManualClock::new()));
        let curated = vec![CuratedEntry::new("ColorCoded", Category::Web)];
        let provider = ProjectProvider::with_curated(
            Arc::new(source),
            cache,
            "octocat".to_string(),
            curated,
        );
        router(Arc::new(provider))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_featured_route_returns_projects() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/featured")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json[0]["featured"], true);
        assert_eq!(json[0]["category"], "Physics");
    }

    #[tokio::test]
    async fn test_projects_route_returns_catalog() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/projects")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["complexity"], "Intermediate");
    }

    #[tokio::test]
    async fn test_cache_clear_route() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/cache/clear")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn test_unknown_readme_is_404() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/projects/unknown/readme")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = test_router();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
