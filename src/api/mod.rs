//! REST API layer: route handlers, DTOs, and router composition.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;

use crate::app_state::AppState;
use crate::error::GatewayError;

/// Builds the complete API router with all REST endpoints.
///
/// Unmatched routes answer with the JSON `NotFound` envelope. With the
/// `swagger-ui` feature the interactive docs are served at `/swagger-ui`.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .merge(handlers::routes())
        .fallback(not_found);

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}

async fn not_found() -> GatewayError {
    GatewayError::NotFound("Not Found".to_string())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use chrono::{TimeDelta, Utc};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::Platform;
    use crate::persistence::SummonerStore;
    use crate::persistence::memory::tests::sample_aggregate;
    use crate::service::SummonerService;
    use crate::service::summoner_service::tests::{RecordingStore, StubSource};
    use crate::upstream::SummonerSource;

    fn app(store: &Arc<RecordingStore>, source: &Arc<StubSource>) -> Router {
        let service = SummonerService::new(
            Arc::clone(store) as Arc<dyn SummonerStore>,
            Arc::clone(source) as Arc<dyn SummonerSource>,
        );
        build_router().with_state(AppState {
            summoner_service: Arc::new(service),
        })
    }

    async fn get(app: Router, uri: &str) -> Response<Body> {
        let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        let Ok(response) = app.oneshot(request).await;
        response
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        let Ok(json) = serde_json::from_slice(&bytes) else {
            panic!("JSON body");
        };
        json
    }

    fn x_cache(response: &Response<Body>) -> Option<&str> {
        response
            .headers()
            .get("x-cache")
            .and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn cold_then_warm_lookup() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::default());

        let first = get(app(&store, &source), "/summoners/euw1/playerX").await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(x_cache(&first), Some("miss"));
        let json = body_json(first).await;
        assert_eq!(json["summoner"]["name"], "playerX");
        assert_eq!(json["summoner"]["region"], "euw1");
        assert_eq!(json["summoner"]["rank"]["ranked_solo"]["tier"], "PLATINUM");
        assert!(json["summoner"]["last_updated"].is_string());

        let second = get(app(&store, &source), "/summoners/euw1/playerX").await;
        assert_eq!(x_cache(&second), Some("hit"));
        assert_eq!(source.call_count(), 1);
        assert_eq!(store.puts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_bypasses_cache() {
        let store = Arc::new(RecordingStore::default());
        store
            .inner
            .seed(
                sample_aggregate("playerX", Platform::Euw1),
                Utc::now() - TimeDelta::days(1),
            )
            .await;
        let source = Arc::new(StubSource::default());

        let response = get(app(&store, &source), "/summoners/euw1/playerX/update").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(x_cache(&response), Some("miss"));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn cleared_matches_serialize_as_null() {
        let store = Arc::new(RecordingStore::default());
        let mut aggregate = sample_aggregate("veteran", Platform::Kr);
        aggregate.matches = None;
        store.inner.seed(aggregate, Utc::now()).await;
        let source = Arc::new(StubSource::default());

        let response = get(app(&store, &source), "/summoners/kr/veteran").await;
        assert_eq!(x_cache(&response), Some("hit"));
        let json = body_json(response).await;
        assert!(json["summoner"]["matches"].is_null());
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_region_is_rejected_before_fetching() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::default());

        let response = get(app(&store, &source), "/summoners/mars1/playerX").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["status"], 400);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn upstream_failure_keeps_upstream_status() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource {
            failure: Some(GatewayError::upstream(404, "Data not found - summoner not found")),
            ..StubSource::default()
        });

        let response = get(app(&store, &source), "/summoners/na1/nobody").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Data not found - summoner not found");
        assert_eq!(json["error"]["status"], 404);
        assert!(store.inner.is_empty().await);
    }

    #[tokio::test]
    async fn failed_write_through_is_flagged_in_header() {
        let store = Arc::new(RecordingStore {
            fail_puts: true,
            ..RecordingStore::default()
        });
        let source = Arc::new(StubSource::default());

        let response = get(app(&store, &source), "/summoners/na1/playerX").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(x_cache(&response), Some("miss-unsaved"));
    }

    #[tokio::test]
    async fn unmatched_route_is_json_not_found() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::default());

        let response = get(app(&store, &source), "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Not Found");
    }

    #[tokio::test]
    async fn health_reports_backend() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::default());

        let response = get(app(&store, &source), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["persistence"], "recording");
    }

    #[tokio::test]
    async fn regions_lists_every_platform() {
        let store = Arc::new(RecordingStore::default());
        let source = Arc::new(StubSource::default());

        let response = get(app(&store, &source), "/config/regions").await;
        let json = body_json(response).await;
        let Some(rows) = json.as_array() else {
            panic!("array body");
        };
        assert_eq!(rows.len(), Platform::ALL.len());
        assert!(
            rows.iter()
                .any(|r| r["platform"] == "kr" && r["routing_region"] == "asia")
        );
    }

    #[test]
    fn openapi_lists_summoner_paths() {
        use utoipa::OpenApi;
        let doc = openapi::ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/summoners/{region}/{name}"));
        assert!(
            doc.paths
                .paths
                .contains_key("/summoners/{region}/{name}/update")
        );
    }
}
