use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Response body for a healthy instance
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Response body when the data store is unreachable
#[derive(Serialize, Deserialize)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// GET /health - operational probe.
///
/// Runs a lightweight `SELECT 1` against the store. Returns 200 when the
/// store is reachable, 503 otherwise. This is the one endpoint that reports
/// storage faults instead of soft-failing, since it exists for operators
/// rather than visitors.
pub async fn health(state: &AppState) -> Result<Response, AppError> {
    match state.store.health_check().await {
        Ok(()) => {
            tracing::debug!("Health check passed");
            Ok((
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                }),
            )
                .into_response())
        }
        Err(e) => {
            tracing::error!("Health check failed: {e:#}");
            Ok((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: format!("Cannot connect to database: {e}"),
                }),
            )
                .into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::routes;
    use crate::store::SpannerStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        // Requires the emulator; skips when it is not running.
        unsafe {
            std::env::set_var("SPANNER_EMULATOR_HOST", "localhost:9010");
        }

        let config = Config {
            app_url: "http://localhost".to_string(),
            debug: false,
            spanner_emulator_host: Some("localhost:9010".to_string()),
            spanner_project: "test-project".to_string(),
            spanner_instance: "health-endpoint-test".to_string(),
            spanner_database: "health-endpoint-test-db".to_string(),
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
        };

        let store_result = SpannerStore::from_config(&config).await;

        unsafe {
            std::env::remove_var("SPANNER_EMULATOR_HOST");
        }

        let Ok(store) = store_result else {
            println!("Health endpoint test skipped (emulator may not be running)");
            return;
        };

        let state = crate::state::AppState::new(config, routes::route_table(), store);
        let app = routes::app(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let response_json: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response_json.status, "healthy");
    }
}
