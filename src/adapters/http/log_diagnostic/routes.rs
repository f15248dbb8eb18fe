//! HTTP routes for the log endpoint.

use axum::{
    routing::{get, post},
    Router,
};
use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::handlers::{health, log_diagnostic, method_not_allowed, preflight, LogEndpointState};

/// Creates the router serving `endpoint` and `/health`.
pub fn log_diagnostic_router(endpoint: &str, state: LogEndpointState, cors: CorsLayer) -> Router {
    Router::new()
        .route(
            endpoint,
            post(log_diagnostic)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// CORS for the log endpoint. An empty list or `*` allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::log_diagnostic::{ErrorResponse, LogDiagnosticResponse};
    use crate::domain::diagnostic::DiagnosticConfig;
    use crate::domain::foundation::LogEntryId;
    use axum::body::{to_bytes, Body};
    use http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::json;
    use tower::ServiceExt;

    const ENDPOINT: &str = "/api/log-diagnostic";

    fn app() -> Router {
        log_diagnostic_router(
            ENDPOINT,
            LogEndpointState::new(&DiagnosticConfig::standard()),
            cors_layer(&[]),
        )
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "timestamp": "2024-01-15T10:30:00.000Z",
            "answers": {
                "service_connection": 2,
                "denial_handling": 1,
                "pathway": 2,
                "severity": 1,
                "secondaries": 2
            },
            "score": 8,
            "recommendation": "REVIEW_STRONGLY_RECOMMENDED"
        })
    }

    async fn post_raw(body: impl Into<Body>) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(ENDPOINT)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_payload() {
        let response = post_raw(valid_body().to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: LogDiagnosticResponse = read_json(response).await;
        assert!(body.success);
        assert!(LogEntryId::parse(body.id).is_ok());
        assert!(!body.note.is_empty());
    }

    #[tokio::test]
    async fn rejects_missing_answer_with_message() {
        let mut payload = valid_body();
        payload["answers"].as_object_mut().unwrap().remove("pathway");

        let response = post_raw(payload.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Invalid payload: Missing answer for pathway");
    }

    #[tokio::test]
    async fn rejects_score_out_of_range() {
        let mut payload = valid_body();
        payload["score"] = json!(12);

        let response = post_raw(payload.to_string()).await;
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Invalid payload: Score must be between 0 and 10");
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let response = post_raw("{not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Invalid payload: Malformed JSON");
    }

    #[tokio::test]
    async fn rejects_empty_body() {
        let response = post_raw(Body::empty()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Invalid payload: Request body is empty");
    }

    #[tokio::test]
    async fn get_is_method_not_allowed() {
        let response = app()
            .oneshot(Request::builder().uri(ENDPOINT).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Method not allowed");
    }

    #[tokio::test]
    async fn bare_options_is_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(ENDPOINT)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cross_origin_post_gets_allow_origin_header() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(ENDPOINT)
                    .header(header::ORIGIN, "https://example.org")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(valid_body().to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }
}
