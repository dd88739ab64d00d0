//! Tonika Web Server
//!
//! Axum-based HTTP surface for single-text and spreadsheet sentiment analysis.

pub mod routes;
pub mod state;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use tonika_core::config::{CorsSettings, ServerSettings};
use tonika_core::{SentimentAnalyzer, Settings};

use state::AppState;

/// Build the CORS layer from configuration.
///
/// Any-origin never carries credentials; credentials require an explicit
/// origin list.
pub fn cors_layer(cors: &CorsSettings) -> anyhow::Result<CorsLayer> {
    if cors.allows_any_origin() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let layer = CorsLayer::new().allow_origin(AllowOrigin::list(origins));
    if cors.allow_credentials {
        Ok(layer
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request()))
    } else {
        Ok(layer.allow_methods(Any).allow_headers(Any))
    }
}

/// Create the application router.
pub fn create_router(state: AppState, server: &ServerSettings) -> anyhow::Result<Router> {
    let cors = cors_layer(&server.cors)?;

    let router = Router::new()
        .route("/analyze/", post(routes::analyze::analyze_text))
        .route("/analyze", post(routes::analyze::analyze_text))
        .route("/analyze-file/", post(routes::batch::analyze_file))
        .route("/analyze-file", post(routes::batch::analyze_file))
        .route("/health", get(routes::health::health))
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(router)
}

/// Run the web server.
pub async fn run_server(settings: &Settings, analyzer: SentimentAnalyzer) -> anyhow::Result<()> {
    let state = AppState::new(analyzer);
    let app = create_router(state, &settings.server)?;

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("Web server listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    use tonika_core::fixtures::{xlsx_bytes, xlsx_bytes_with_dates};
    use tonika_core::{CoreError, CoreResult, Prediction, SanitizePolicy, SentimentClassifier};

    const BOUNDARY: &str = "tonika-test-boundary";

    /// Answers "good" for texts containing "great", "bad" otherwise.
    #[derive(Default)]
    struct StubClassifier {
        calls: AtomicUsize,
        broken: bool,
    }

    #[async_trait]
    impl SentimentClassifier for StubClassifier {
        async fn classify(&self, text: &str) -> CoreResult<Prediction> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.broken {
                return Err(CoreError::inference("model server unreachable"));
            }
            let label = if text.contains("great") { "LABEL_2" } else { "LABEL_0" };
            Ok(Prediction {
                label: label.to_string(),
                score: 0.9,
            })
        }

        fn model_id(&self) -> &str {
            "stub/model"
        }
    }

    fn app_with(classifier: Arc<StubClassifier>, server: ServerSettings) -> Router {
        let analyzer = SentimentAnalyzer::new(classifier, SanitizePolicy::default());
        create_router(AppState::new(analyzer), &server).unwrap()
    }

    fn app(classifier: Arc<StubClassifier>) -> Router {
        app_with(classifier, ServerSettings::default())
    }

    fn upload(uri: &str, field: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"file.xlsx\"\r\nContent-Type: application/vnd.openxmlformats-officedocument.spreadsheetml.sheet\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn analyze(text: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/analyze/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "text": text }).to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_text() {
        let response = app(Arc::default()).oneshot(analyze("this is great")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"sentiment": "good", "confidence": 0.9})
        );
    }

    #[tokio::test]
    async fn test_analyze_text_inference_failure_is_server_error() {
        let classifier = Arc::new(StubClassifier {
            broken: true,
            ..Default::default()
        });
        let response = app(classifier).oneshot(analyze("anything")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_analyze_file_scores_rows_in_order() {
        let bytes = xlsx_bytes(
            &["UserSenderId", "SubmitDate", "MessageText"],
            &[
                &["1", "2024-01-15 10:00:00", "<b>great</b>"],
                &["2", "2024-01-16 11:00:00", "meh"],
                &["3", "2024-02-01 12:00:00", "great stuff"],
            ],
        );
        let response = app(Arc::default())
            .oneshot(upload("/analyze-file/", "file", &bytes))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["UserSenderId"], json!(1));
        assert_eq!(rows[0]["MessageText"], json!("<b>great</b>"));
        assert_eq!(rows[0]["sentiment"], json!("good"));
        assert_eq!(rows[1]["sentiment"], json!("bad"));
        assert_eq!(rows[2]["SubmitDate"], json!("2024-02-01 12:00:00"));
        let keys: Vec<&String> = rows[0].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 5);
    }

    #[tokio::test]
    async fn test_date_typed_submit_date_is_iso_string() {
        let bytes = xlsx_bytes_with_dates(
            &["UserSenderId", "SubmitDate", "MessageText"],
            &[&["5", "45366.4375", "great"]],
            &[1],
        );
        let response = app(Arc::default())
            .oneshot(upload("/analyze-file/", "file", &bytes))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await[0]["SubmitDate"], json!("2024-03-15T10:30:00"));
    }

    #[tokio::test]
    async fn test_missing_column_is_error_payload() {
        let classifier = Arc::new(StubClassifier::default());
        let bytes = xlsx_bytes(&["UserSenderId", "SubmitDate", "Text"], &[&["1", "x", "great"]]);
        let response = app(classifier.clone())
            .oneshot(upload("/analyze-file/", "file", &bytes))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"error": "File must contain column 'MessageText'"})
        );
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unreadable_workbook_is_bad_request() {
        let response = app(Arc::default())
            .oneshot(upload("/analyze-file/", "file", b"not a spreadsheet"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_under_other_field_name() {
        let bytes = xlsx_bytes(
            &["MessageText", "UserSenderId", "SubmitDate"],
            &[&["great", "7", "2024-03-03"]],
        );
        let response = app(Arc::default())
            .oneshot(upload("/analyze-file", "spreadsheet", &bytes))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await[0]["sentiment"], json!("good"));
    }

    #[tokio::test]
    async fn test_batch_inference_failure_is_server_error() {
        let classifier = Arc::new(StubClassifier {
            broken: true,
            ..Default::default()
        });
        let bytes = xlsx_bytes(
            &["MessageText", "UserSenderId", "SubmitDate"],
            &[&["great", "7", "2024-03-03"], &["fine", "8", "2024-03-04"]],
        );
        let response = app(classifier.clone())
            .oneshot(upload("/analyze-file/", "file", &bytes))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected() {
        let server = ServerSettings {
            max_upload_bytes: 128,
            ..ServerSettings::default()
        };
        let bytes = vec![b'x'; 4096];
        let response = app_with(Arc::default(), server)
            .oneshot(upload("/analyze-file/", "file", &bytes))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(Arc::default()).oneshot(request).await.unwrap();
        assert_eq!(
            json_body(response).await,
            json!({"status": "ok", "model": "stub/model"})
        );
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/analyze/")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_default_cors_is_any_origin_without_credentials() {
        let response = app(Arc::default())
            .oneshot(preflight("http://anywhere.test"))
            .await
            .unwrap();
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }

    #[tokio::test]
    async fn test_cors_origin_list_with_credentials() {
        let server = ServerSettings {
            cors: CorsSettings {
                allowed_origins: vec!["http://localhost:8501".to_string()],
                allow_credentials: true,
            },
            ..ServerSettings::default()
        };
        let router = app_with(Arc::default(), server);

        let allowed = router.clone().oneshot(preflight("http://localhost:8501")).await.unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:8501"
        );
        assert_eq!(allowed.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

        let denied = router.oneshot(preflight("http://evil.test")).await.unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn test_invalid_cors_origin() {
        let cors = CorsSettings {
            allowed_origins: vec!["bad\norigin".to_string()],
            allow_credentials: false,
        };
        assert!(cors_layer(&cors).is_err());
    }
}
