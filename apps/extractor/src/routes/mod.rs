pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home_handler))
        .route("/health", get(health::health_handler))
        .route("/extract", post(handlers::handle_extract))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, DEFAULT_GEMINI_API_BASE};
    use crate::extraction::prompts::EXTRACTION_PROMPT;
    use crate::llm_client::{LlmError, TextGenerator, MODEL};

    /// Canned generator that records every call it receives.
    struct StubGenerator {
        reply: Result<String, String>,
        delay: Option<Duration>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                delay: None,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                delay: None,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn stalling(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok("{}".to_string()),
                delay: Some(delay),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, model_id: &str, prompt: &str) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((model_id.to_string(), prompt.to_string()));
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply.clone().map_err(|message| LlmError::Api {
                status: 429,
                message,
            })
        }
    }

    fn test_config(llm_timeout: Duration) -> Config {
        Config {
            google_api_key: "test-key".to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            llm_timeout,
        }
    }

    fn app(generator: Arc<StubGenerator>) -> Router {
        build_router(AppState {
            generator,
            config: test_config(Duration::from_secs(5)),
        })
    }

    fn post_extract(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/extract")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    const LISTING: &str = "2BHK flat in Thane, 68k rent, negotiable";

    #[tokio::test]
    async fn test_home_reports_running() {
        let request = Request::get("/").body(Body::empty()).unwrap();
        let (status, body) = send(app(StubGenerator::replying("{}")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(StubGenerator::replying("{}")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_missing_property_text_is_400_without_model_call() {
        let stub = StubGenerator::replying("{}");
        let (status, body) = send(app(stub.clone()), post_extract("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing 'propertyText' in request body"}));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_and_null_property_text_are_400() {
        for body in [r#"{"propertyText": ""}"#, r#"{"propertyText": null}"#] {
            let stub = StubGenerator::replying("{}");
            let (status, _) = send(app(stub.clone()), post_extract(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(stub.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_400_with_error_field() {
        let stub = StubGenerator::replying("{}");
        let (status, body) = send(app(stub.clone()), post_extract("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_object_bodies_are_400_without_model_call() {
        for body in [r#"["hello"]"#, r#""hello""#, "42", r#"{"propertyText": 5}"#] {
            let stub = StubGenerator::replying("{\"a\":1}");
            let (status, response) = send(app(stub.clone()), post_extract(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert!(response["error"].is_string(), "body: {body}");
            assert_eq!(stub.call_count(), 0, "body: {body}");
        }
    }

    #[tokio::test]
    async fn test_fenced_model_output_is_relayed_exactly() {
        let document = json!({
            "propertyDetails": [{
                "propertytype": "Office Space",
                "listingtype": "Lease",
                "price": 68000,
                "city": "Thane",
                "negotiable": "Yes",
                "floor": "Not Mentioned"
            }],
            "propertyamenitiesdetails": [],
            "propertyfacilitydetails": []
        });
        let reply = format!("```json\n{}\n```", serde_json::to_string_pretty(&document).unwrap());
        let stub = StubGenerator::replying(&reply);

        let request_body = json!({ "propertyText": LISTING }).to_string();
        let (status, body) = send(app(stub.clone()), post_extract(&request_body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, document);

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, MODEL);
        assert_eq!(calls[0].1, format!("{EXTRACTION_PROMPT}\n\n{LISTING}"));
    }

    #[tokio::test]
    async fn test_multibyte_listing_is_forwarded_verbatim() {
        let listing = "Office in Bandra, ₹68k rent, नेगोशिएबल";
        let stub = StubGenerator::replying("{\"a\":1}");
        let request_body = json!({ "propertyText": listing }).to_string();
        let (status, body) = send(app(stub.clone()), post_extract(&request_body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"a": 1}));
        assert!(stub.calls.lock().unwrap()[0].1.ends_with(listing));
    }

    #[tokio::test]
    async fn test_unparseable_model_output_is_200_with_soft_error() {
        let stub = StubGenerator::replying("  not json at all\n");
        let request_body = json!({ "propertyText": LISTING }).to_string();
        let (status, body) = send(app(stub), post_extract(&request_body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "rawText": "not json at all",
                "error": "Invalid JSON format returned by model"
            })
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_with_description() {
        let stub = StubGenerator::failing("Resource has been exhausted (e.g. check quota).");
        let request_body = json!({ "propertyText": LISTING }).to_string();
        let (status, body) = send(app(stub), post_extract(&request_body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Resource has been exhausted"));
        assert!(body.get("rawText").is_none());
    }

    #[tokio::test]
    async fn test_model_timeout_is_500() {
        let router = build_router(AppState {
            generator: StubGenerator::stalling(Duration::from_secs(30)),
            config: test_config(Duration::from_millis(20)),
        });
        let request_body = json!({ "propertyText": LISTING }).to_string();
        let (status, body) = send(router, post_extract(&request_body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("timed out"));
    }
}
