use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every extraction is independent.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. `GeminiClient` in production, a stub in tests.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}
