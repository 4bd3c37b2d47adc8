//! Axum route handler for the Extraction API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::models::ListingExtraction;
use crate::extraction::prompts::build_prompt;
use crate::extraction::sanitizer::{sanitize, Extraction};
use crate::llm_client::{LlmError, MODEL};
use crate::state::AppState;

pub const MISSING_PROPERTY_TEXT: &str = "Missing 'propertyText' in request body";

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(rename = "propertyText")]
    pub property_text: Option<String>,
}

impl ExtractRequest {
    /// Reads the request out of a JSON object body. A `propertyText` of the wrong type is a
    /// client error.
    pub fn from_object(body: Map<String, Value>) -> Result<Self, AppError> {
        serde_json::from_value(Value::Object(body))
            .map_err(|e| AppError::Validation(e.to_string()))
    }
}

/// POST /extract
///
/// Sends the listing text to the model and relays its JSON. A model reply that is not JSON
/// comes back as a 200 with `rawText` and `error` set.
pub async fn handle_extract(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Extraction>, AppError> {
    let Json(body) = payload?;
    let request = ExtractRequest::from_object(body)?;

    let property_text = match request.property_text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(AppError::Validation(MISSING_PROPERTY_TEXT.to_string())),
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("extract", %request_id, model = MODEL);

    async move {
        info!(
            "Extracting listing ({} chars)",
            property_text.chars().count()
        );
        let prompt = build_prompt(&property_text);

        let raw = tokio::time::timeout(
            state.config.llm_timeout,
            state.generator.generate(MODEL, &prompt),
        )
        .await
        .map_err(|_| LlmError::Timeout(state.config.llm_timeout))??;

        let extraction = sanitize(raw.trim());
        match &extraction {
            Extraction::Parsed(value) => match ListingExtraction::from_value(value) {
                Ok(listing) => info!(
                    "Extraction parsed: {} property record(s), {} amenities, {} facilities",
                    listing.property_details.len(),
                    listing.propertyamenitiesdetails.len(),
                    listing.propertyfacilitydetails.len()
                ),
                Err(e) => warn!("Extraction parsed but does not match the listing schema: {e}"),
            },
            Extraction::Unparsed { .. } => warn!("Returning raw model output with soft error"),
        }

        Ok::<_, AppError>(Json(extraction))
    }
    .instrument(span)
    .await
}
