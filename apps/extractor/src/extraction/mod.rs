// Listing extraction: prompt assembly, the model call, and response sanitizing.
// All model calls go through llm_client::TextGenerator; nothing here talks HTTP upstream.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod sanitizer;
