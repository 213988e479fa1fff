//! External interpretation providers.
//!
//! A provider takes a natural-language instruction plus a response schema
//! and returns JSON text that should match the schema. It does not parse
//! or cache anything; that is the [`Interpreter`](crate::Interpreter)'s job.

pub mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProviderResult;

/// One request to an interpretation provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// The instruction text.
    pub prompt: String,
    /// The schema the JSON reply must follow.
    pub schema: Value,
}

/// A generative model that answers with structured JSON.
#[async_trait]
pub trait InterpretationProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Send one request and return the reply text.
    async fn generate(&self, request: &ProviderRequest) -> ProviderResult<String>;
}
