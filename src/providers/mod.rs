/*!
 * Provider implementations for the text generation service.
 *
 * - `ollama`: HTTP client for Ollama's `/api/generate` endpoint
 * - `mock`: scripted provider used by the test suite
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for text generation backends
///
/// The pipeline stages only ever see this trait, which keeps prompt handling
/// and response decoding testable without a network.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Generate text for a prompt with the given model
    ///
    /// # Arguments
    /// * `model` - Model name
    /// * `prompt` - Fully rendered prompt
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw generated text, uninterpreted
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;
}

pub mod ollama;
pub mod mock;
