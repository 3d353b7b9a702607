/*!
 * Completion gateway implementations.
 *
 * This module contains client implementations for the text-completion
 * services used to translate paragraphs:
 * - Anthropic: Anthropic messages API
 * - Ollama: Local LLM server
 * - Mock: Scripted gateway for deterministic tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::GatewayError;

/// Common trait for all completion gateways
///
/// A gateway turns a prompt into generated text. Workers treat every failure
/// identically (retry after a fixed delay), so the contract is deliberately
/// narrow: one completion call and one connectivity probe.
#[async_trait]
pub trait CompletionGateway: Send + Sync + Debug {
    /// Complete a prompt and return the generated text
    ///
    /// # Arguments
    /// * `prompt` - The full prompt to send
    /// * `max_output_tokens` - Upper bound on generated tokens
    ///
    /// # Returns
    /// * `Result<String, GatewayError>` - The generated text or an error
    async fn complete(&self, prompt: &str, max_output_tokens: u32) -> Result<String, GatewayError>;

    /// Test the connection to the gateway
    ///
    /// Called once at startup so that a missing or invalid credential
    /// surfaces before any worker is spawned.
    async fn test_connection(&self) -> Result<(), GatewayError>;
}

/// Create the gateway for the active provider in the configuration
pub fn create_gateway(config: &TranslationConfig) -> Arc<dyn CompletionGateway> {
    match config.provider {
        TranslationProvider::Anthropic => Arc::new(anthropic::Anthropic::new(
            config.get_api_key(),
            config.get_endpoint(),
            config.get_model(),
            config.common.temperature,
            config.get_timeout_secs(),
        )),
        TranslationProvider::Ollama => Arc::new(ollama::Ollama::new(
            config.get_endpoint(),
            config.get_model(),
            config.common.temperature,
            config.get_timeout_secs(),
        )),
    }
}

pub mod anthropic;
pub mod mock;
pub mod ollama;
