use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::GatewayError;
use crate::providers::CompletionGateway;

/// Ollama client for interacting with a local Ollama server
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Model name to generate with
    model: String,
    /// Sampling temperature
    temperature: f32,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    stream: bool,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize)]
pub struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    pub done: bool,
}

impl Ollama {
    /// Create a new Ollama client
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        timeout_secs: u64,
    ) -> Self {
        Self {
            base_url: endpoint.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            model: model.into(),
            temperature,
        }
    }

    /// Send a generate request and return the parsed response
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GatewayError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                GatewayError::ConnectionError(format!("Failed to connect to Ollama: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, error_text);

            return Err(GatewayError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response.json::<GenerationResponse>().await.map_err(|e| {
            GatewayError::ParseError(format!("Failed to parse Ollama response: {}", e))
        })
    }
}

#[async_trait]
impl CompletionGateway for Ollama {
    async fn complete(&self, prompt: &str, max_output_tokens: u32) -> Result<String, GatewayError> {
        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            options: Some(GenerationOptions {
                temperature: Some(self.temperature),
                num_predict: Some(max_output_tokens),
            }),
            stream: false,
        };

        let response = self.generate(request).await?;

        if response.response.trim().is_empty() {
            return Err(GatewayError::ParseError(
                "Empty generation received from Ollama".to_string(),
            ));
        }

        Ok(response.response.trim().to_string())
    }

    async fn test_connection(&self) -> Result<(), GatewayError> {
        let url = format!("{}/api/version", self.base_url.trim_end_matches('/'));

        let response = self.client.get(&url).send().await.map_err(|e| {
            GatewayError::ConnectionError(format!("Failed to connect to Ollama: {}", e))
        })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(GatewayError::ApiError {
                status_code: response.status().as_u16(),
                message: "Ollama version probe failed".to_string(),
            })
        }
    }
}
