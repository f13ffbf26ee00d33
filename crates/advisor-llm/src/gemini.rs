//! Gemini Provider
//!
//! Implementation of `LanguageModel` against the Gemini `generateContent`
//! REST endpoint. Answers are post-processed into plain text before they
//! leave this module.

use std::time::Duration;

use advisor_core::{
    LanguageModel,
    error::{AdvisorError, Result},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::markdown;

const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Gemini provider configuration
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// Full `generateContent` endpoint URL
    pub api_url: String,

    /// API key passed as a query parameter
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();

        Self {
            api_url,
            api_key,
            ..Default::default()
        }
    }
}

// Wire types for the generateContent contract.

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

/// Gemini language model client
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create from configuration
    pub fn from_config(config: GeminiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self { http, config }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(GeminiConfig::from_env())
    }

    fn request_body(prompt: &str) -> GenerateRequest<'_> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }

    /// Pull the answer text out of a parsed response
    fn extract_answer(response: GenerateResponse) -> Result<String> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AdvisorError::ModelUnavailable("empty candidate list".into()))
    }

    async fn generate_raw(&self, prompt: &str) -> Result<String> {
        let url = format!("{}?key={}", self.config.api_url, self.config.api_key);
        let body = Self::request_body(prompt);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::ModelUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::ModelUnavailable(format!(
                "HTTP {} from model endpoint",
                status
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::ModelUnavailable(e.to_string()))?;

        Self::extract_answer(parsed)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let raw = self.generate_raw(prompt).await?;
        tracing::debug!(chars = raw.len(), "model answered");
        Ok(markdown::strip(&raw))
    }

    async fn health_check(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
