//! Reqwest-backed Gemini completion adapter.
//!
//! Owns transport details only: request serialisation, timeout and HTTP
//! error mapping, and decoding the response envelope down to completion
//! text. Prompt semantics live in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::ports::{CompletionModel, CompletionModelError};

use super::dto::{GenerateContentRequest, GenerateContentResponse};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: String,
    model: String,
    endpoint: Url,
    timeout: Duration,
}

impl GeminiConfig {
    /// Create a configuration for the given API key with default model,
    /// endpoint, and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        let endpoint = Url::parse(DEFAULT_ENDPOINT)
            .unwrap_or_else(|err| panic!("default Gemini endpoint invalid: {err}"));
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            endpoint,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Completion adapter performing `generateContent` calls against one model.
pub struct GeminiCompletionModel {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl GeminiCompletionModel {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key,
            model: config.model,
            endpoint: config.endpoint,
        })
    }

    fn request_url(&self) -> Result<Url, CompletionModelError> {
        self.endpoint
            .join(&format!("models/{}:generateContent", self.model))
            .map_err(|err| {
                CompletionModelError::api(format!("invalid completion endpoint: {err}"))
            })
    }
}

#[async_trait]
impl CompletionModel for GeminiCompletionModel {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionModelError> {
        let response = self
            .client
            .post(self.request_url()?)
            .header("x-goog-api-key", self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: GenerateContentResponse =
            serde_json::from_slice(body.as_ref()).map_err(|err| {
                CompletionModelError::decode(format!("invalid completion payload: {err}"))
            })?;
        decoded.into_text().map_err(CompletionModelError::decode)
    }
}

fn map_transport_error(error: reqwest::Error) -> CompletionModelError {
    if error.is_timeout() {
        CompletionModelError::timeout(error.to_string())
    } else {
        CompletionModelError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CompletionModelError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => CompletionModelError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CompletionModelError::timeout(message)
        }
        _ if status.is_client_error() => CompletionModelError::api(message),
        _ => CompletionModelError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
