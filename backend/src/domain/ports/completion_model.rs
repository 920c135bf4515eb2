//! Driven port for the text-completion model provider.
//!
//! The domain owns the contract: one prompt in, raw completion text out.
//! Adapters deal with vendor transport; tests substitute canned text.

use async_trait::async_trait;

/// Errors surfaced while requesting a completion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionModelError {
    /// Network transport failed before receiving a response.
    #[error("completion transport failed: {message}")]
    Transport { message: String },
    /// The provider call exceeded its timeout.
    #[error("completion timed out: {message}")]
    Timeout { message: String },
    /// The provider rate-limited the request.
    #[error("completion rate limited: {message}")]
    RateLimited { message: String },
    /// The provider rejected the request outright.
    #[error("completion provider rejected request: {message}")]
    Api { message: String },
    /// The provider response envelope could not be decoded.
    #[error("completion response decode failed: {message}")]
    Decode { message: String },
}

impl CompletionModelError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a timeout error with the given message.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a rate-limited error with the given message.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Create a provider-rejection error with the given message.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for submitting one prompt to a text-generation model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Submit the prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionModelError>;
}

/// Fixture model returning a canned insight document.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCompletionModel;

/// Canned completion used by the fixture model and handler tests.
pub const FIXTURE_COMPLETION: &str = r#"{
  "salaryRanges": [
    { "role": "Software Engineer", "min": 70000, "max": 150000, "median": 105000, "location": "Remote" }
  ],
  "growthRate": 6.5,
  "demandLevel": "HIGH",
  "topSkills": ["Rust", "SQL"],
  "marketOutlook": "POSITIVE",
  "keyTrends": ["AI tooling"],
  "recommendedSkills": ["Cloud"]
}"#;

#[async_trait]
impl CompletionModel for FixtureCompletionModel {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionModelError> {
        Ok(FIXTURE_COMPLETION.to_owned())
    }
}
