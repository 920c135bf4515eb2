//! Driven port for the external authentication provider.
//!
//! Session establishment exchanges a provider-issued token for the stable
//! subject it names. Verification itself belongs to the provider; this port
//! only carries the result.

use async_trait::async_trait;

use crate::domain::AuthSubject;

/// Errors surfaced while verifying an identity token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityVerifierError {
    /// Network transport failed before receiving a response.
    #[error("identity verification transport failed: {message}")]
    Transport { message: String },
    /// The provider call exceeded its timeout.
    #[error("identity verification timed out: {message}")]
    Timeout { message: String },
    /// The provider rejected the token.
    #[error("identity token rejected: {message}")]
    Rejected { message: String },
    /// The provider response could not be decoded.
    #[error("identity verification decode failed: {message}")]
    Decode { message: String },
}

impl IdentityVerifierError {
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

    /// Create a rejection error with the given message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
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

/// Port for verifying provider-issued identity tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `token` and return the subject it names.
    async fn verify(&self, token: &str) -> Result<AuthSubject, IdentityVerifierError>;
}

/// Fixture verifier treating any well-formed token as its own subject.
///
/// Development and test convenience only; the token chooses the subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureIdentityVerifier;

#[async_trait]
impl IdentityVerifier for FixtureIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<AuthSubject, IdentityVerifierError> {
        AuthSubject::new(token).map_err(|err| IdentityVerifierError::rejected(err.to_string()))
    }
}
