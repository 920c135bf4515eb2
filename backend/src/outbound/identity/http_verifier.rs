//! Reqwest-backed identity verification adapter.
//!
//! Posts the provider-issued token to the configured verification endpoint
//! and reads back the subject it names. Rejections stay rejections; every
//! other failure maps to a transport-shaped error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::AuthSubject;
use crate::domain::ports::{IdentityVerifier, IdentityVerifierError};

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    sub: String,
}

/// Identity verifier calling the provider's verification endpoint.
pub struct HttpIdentityVerifier {
    client: Client,
    endpoint: Url,
}

impl HttpIdentityVerifier {
    /// Build a verifier with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityVerifierError {
    if error.is_timeout() {
        IdentityVerifierError::timeout(error.to_string())
    } else {
        IdentityVerifierError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> IdentityVerifierError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            IdentityVerifierError::rejected(format!("status {}", status.as_u16()))
        }
        _ => IdentityVerifierError::transport(format!("status {}", status.as_u16())),
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<AuthSubject, IdentityVerifierError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&VerifyRequest { token })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }

        let decoded: VerifyResponse = response.json().await.map_err(|err| {
            IdentityVerifierError::decode(format!("invalid verification payload: {err}"))
        })?;
        AuthSubject::new(decoded.sub).map_err(|err| {
            IdentityVerifierError::decode(format!("provider returned invalid subject: {err}"))
        })
    }
}
