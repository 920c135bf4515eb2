//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{IdentityVerifier, IndustryInsightsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub insights: Arc<dyn IndustryInsightsQuery>,
    pub identity: Arc<dyn IdentityVerifier>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(
        insights: Arc<dyn IndustryInsightsQuery>,
        identity: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self { insights, identity }
    }
}
