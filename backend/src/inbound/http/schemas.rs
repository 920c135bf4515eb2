//! Shared OpenAPI schema components.

use serde::Serialize;
use utoipa::ToSchema;

/// Error payload shape returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    pub code: String,
    /// Human-readable message.
    #[schema(example = "no user registered for subject")]
    pub message: String,
    /// Trace identifier for log correlation.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub trace_id: Option<String>,
}
