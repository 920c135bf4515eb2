//! Domain entities, ports, and use-case services.
//!
//! Types here are transport agnostic. Inbound adapters map them to HTTP;
//! outbound adapters implement the ports in [`ports`].

pub mod error;
pub mod insight;
pub mod insight_generator;
pub mod insight_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::insight::{DemandLevel, IndustryInsight, MarketOutlook, SalaryRange};
pub use self::insight_generator::{InsightGenerationError, InsightGenerator, InsightPayload};
pub use self::insight_service::IndustryInsightService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{AuthSubject, Industry, User, UserValidationError};

/// Convenient result alias for domain and adapter code.
pub type ApiResult<T> = Result<T, Error>;
