//! PostgreSQL persistence adapters built on Diesel.

mod diesel_insight_repository;
mod diesel_user_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_insight_repository::DieselInsightRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
