//! Outbound adapters implementing the domain ports.

pub mod identity;
pub mod model;
pub mod persistence;
