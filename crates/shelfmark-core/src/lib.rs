//! Ambient service plumbing shared by Shelfmark services: tracing setup,
//! health endpoints, serde helpers, and request-id middleware.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
