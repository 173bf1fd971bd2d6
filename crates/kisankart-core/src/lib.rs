//! Cross-cutting plumbing shared by KisanKart services.
//!
//! Health handlers, tracing setup, request-id middleware, the gateway
//! identity extractor, and serde helpers.

pub mod health;
pub mod identity;
pub mod middleware;
pub mod serde;
pub mod tracing;
