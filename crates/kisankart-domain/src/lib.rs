//! Domain types shared across KisanKart services.
//!
//! Pure types only — serde is the sole dependency.

pub mod contact;
pub mod order;
pub mod pagination;
pub mod user;
