//! # API Shared
//!
//! Shared wire types and services for the LexCase APIs.
//!
//! Contains:
//! - Request/response bodies with their OpenAPI schemas (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and by anything that needs to speak its JSON.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
