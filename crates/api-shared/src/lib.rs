//! # API Shared
//!
//! Wire types and small services shared by the MetaRisk adapters.
//!
//! Contains:
//! - Request/response bodies with OpenAPI schemas (`wire` module)
//! - `HealthService`
//!
//! Engine and store types are carried inside the bodies unchanged; this crate only adds the
//! envelope around them.

pub mod health;
pub mod wire;

pub use health::{HealthRes, HealthService};
pub use wire::*;
