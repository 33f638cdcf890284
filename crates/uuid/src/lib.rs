//! Record identifiers and sharded-path utilities.
//!
//! Stored assessments and health guides are keyed by a *canonical* UUID: **32 lowercase
//! hexadecimal characters** (no hyphens), the same value `Uuid::new_v4().simple()` produces.
//!
//! Externally supplied ids (path parameters, CLI arguments) must already be canonical;
//! [`RecordId::parse`] rejects uppercase, hyphenated, short or non-hex input instead of
//! normalising it, so one record can never be reachable under two spellings.
//!
//! ## Sharded directory layout
//! For a canonical id `u`, data lives under `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`, e.g.
//! `assessment_data/assessments/55/0e/550e8400e29b41d4a716446655440000/`.

mod id;

pub use id::{RecordId, Uuid};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UuidError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type UuidResult<T> = Result<T, UuidError>;
