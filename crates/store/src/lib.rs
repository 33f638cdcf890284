//! MetaRisk assessment storage
//!
//! Persists engine output verbatim, keyed by a canonical [`RecordId`]. The engine itself never
//! touches the filesystem; this crate is the collaborator the adapters hand results to.
//!
//! ## Layout
//!
//! ```text
//! <data_dir>/
//! └── assessments/
//!     └── 55/0e/550e8400e29b41d4a716446655440000/
//!         ├── assessment.json
//!         └── guides/
//!             └── <guide_id>.json
//! ```
//!
//! Each assessment owns its directory, so concurrent writes for different ids never touch the
//! same file. Stored records are immutable; a guide is an additional file next to its
//! assessment.
//!
//! ## Example Usage
//!
//! ```no_run
//! use metarisk_core::{assess, RawPatientInput, Sex};
//! use metarisk_store::FileAssessmentStore;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileAssessmentStore::open(Path::new("assessment_data"))?;
//! let result = assess(&RawPatientInput::new(52, Sex::Female))?;
//! let stored = store.save(result, None)?;
//! let guide = store.create_guide(&stored.assessment_id)?;
//! # Ok(())
//! # }
//! ```

mod model;
mod store;

pub use metarisk_types::CustomerId;
pub use metarisk_uuid::RecordId;
pub use model::{AssessmentPage, HealthGuide, StoredAssessment, HEALTH_GUIDE_TEMPLATE};
pub use store::{FileAssessmentStore, ASSESSMENTS_DIR_NAME, DEFAULT_PAGE_LIMIT};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Data directory is missing or not a directory.
    #[error("Invalid data directory: {0}")]
    InvalidDataDir(String),

    #[error("Assessment not found: {0}")]
    NotFound(RecordId),

    #[error("Invalid id: {0}")]
    InvalidId(#[from] metarisk_uuid::UuidError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Serialization(serde_json::Error),

    /// A stored file does not match the record schema.
    #[error("{file}: schema mismatch at {field}: {message}")]
    Deserialization {
        file: String,
        field: String,
        message: String,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
