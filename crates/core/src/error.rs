/// Rejection of a patient record before any scorer runs.
///
/// Age and sex drive brackets in every disease table, so neither can be defaulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("age is required")]
    MissingAge,
    #[error("age must be between 0 and 120, got {age}")]
    AgeOutOfRange { age: i64 },
    #[error("sex is required")]
    MissingSex,
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Invalid engine configuration, raised at start-up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
