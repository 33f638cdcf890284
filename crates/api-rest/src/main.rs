//! Standalone REST API server binary.
//!
//! Useful during development when only the HTTP surface (with Swagger UI) is needed. The
//! workspace's `metarisk-run` binary additionally loads `.env` and creates the data directory.

use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use metarisk_core::{engine_config_from_env_value, RiskEngine};
use metarisk_store::FileAssessmentStore;

/// Default directory holding stored assessments.
const DEFAULT_ASSESSMENT_DATA_DIR: &str = "assessment_data";

/// # Environment Variables
/// - `METARISK_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `ASSESSMENT_DATA_DIR`: Assessment store directory, must exist (default: "assessment_data")
/// - `METARISK_CALCULATION_VERSION`: Overrides the built-in calculation version
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the calculation version override is blank after trimming,
/// - the data directory does not exist, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("METARISK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let data_dir = std::env::var("ASSESSMENT_DATA_DIR")
        .unwrap_or_else(|_| DEFAULT_ASSESSMENT_DATA_DIR.into());
    let data_path = Path::new(&data_dir);
    if !data_path.exists() {
        anyhow::bail!(
            "Assessment data directory does not exist: {}",
            data_path.display()
        );
    }

    let cfg = engine_config_from_env_value(std::env::var("METARISK_CALCULATION_VERSION").ok())?;
    tracing::info!("calculation version {}", cfg.calculation_version());

    let state = AppState::new(RiskEngine::new(cfg), FileAssessmentStore::open(data_path)?);
    api_rest::serve(&addr, state).await
}
