use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use metarisk_core::{RiskEngine, engine_config_from_env_value};
use metarisk_store::FileAssessmentStore;

/// Main entry point for the MetaRisk service
///
/// Loads `.env`, resolves configuration once and serves the REST API.
///
/// # Environment Variables
/// - `METARISK_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `ASSESSMENT_DATA_DIR`: Assessment store directory, created if missing (default:
///   "assessment_data")
/// - `METARISK_CALCULATION_VERSION`: Overrides the built-in calculation version
///
/// # Errors
/// Returns an error if configuration is invalid, the data directory cannot be created or the
/// server fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("metarisk=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("METARISK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir: PathBuf = std::env::var("ASSESSMENT_DATA_DIR")
        .unwrap_or_else(|_| "assessment_data".into())
        .into();

    let cfg = engine_config_from_env_value(std::env::var("METARISK_CALCULATION_VERSION").ok())?;

    std::fs::create_dir_all(&data_dir)?;
    let store = FileAssessmentStore::open(&data_dir)?;

    tracing::info!(
        "++ Starting MetaRisk {} with data in {}",
        cfg.calculation_version(),
        data_dir.display()
    );

    api_rest::serve(&rest_addr, AppState::new(RiskEngine::new(cfg), store)).await
}
