//! Exoplanet Classifier
//!
//! Classifies Kepler Objects of Interest from their orbital and stellar
//! parameters using a pre-trained soft-voting ensemble:
//! - CSV upload over HTTP, one prediction per row
//! - Derived features computed from the raw columns
//! - Artifacts loaded once at startup and shared read-only

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::artifacts::ArtifactLoader;
use infrastructure::services::PredictionService;

/// Load the artifacts named by the configuration and build the handler state.
///
/// Fails when any artifact is missing, malformed or inconsistent with the
/// others.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store = ArtifactLoader::new(config.artifacts.clone()).load()?;
    let service = PredictionService::new(Arc::new(store));

    Ok(AppState::new(service, config.banner.as_str()))
}
