//! CLI module for the exoplanet classifier
//!
//! - `serve`: HTTP API
//! - `predict`: classify a CSV file offline
//! - `inspect`: validate and summarize the model artifacts

pub mod inspect;
pub mod predict;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Exoplanet Classifier - KOI candidate classification service
#[derive(Parser)]
#[command(name = "exoplanet-classifier")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Classify every row of a CSV file and print the JSON payload
    Predict(predict::PredictArgs),

    /// Load the artifacts, cross-check them and print a summary
    Inspect(inspect::InspectArgs),
}

/// Shared `--artifacts` override
#[derive(clap::Args, Debug, Clone)]
pub struct ArtifactsArg {
    /// Directory holding scaler.json, label_encoder.json and ensemble.json
    #[arg(long, value_name = "DIR")]
    pub artifacts: Option<PathBuf>,
}

impl ArtifactsArg {
    pub fn resolve(&self, config: &crate::AppConfig) -> crate::config::ArtifactsConfig {
        let mut artifacts = config.artifacts.clone();
        if let Some(dir) = &self.artifacts {
            artifacts.dir = dir.clone();
        }
        artifacts
    }
}
