//! Predict command - runs the inference pipeline on a local CSV file

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use super::ArtifactsArg;
use crate::api::types::PredictResponse;
use crate::config::AppConfig;
use crate::domain::DomainError;
use crate::infrastructure::artifacts::ArtifactLoader;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::services::PredictionService;

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// CSV file with one KOI observation per row
    #[arg(long, value_name = "CSV")]
    pub file: PathBuf,

    #[command(flatten)]
    pub artifacts: ArtifactsArg,
}

/// Print the same JSON payload `POST /predict` would return
pub fn run(args: PredictArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let store = ArtifactLoader::new(args.artifacts.resolve(&config)).load()?;
    let service = PredictionService::new(store.into());

    let data = std::fs::read(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;

    println!("{}", render(&service, &data)?);

    Ok(())
}

fn render(service: &PredictionService, data: &[u8]) -> anyhow::Result<String> {
    let response = match service.predict_csv(data) {
        Ok(results) => PredictResponse::results(results),
        Err(e @ DomainError::MissingColumns { .. }) => PredictResponse::error(e.to_string()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::to_string_pretty(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArtifactsConfig;

    fn service() -> PredictionService {
        let config = ArtifactsConfig::with_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/models"));
        PredictionService::new(ArtifactLoader::new(config).load().unwrap().into())
    }

    #[test]
    fn test_render_sample_file() {
        let data = std::fs::read(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sample_koi.csv"))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&render(&service(), &data).unwrap())
            .unwrap();

        assert_eq!(json["results"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_render_missing_columns() {
        let rendered = render(&service(), b"koi_period\n1\n").unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert!(json["error"].as_str().unwrap().starts_with("Missing columns: ['koi_prad'"));
    }

    #[test]
    fn test_render_parse_error() {
        let csv = "koi_period,koi_prad,koi_sma,koi_incl,koi_teq,koi_slogg,koi_srad,koi_smass,koi_steff\n\
                   x,1,1,1,1,1,1,1,1\n";

        assert!(render(&service(), csv.as_bytes()).is_err());
    }
}
