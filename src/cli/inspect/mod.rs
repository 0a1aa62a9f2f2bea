//! Inspect command - validates the artifacts and prints what they contain

use clap::Args;
use serde::Serialize;

use super::ArtifactsArg;
use crate::config::AppConfig;
use crate::domain::{FeatureScaler, LabelDecoder, RAW_FEATURES};
use crate::infrastructure::artifacts::{ArtifactLoader, LoadedArtifacts};
use crate::infrastructure::logging::init_logging;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub artifacts: ArtifactsArg,
}

#[derive(Debug, Serialize)]
struct ArtifactSummary {
    directory: String,
    required_columns: Vec<&'static str>,
    n_features: usize,
    classes: Vec<String>,
    estimators: Vec<EstimatorSummary>,
}

#[derive(Debug, Serialize)]
struct EstimatorSummary {
    kind: &'static str,
    weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    trees: Option<usize>,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let artifacts = args.artifacts.resolve(&config);
    let directory = artifacts.dir.display().to_string();
    let parts = ArtifactLoader::new(artifacts).load_parts()?;
    let summary = summarize(directory, &parts);

    parts.into_store()?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

fn summarize(directory: String, parts: &LoadedArtifacts) -> ArtifactSummary {
    ArtifactSummary {
        directory,
        required_columns: RAW_FEATURES.to_vec(),
        n_features: parts.scaler.n_features(),
        classes: parts.label_encoder.classes(),
        estimators: parts
            .ensemble
            .members()
            .map(|(weight, estimator)| EstimatorSummary {
                kind: estimator.kind(),
                weight,
                trees: estimator.n_trees(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArtifactsConfig;
    use crate::domain::Classifier;

    #[test]
    fn test_summarize_demo_artifacts() {
        let config = ArtifactsConfig::with_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/models"));
        let parts = ArtifactLoader::new(config).load_parts().unwrap();
        let summary = summarize("models".to_string(), &parts);

        assert_eq!(summary.n_features, 13);
        assert_eq!(summary.required_columns.len(), 9);
        assert_eq!(summary.classes, vec!["CANDIDATE", "CONFIRMED", "FALSE POSITIVE"]);
        assert_eq!(summary.estimators.len(), 2);
        assert_eq!(summary.estimators[0].kind, "random_forest");
        assert_eq!(summary.estimators[0].trees, Some(3));

        let total: f64 = summary.estimators.iter().map(|e| e.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(parts.ensemble.n_classes(), 3);
    }
}
