//! Startup loading of the three artifacts

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::ArtifactsConfig;
use crate::domain::{ArtifactStore, DomainError};

use super::ensemble::SoftVotingEnsemble;
use super::label_encoder::LabelEncoder;
use super::scaler::StandardScaler;

/// The artifacts as parsed from disk, before being checked against each other
#[derive(Debug)]
pub struct LoadedArtifacts {
    pub scaler: StandardScaler,
    pub label_encoder: LabelEncoder,
    pub ensemble: SoftVotingEnsemble,
}

impl LoadedArtifacts {
    /// Cross-check the artifacts and seal them into a read-only store
    pub fn into_store(self) -> Result<ArtifactStore, DomainError> {
        ArtifactStore::new(
            Box::new(self.scaler),
            Box::new(self.ensemble),
            Box::new(self.label_encoder),
        )
    }
}

/// Reads artifacts from the configured directory
pub struct ArtifactLoader {
    config: ArtifactsConfig,
}

impl ArtifactLoader {
    pub fn new(config: ArtifactsConfig) -> Self {
        Self { config }
    }

    pub fn load_parts(&self) -> Result<LoadedArtifacts, DomainError> {
        info!(dir = %self.config.dir.display(), "Loading model artifacts");

        let scaler: StandardScaler = read_json(&self.config.scaler_path())?;
        let label_encoder: LabelEncoder = read_json(&self.config.label_encoder_path())?;
        let ensemble: SoftVotingEnsemble = read_json(&self.config.ensemble_path())?;

        Ok(LoadedArtifacts {
            scaler,
            label_encoder,
            ensemble,
        })
    }

    /// Load, cross-check and seal all three artifacts
    pub fn load(&self) -> Result<ArtifactStore, DomainError> {
        let parts = self.load_parts()?;
        let estimators = parts.ensemble.members().count();
        let store = parts.into_store()?;

        info!(
            classes = ?store.catalog().labels(),
            estimators,
            "Model artifacts loaded"
        );

        Ok(store)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    let artifact = path.display().to_string();

    let bytes = std::fs::read(path)
        .map_err(|e| DomainError::artifact(&artifact, format!("cannot read file: {}", e)))?;

    debug!(path = %artifact, bytes = bytes.len(), "Read artifact");

    serde_json::from_slice(&bytes)
        .map_err(|e| DomainError::artifact(&artifact, format!("invalid artifact: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::artifacts::testing::write_demo_artifacts;

    #[test]
    fn test_load_demo_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_demo_artifacts(dir.path());

        let store = ArtifactLoader::new(ArtifactsConfig::with_dir(dir.path()))
            .load()
            .unwrap();

        assert_eq!(
            store.catalog().labels(),
            &["CANDIDATE", "CONFIRMED", "FALSE POSITIVE"]
        );
    }

    #[test]
    fn test_missing_file_is_artifact_error() {
        let dir = tempfile::tempdir().unwrap();
        write_demo_artifacts(dir.path());
        std::fs::remove_file(dir.path().join("ensemble.json")).unwrap();

        let err = ArtifactLoader::new(ArtifactsConfig::with_dir(dir.path()))
            .load()
            .unwrap_err();

        assert!(matches!(err, DomainError::Artifact { .. }));
        assert!(err.to_string().contains("ensemble.json"));
    }

    #[test]
    fn test_malformed_file_is_artifact_error() {
        let dir = tempfile::tempdir().unwrap();
        write_demo_artifacts(dir.path());
        std::fs::write(dir.path().join("scaler.json"), "{not json").unwrap();

        let err = ArtifactLoader::new(ArtifactsConfig::with_dir(dir.path()))
            .load()
            .unwrap_err();

        assert!(matches!(err, DomainError::Artifact { .. }));
    }

    #[test]
    fn test_misaligned_catalog_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_demo_artifacts(dir.path());
        std::fs::write(
            dir.path().join("label_encoder.json"),
            r#"{"classes": ["CONFIRMED", "CANDIDATE", "FALSE POSITIVE"]}"#,
        )
        .unwrap();

        let err = ArtifactLoader::new(ArtifactsConfig::with_dir(dir.path()))
            .load()
            .unwrap_err();

        assert!(matches!(err, DomainError::Configuration { .. }));
    }
}
