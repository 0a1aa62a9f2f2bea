//! Pre-trained artifacts stored as JSON documents

mod ensemble;
mod label_encoder;
mod loader;
mod scaler;
mod tree;

pub use ensemble::{Estimator, LogisticRegression, RandomForest, SoftVotingEnsemble};
pub use label_encoder::LabelEncoder;
pub use loader::{ArtifactLoader, LoadedArtifacts};
pub use scaler::StandardScaler;
pub use tree::{DecisionTree, TreeValidationError};

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;

    const DEMO_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models");

    /// Copy the bundled demo artifacts into `dir`
    pub fn write_demo_artifacts(dir: &Path) {
        for file in ["scaler.json", "label_encoder.json", "ensemble.json"] {
            std::fs::copy(Path::new(DEMO_DIR).join(file), dir.join(file)).unwrap();
        }
    }
}
