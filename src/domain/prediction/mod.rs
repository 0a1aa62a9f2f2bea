//! Prediction domain - Model capabilities, artifact store and inference

mod entity;
mod model;
mod pipeline;
mod store;

pub use entity::{ClassCatalog, ClassProbabilities, PredictionResult};
pub use model::{Classification, Classifier, FeatureScaler, LabelDecoder};
pub use pipeline::InferencePipeline;
pub use store::ArtifactStore;

#[cfg(test)]
pub use model::{MockClassifier, MockFeatureScaler, MockLabelDecoder};
