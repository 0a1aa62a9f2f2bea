//! Domain layer - Core classification logic and entities

pub mod error;
pub mod features;
pub mod observation;
pub mod prediction;

pub use error::DomainError;
pub use features::{engineer_features, EngineeredRow, RawRow, EPSILON, FEATURE_COUNT, RAW_FEATURES};
pub use observation::ObservationTable;
pub use prediction::{
    ArtifactStore, ClassCatalog, ClassProbabilities, Classification, Classifier, FeatureScaler,
    InferencePipeline, LabelDecoder, PredictionResult,
};
