//! Feature domain - Input columns and derived features

mod columns;
mod engineer;

pub use columns::{
    feature_names, ENGINEERED_FEATURES, FEATURE_COUNT, RAW_FEATURES, RAW_FEATURE_COUNT,
};
pub use engineer::{engineer_features, EngineeredRow, RawRow, EPSILON};
