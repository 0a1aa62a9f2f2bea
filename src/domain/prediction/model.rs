//! Capabilities the pre-trained artifacts provide
//!
//! Each trait covers one artifact, so any implementation (or a test double)
//! can stand in for it.

use ndarray::Array2;

use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Pre-fit per-feature normalization
#[cfg_attr(test, automock)]
pub trait FeatureScaler: Send + Sync {
    /// Number of columns the scaler was fit on
    fn n_features(&self) -> usize;

    /// Column names recorded at fit time, when the artifact carries them
    fn feature_names(&self) -> Option<Vec<String>>;

    /// Normalize the whole matrix at once; output has the input's shape
    fn transform(&self, features: &Array2<f64>) -> Result<Array2<f64>, DomainError>;
}

/// Output of a classifier over a batch
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Predicted class index per row
    pub indices: Vec<usize>,
    /// One probability row per input row, columns in class index order
    pub probabilities: Array2<f64>,
}

/// Pre-trained classifier producing class indices and probabilities
#[cfg_attr(test, automock)]
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;

    fn n_classes(&self) -> usize;

    /// Class labels the classifier was trained with, when recorded
    fn class_labels(&self) -> Option<Vec<String>>;

    fn classify(&self, features: &Array2<f64>) -> Result<Classification, DomainError>;
}

/// Mapping from class index to human-readable label
#[cfg_attr(test, automock)]
pub trait LabelDecoder: Send + Sync {
    /// Labels in index order
    fn classes(&self) -> Vec<String>;

    fn decode(&self, indices: &[usize]) -> Result<Vec<String>, DomainError>;
}
