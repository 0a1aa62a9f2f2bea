//! Standard scaler artifact

use ndarray::{Array1, Array2};
use serde::Deserialize;

use crate::domain::{DomainError, FeatureScaler};

#[derive(Debug, Deserialize)]
struct StandardScalerSpec {
    mean: Vec<f64>,
    scale: Vec<f64>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

/// Z-score normalization: `(x - mean) / scale`, column by column
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "StandardScalerSpec")]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn new(
        mean: Vec<f64>,
        scale: Vec<f64>,
        feature_names: Option<Vec<String>>,
    ) -> Result<Self, DomainError> {
        if mean.is_empty() {
            return Err(DomainError::artifact("scaler", "mean cannot be empty"));
        }

        if mean.len() != scale.len() {
            return Err(DomainError::artifact(
                "scaler",
                format!("mean has {} entries, scale has {}", mean.len(), scale.len()),
            ));
        }

        if let Some(names) = &feature_names {
            if names.len() != mean.len() {
                return Err(DomainError::artifact(
                    "scaler",
                    format!("{} feature names for {} features", names.len(), mean.len()),
                ));
            }
        }

        // A constant column was fit with zero variance
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(Self {
            mean: Array1::from_vec(mean),
            scale,
            feature_names,
        })
    }
}

impl TryFrom<StandardScalerSpec> for StandardScaler {
    type Error = DomainError;

    fn try_from(spec: StandardScalerSpec) -> Result<Self, Self::Error> {
        Self::new(spec.mean, spec.scale, spec.feature_names)
    }
}

impl FeatureScaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn feature_names(&self) -> Option<Vec<String>> {
        self.feature_names.clone()
    }

    fn transform(&self, features: &Array2<f64>) -> Result<Array2<f64>, DomainError> {
        if features.ncols() != self.mean.len() {
            return Err(DomainError::inference(format!(
                "Scaler fit on {} features, got {}",
                self.mean.len(),
                features.ncols()
            )));
        }

        Ok((features - &self.mean) / &self.scale)
    }
}
