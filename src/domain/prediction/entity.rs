//! Prediction entities

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::error::DomainError;

/// Ordered class labels known to the label encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCatalog {
    labels: Arc<[String]>,
}

impl ClassCatalog {
    pub fn new(labels: Vec<String>) -> Result<Self, DomainError> {
        if labels.is_empty() {
            return Err(DomainError::configuration("Class catalog cannot be empty"));
        }

        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(DomainError::configuration(format!(
                    "Duplicate class label '{}'",
                    label
                )));
            }
        }

        Ok(Self {
            labels: labels.into(),
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Probability per catalog label, kept in catalog order.
///
/// Serializes as a JSON object whose keys follow the catalog, so identical
/// inputs always produce byte-identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProbabilities {
    catalog: ClassCatalog,
    values: Vec<f64>,
}

impl ClassProbabilities {
    pub fn new(catalog: ClassCatalog, values: Vec<f64>) -> Result<Self, DomainError> {
        if values.len() != catalog.len() {
            return Err(DomainError::inference(format!(
                "Expected {} probabilities, got {}",
                catalog.len(),
                values.len()
            )));
        }

        Ok(Self { catalog, values })
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.catalog
            .labels()
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.catalog
            .labels()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

impl Serialize for ClassProbabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (label, value) in self.iter() {
            map.serialize_entry(label, &value)?;
        }
        map.end()
    }
}

/// Classification of one uploaded row
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PredictionResult {
    pub predicted_class: String,
    pub probabilities: ClassProbabilities,
}
