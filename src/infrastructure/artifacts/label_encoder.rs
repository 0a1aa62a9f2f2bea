//! Label encoder artifact

use serde::Deserialize;

use crate::domain::{ClassCatalog, DomainError, LabelDecoder};

#[derive(Debug, Deserialize)]
struct LabelEncoderSpec {
    classes: Vec<String>,
}

/// Class index to label mapping, in the order the encoder was fit
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "LabelEncoderSpec")]
pub struct LabelEncoder {
    catalog: ClassCatalog,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, DomainError> {
        let catalog = ClassCatalog::new(classes)
            .map_err(|e| DomainError::artifact("label_encoder", e.to_string()))?;

        Ok(Self { catalog })
    }
}

impl TryFrom<LabelEncoderSpec> for LabelEncoder {
    type Error = DomainError;

    fn try_from(spec: LabelEncoderSpec) -> Result<Self, Self::Error> {
        Self::new(spec.classes)
    }
}

impl LabelDecoder for LabelEncoder {
    fn classes(&self) -> Vec<String> {
        self.catalog.labels().to_vec()
    }

    fn decode(&self, indices: &[usize]) -> Result<Vec<String>, DomainError> {
        let labels = self.catalog.labels();

        indices
            .iter()
            .map(|&index| {
                labels.get(index).cloned().ok_or_else(|| {
                    DomainError::inference(format!(
                        "Class index {} outside of {} known labels",
                        index,
                        labels.len()
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder::new(vec![
            "CANDIDATE".to_string(),
            "CONFIRMED".to_string(),
            "FALSE POSITIVE".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_decode() {
        let labels = encoder().decode(&[2, 0, 1]).unwrap();
        assert_eq!(labels, vec!["FALSE POSITIVE", "CANDIDATE", "CONFIRMED"]);
    }

    #[test]
    fn test_decode_out_of_range() {
        let err = encoder().decode(&[3]).unwrap_err();
        assert!(matches!(err, DomainError::Inference { .. }));
    }

    #[test]
    fn test_duplicate_classes_rejected() {
        let err = LabelEncoder::new(vec!["A".to_string(), "A".to_string()]).unwrap_err();
        assert!(matches!(err, DomainError::Artifact { .. }));
    }

    #[test]
    fn test_deserialize_from_json() {
        let encoder: LabelEncoder =
            serde_json::from_str(r#"{"classes": ["CANDIDATE", "CONFIRMED"]}"#).unwrap();

        assert_eq!(encoder.classes(), vec!["CANDIDATE", "CONFIRMED"]);
    }

    #[test]
    fn test_deserialize_empty_classes_rejected() {
        assert!(serde_json::from_str::<LabelEncoder>(r#"{"classes": []}"#).is_err());
    }
}
