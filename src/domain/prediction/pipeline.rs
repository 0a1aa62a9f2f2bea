//! Scaling, classification and decoding over a whole batch

use ndarray::Array2;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::features::FEATURE_COUNT;

use super::entity::{ClassProbabilities, PredictionResult};
use super::store::ArtifactStore;

/// Runs the artifact store over an `n x 13` feature matrix, whole batch at
/// a time.
pub struct InferencePipeline<'a> {
    store: &'a ArtifactStore,
}

impl<'a> InferencePipeline<'a> {
    pub fn new(store: &'a ArtifactStore) -> Self {
        Self { store }
    }

    pub fn run(&self, features: &Array2<f64>) -> Result<Vec<PredictionResult>, DomainError> {
        let n_rows = features.nrows();

        if features.ncols() != FEATURE_COUNT {
            return Err(DomainError::inference(format!(
                "Feature matrix has {} columns, expected {}",
                features.ncols(),
                FEATURE_COUNT
            )));
        }

        if n_rows == 0 {
            return Ok(Vec::new());
        }

        let scaled = self.store.scaler().transform(features)?;
        if scaled.dim() != features.dim() {
            return Err(DomainError::inference(format!(
                "Scaler changed matrix shape from {:?} to {:?}",
                features.dim(),
                scaled.dim()
            )));
        }

        let classification = self.store.classifier().classify(&scaled)?;
        let catalog = self.store.catalog();

        if classification.indices.len() != n_rows {
            return Err(DomainError::inference(format!(
                "Classifier returned {} predictions for {} rows",
                classification.indices.len(),
                n_rows
            )));
        }

        if classification.probabilities.dim() != (n_rows, catalog.len()) {
            return Err(DomainError::inference(format!(
                "Classifier returned probabilities of shape {:?}, expected {:?}",
                classification.probabilities.dim(),
                (n_rows, catalog.len())
            )));
        }

        let labels = self.store.decoder().decode(&classification.indices)?;
        if labels.len() != n_rows {
            return Err(DomainError::inference(format!(
                "Label decoder returned {} labels for {} rows",
                labels.len(),
                n_rows
            )));
        }

        debug!(rows = n_rows, classes = catalog.len(), "Batch classified");

        labels
            .into_iter()
            .zip(classification.probabilities.rows())
            .map(|(predicted_class, row)| -> Result<PredictionResult, DomainError> {
                Ok(PredictionResult {
                    predicted_class,
                    probabilities: ClassProbabilities::new(catalog.clone(), row.to_vec())?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::{
        Classification, MockClassifier, MockFeatureScaler, MockLabelDecoder,
    };
    use mockall::predicate::always;
    use ndarray::array;

    fn labels() -> Vec<String> {
        vec![
            "CANDIDATE".to_string(),
            "CONFIRMED".to_string(),
            "FALSE POSITIVE".to_string(),
        ]
    }

    fn scaler() -> MockFeatureScaler {
        let mut scaler = MockFeatureScaler::new();
        scaler.expect_n_features().return_const(FEATURE_COUNT);
        scaler.expect_feature_names().return_const(None::<Vec<String>>);
        scaler
    }

    fn classifier() -> MockClassifier {
        let mut classifier = MockClassifier::new();
        classifier.expect_n_features().return_const(FEATURE_COUNT);
        classifier.expect_n_classes().return_const(3usize);
        classifier.expect_class_labels().return_const(None::<Vec<String>>);
        classifier
    }

    fn decoder() -> MockLabelDecoder {
        let mut decoder = MockLabelDecoder::new();
        decoder.expect_classes().returning(labels);
        decoder.expect_decode().returning(|indices| {
            let labels = labels();
            Ok(indices.iter().map(|&i| labels[i].clone()).collect())
        });
        decoder
    }

    fn store(scaler: MockFeatureScaler, classifier: MockClassifier) -> ArtifactStore {
        ArtifactStore::new(Box::new(scaler), Box::new(classifier), Box::new(decoder())).unwrap()
    }

    #[test]
    fn test_run_assembles_results_in_row_order() {
        let mut scaler = scaler();
        scaler
            .expect_transform()
            .with(always())
            .times(1)
            .returning(|x| Ok(x.clone()));

        let mut classifier = classifier();
        classifier.expect_classify().times(1).returning(|_| {
            Ok(Classification {
                indices: vec![1, 2],
                probabilities: array![[0.1, 0.8, 0.1], [0.2, 0.1, 0.7]],
            })
        });

        let store = store(scaler, classifier);
        let features = Array2::zeros((2, FEATURE_COUNT));
        let results = InferencePipeline::new(&store).run(&features).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].predicted_class, "CONFIRMED");
        assert_eq!(results[1].predicted_class, "FALSE POSITIVE");
        assert_eq!(results[1].probabilities.get("FALSE POSITIVE"), Some(0.7));
        for result in &results {
            assert!((result.probabilities.sum() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_classifier_sees_scaled_matrix() {
        let mut scaler = scaler();
        scaler.expect_transform().returning(|x| Ok(x.mapv(|v| v + 1.0)));

        let mut classifier = classifier();
        classifier.expect_classify().returning(|x| {
            assert!(x.iter().all(|&v| v == 1.0));
            Ok(Classification {
                indices: vec![0],
                probabilities: array![[1.0, 0.0, 0.0]],
            })
        });

        let store = store(scaler, classifier);
        let results = InferencePipeline::new(&store)
            .run(&Array2::zeros((1, FEATURE_COUNT)))
            .unwrap();

        assert_eq!(results[0].predicted_class, "CANDIDATE");
    }

    #[test]
    fn test_empty_batch_skips_artifacts() {
        let mut scaler = scaler();
        scaler.expect_transform().never();
        let mut classifier = classifier();
        classifier.expect_classify().never();

        let store = store(scaler, classifier);
        let results = InferencePipeline::new(&store)
            .run(&Array2::zeros((0, FEATURE_COUNT)))
            .unwrap();

        assert!(results.is_empty());
    }

    #[test]
    fn test_wrong_feature_width_is_rejected() {
        let store = store(scaler(), classifier());
        let err = InferencePipeline::new(&store)
            .run(&Array2::zeros((1, 9)))
            .unwrap_err();

        assert!(matches!(err, DomainError::Inference { .. }));
    }

    #[test]
    fn test_probability_shape_mismatch_is_rejected() {
        let mut scaler = scaler();
        scaler.expect_transform().returning(|x| Ok(x.clone()));

        let mut classifier = classifier();
        classifier.expect_classify().returning(|_| {
            Ok(Classification {
                indices: vec![0],
                probabilities: array![[0.5, 0.5]],
            })
        });

        let store = store(scaler, classifier);
        let result = InferencePipeline::new(&store).run(&Array2::zeros((1, FEATURE_COUNT)));

        assert!(matches!(result, Err(DomainError::Inference { .. })));
    }
}
