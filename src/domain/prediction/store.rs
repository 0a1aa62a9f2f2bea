use crate::domain::error::DomainError;
use crate::domain::features::{feature_names, FEATURE_COUNT};

use super::entity::ClassCatalog;
use super::model::{Classifier, FeatureScaler, LabelDecoder};

/// The three pre-trained artifacts, checked against each other once and
/// then shared read-only for the life of the process.
pub struct ArtifactStore {
    scaler: Box<dyn FeatureScaler>,
    classifier: Box<dyn Classifier>,
    decoder: Box<dyn LabelDecoder>,
    catalog: ClassCatalog,
}

impl ArtifactStore {
    /// Assemble the store, rejecting artifacts that disagree on feature
    /// count, feature order or class ordering.
    pub fn new(
        scaler: Box<dyn FeatureScaler>,
        classifier: Box<dyn Classifier>,
        decoder: Box<dyn LabelDecoder>,
    ) -> Result<Self, DomainError> {
        let catalog = ClassCatalog::new(decoder.classes())?;

        if scaler.n_features() != FEATURE_COUNT {
            return Err(DomainError::configuration(format!(
                "Scaler expects {} features, feature vector has {}",
                scaler.n_features(),
                FEATURE_COUNT
            )));
        }

        if let Some(names) = scaler.feature_names() {
            let expected: Vec<&str> = feature_names().collect();
            if names != expected {
                return Err(DomainError::configuration(format!(
                    "Scaler feature order {:?} does not match {:?}",
                    names, expected
                )));
            }
        }

        if classifier.n_features() != FEATURE_COUNT {
            return Err(DomainError::configuration(format!(
                "Classifier expects {} features, feature vector has {}",
                classifier.n_features(),
                FEATURE_COUNT
            )));
        }

        if classifier.n_classes() != catalog.len() {
            return Err(DomainError::configuration(format!(
                "Classifier has {} classes, label encoder has {}",
                classifier.n_classes(),
                catalog.len()
            )));
        }

        if let Some(labels) = classifier.class_labels() {
            if labels != catalog.labels() {
                return Err(DomainError::configuration(format!(
                    "Classifier class order {:?} does not match label encoder {:?}",
                    labels,
                    catalog.labels()
                )));
            }
        }

        Ok(Self {
            scaler,
            classifier,
            decoder,
            catalog,
        })
    }

    pub fn scaler(&self) -> &dyn FeatureScaler {
        self.scaler.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn decoder(&self) -> &dyn LabelDecoder {
        self.decoder.as_ref()
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("catalog", &self.catalog.labels())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::{MockClassifier, MockFeatureScaler, MockLabelDecoder};

    fn labels() -> Vec<String> {
        vec!["CANDIDATE".to_string(), "CONFIRMED".to_string()]
    }

    fn scaler(n_features: usize, names: Option<Vec<String>>) -> MockFeatureScaler {
        let mut scaler = MockFeatureScaler::new();
        scaler.expect_n_features().return_const(n_features);
        scaler.expect_feature_names().return_const(names);
        scaler
    }

    fn classifier(n_classes: usize, labels: Option<Vec<String>>) -> MockClassifier {
        let mut classifier = MockClassifier::new();
        classifier.expect_n_features().return_const(FEATURE_COUNT);
        classifier.expect_n_classes().return_const(n_classes);
        classifier.expect_class_labels().return_const(labels);
        classifier
    }

    fn decoder() -> MockLabelDecoder {
        let mut decoder = MockLabelDecoder::new();
        decoder.expect_classes().returning(labels);
        decoder
    }

    #[test]
    fn test_aligned_artifacts() {
        let names = feature_names().map(String::from).collect();
        let store = ArtifactStore::new(
            Box::new(scaler(FEATURE_COUNT, Some(names))),
            Box::new(classifier(2, Some(labels()))),
            Box::new(decoder()),
        )
        .unwrap();

        assert_eq!(store.catalog().labels(), labels().as_slice());
    }

    #[test]
    fn test_scaler_feature_count_mismatch() {
        let err = ArtifactStore::new(
            Box::new(scaler(9, None)),
            Box::new(classifier(2, None)),
            Box::new(decoder()),
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_scaler_feature_order_mismatch() {
        let mut names: Vec<String> = feature_names().map(String::from).collect();
        names.swap(0, 1);

        let result = ArtifactStore::new(
            Box::new(scaler(FEATURE_COUNT, Some(names))),
            Box::new(classifier(2, None)),
            Box::new(decoder()),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_class_count_mismatch() {
        let result = ArtifactStore::new(
            Box::new(scaler(FEATURE_COUNT, None)),
            Box::new(classifier(3, None)),
            Box::new(decoder()),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_class_order_mismatch() {
        let reversed = vec!["CONFIRMED".to_string(), "CANDIDATE".to_string()];
        let err = ArtifactStore::new(
            Box::new(scaler(FEATURE_COUNT, None)),
            Box::new(classifier(2, Some(reversed))),
            Box::new(decoder()),
        )
        .unwrap_err();

        assert!(err.to_string().contains("class order"));
    }
}
