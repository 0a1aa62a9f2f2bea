//! Soft-voting ensemble artifact
//!
//! Member probabilities are combined as a weighted mean; the predicted class
//! is the argmax of the combined distribution.

use ndarray::{Array1, Array2, Axis};
use serde::Deserialize;

use crate::domain::{Classification, Classifier, DomainError};

use super::tree::DecisionTree;

const ARTIFACT: &str = "ensemble";

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum EstimatorSpec {
    LogisticRegression {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    RandomForest {
        trees: Vec<DecisionTree>,
    },
}

#[derive(Debug, Deserialize)]
struct WeightedEstimatorSpec {
    #[serde(default = "default_weight")]
    weight: f64,
    model: EstimatorSpec,
}

#[derive(Debug, Deserialize)]
struct SoftVotingEnsembleSpec {
    n_features: usize,
    #[serde(default)]
    classes: Option<Vec<String>>,
    estimators: Vec<WeightedEstimatorSpec>,
}

fn default_weight() -> f64 {
    1.0
}

/// Linear model with softmax (or sigmoid, for a single coefficient row)
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coef: Array2<f64>,
    intercept: Array1<f64>,
}

impl LogisticRegression {
    pub fn new(
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        n_features: usize,
    ) -> Result<Self, DomainError> {
        if coef.is_empty() {
            return Err(DomainError::artifact(ARTIFACT, "logistic regression has no coefficients"));
        }

        if coef.len() != intercept.len() {
            return Err(DomainError::artifact(
                ARTIFACT,
                format!(
                    "{} coefficient rows but {} intercepts",
                    coef.len(),
                    intercept.len()
                ),
            ));
        }

        if let Some(row) = coef.iter().find(|row| row.len() != n_features) {
            return Err(DomainError::artifact(
                ARTIFACT,
                format!(
                    "coefficient row has {} entries, expected {}",
                    row.len(),
                    n_features
                ),
            ));
        }

        let n_rows = coef.len();
        let flat: Vec<f64> = coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((n_rows, n_features), flat)
            .map_err(|e| DomainError::artifact(ARTIFACT, e.to_string()))?;

        Ok(Self {
            coef,
            intercept: Array1::from_vec(intercept),
        })
    }

    pub fn n_classes(&self) -> usize {
        match self.coef.nrows() {
            1 => 2,
            n => n,
        }
    }

    pub fn predict_proba(&self, features: &Array2<f64>) -> Array2<f64> {
        let logits = features.dot(&self.coef.t()) + &self.intercept;

        if self.coef.nrows() == 1 {
            let positive = logits.column(0).mapv(sigmoid);
            let mut proba = Array2::zeros((features.nrows(), 2));
            proba.column_mut(0).assign(&positive.mapv(|p| 1.0 - p));
            proba.column_mut(1).assign(&positive);
            return proba;
        }

        let mut proba = logits;
        for mut row in proba.rows_mut() {
            let max = row.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
            row.mapv_inplace(|v| (v - max).exp());
            let total = row.sum();
            row.mapv_inplace(|v| v / total);
        }
        proba
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Bagged decision trees; probabilities are the mean over trees
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    pub fn new(
        trees: Vec<DecisionTree>,
        n_features: usize,
        n_classes: usize,
    ) -> Result<Self, DomainError> {
        if trees.is_empty() {
            return Err(DomainError::artifact(ARTIFACT, "random forest has no trees"));
        }

        let trees = trees
            .into_iter()
            .enumerate()
            .map(|(i, tree)| {
                tree.validate(n_features, n_classes)
                    .map_err(|e| DomainError::artifact(ARTIFACT, format!("tree {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { trees, n_classes })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn predict_proba(&self, features: &Array2<f64>) -> Array2<f64> {
        let mut proba = Array2::zeros((features.nrows(), self.n_classes));

        for (sample, mut target) in features.rows().into_iter().zip(proba.rows_mut()) {
            for tree in &self.trees {
                for (cell, value) in target.iter_mut().zip(tree.predict_row(sample)) {
                    *cell += value;
                }
            }
        }

        proba / self.trees.len() as f64
    }
}

#[derive(Debug, Clone)]
pub enum Estimator {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl Estimator {
    pub fn predict_proba(&self, features: &Array2<f64>) -> Array2<f64> {
        match self {
            Self::LogisticRegression(model) => model.predict_proba(features),
            Self::RandomForest(model) => model.predict_proba(features),
        }
    }

    /// Trees in a forest; `None` for linear members
    pub fn n_trees(&self) -> Option<usize> {
        match self {
            Self::LogisticRegression(_) => None,
            Self::RandomForest(model) => Some(model.n_trees()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "logistic_regression",
            Self::RandomForest(_) => "random_forest",
        }
    }
}

/// Weighted soft-voting ensemble of heterogeneous estimators
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "SoftVotingEnsembleSpec")]
pub struct SoftVotingEnsemble {
    n_features: usize,
    n_classes: usize,
    classes: Option<Vec<String>>,
    /// Weights normalized to sum to one
    members: Vec<(f64, Estimator)>,
}

impl SoftVotingEnsemble {
    pub fn members(&self) -> impl Iterator<Item = (f64, &Estimator)> {
        self.members.iter().map(|(weight, estimator)| (*weight, estimator))
    }

    pub fn predict_proba(&self, features: &Array2<f64>) -> Array2<f64> {
        let mut proba = Array2::zeros((features.nrows(), self.n_classes));

        for (weight, estimator) in &self.members {
            proba.scaled_add(*weight, &estimator.predict_proba(features));
        }

        proba
    }
}

impl TryFrom<SoftVotingEnsembleSpec> for SoftVotingEnsemble {
    type Error = DomainError;

    fn try_from(spec: SoftVotingEnsembleSpec) -> Result<Self, Self::Error> {
        let n_features = spec.n_features;

        if spec.estimators.is_empty() {
            return Err(DomainError::artifact(ARTIFACT, "ensemble has no estimators"));
        }

        let mut n_classes = spec.classes.as_ref().map(Vec::len);
        let mut members = Vec::with_capacity(spec.estimators.len());

        for (i, member) in spec.estimators.into_iter().enumerate() {
            if !member.weight.is_finite() || member.weight < 0.0 {
                return Err(DomainError::artifact(
                    ARTIFACT,
                    format!("estimator {} has invalid weight {}", i, member.weight),
                ));
            }

            let estimator = match member.model {
                EstimatorSpec::LogisticRegression { coef, intercept } => {
                    let model = LogisticRegression::new(coef, intercept, n_features)?;
                    check_class_count(&mut n_classes, model.n_classes(), i)?;
                    Estimator::LogisticRegression(model)
                }
                EstimatorSpec::RandomForest { trees } => {
                    let classes = match n_classes {
                        Some(n) => n,
                        None => forest_class_count(&trees).ok_or_else(|| {
                            DomainError::artifact(ARTIFACT, format!("estimator {} has no trees", i))
                        })?,
                    };
                    check_class_count(&mut n_classes, classes, i)?;
                    Estimator::RandomForest(RandomForest::new(trees, n_features, classes)?)
                }
            };

            members.push((member.weight, estimator));
        }

        let total: f64 = members.iter().map(|(weight, _)| weight).sum();
        if total <= 0.0 {
            return Err(DomainError::artifact(ARTIFACT, "estimator weights sum to zero"));
        }
        for (weight, _) in &mut members {
            *weight /= total;
        }

        Ok(Self {
            n_features,
            n_classes: n_classes.unwrap_or_default(),
            classes: spec.classes,
            members,
        })
    }
}

fn check_class_count(expected: &mut Option<usize>, actual: usize, index: usize) -> Result<(), DomainError> {
    match *expected {
        Some(n) if n != actual => Err(DomainError::artifact(
            ARTIFACT,
            format!("estimator {} predicts {} classes, expected {}", index, actual, n),
        )),
        _ => {
            *expected = Some(actual);
            Ok(())
        }
    }
}

fn forest_class_count(trees: &[DecisionTree]) -> Option<usize> {
    trees.first().and_then(DecisionTree::leaf_width)
}

/// Index of the largest value with numpy semantics: the first NaN wins and
/// ties keep the first index
fn argmax(values: impl IntoIterator<Item = f64>) -> usize {
    let mut best: Option<(usize, f64)> = None;

    for (i, value) in values.into_iter().enumerate() {
        if value.is_nan() {
            return i;
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((i, value)),
        }
    }

    best.map(|(i, _)| i).unwrap_or(0)
}

impl Classifier for SoftVotingEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn class_labels(&self) -> Option<Vec<String>> {
        self.classes.clone()
    }

    fn classify(&self, features: &Array2<f64>) -> Result<Classification, DomainError> {
        if features.ncols() != self.n_features {
            return Err(DomainError::inference(format!(
                "Ensemble trained on {} features, got {}",
                self.n_features,
                features.ncols()
            )));
        }

        let probabilities = self.predict_proba(features);
        let indices = probabilities
            .axis_iter(Axis(0))
            .map(|row| argmax(row.iter().copied()))
            .collect();

        Ok(Classification {
            indices,
            probabilities,
        })
    }
}
