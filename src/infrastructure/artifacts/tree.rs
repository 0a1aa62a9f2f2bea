//! Flat decision tree storage and traversal
//!
//! Nodes live in parallel arrays indexed by node id, root at 0. A node is a
//! leaf when both child pointers are `-1`. Samples go left when
//! `x[feature] <= threshold`; a NaN feature therefore goes right.

use ndarray::ArrayView1;
use serde::Deserialize;

const LEAF: i64 = -1;

/// Structural problems found while loading a tree
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValidationError {
    EmptyTree,
    LengthMismatch { field: &'static str, len: usize, n_nodes: usize },
    ChildOutOfBounds { node: usize, child: i64 },
    HalfLeaf { node: usize },
    SelfLoop { node: usize },
    DuplicateVisit { node: usize },
    UnreachableNode { node: usize },
    FeatureOutOfBounds { node: usize, feature: i64 },
    LeafWidth { node: usize, len: usize, n_classes: usize },
    EmptyLeaf { node: usize },
}

impl std::fmt::Display for TreeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTree => write!(f, "tree has no nodes"),
            Self::LengthMismatch { field, len, n_nodes } => {
                write!(f, "{} has {} entries for {} nodes", field, len, n_nodes)
            }
            Self::ChildOutOfBounds { node, child } => {
                write!(f, "node {} points to missing child {}", node, child)
            }
            Self::HalfLeaf { node } => write!(f, "node {} has exactly one child", node),
            Self::SelfLoop { node } => write!(f, "node {} is its own child", node),
            Self::DuplicateVisit { node } => write!(f, "node {} is reachable twice", node),
            Self::UnreachableNode { node } => write!(f, "node {} is unreachable", node),
            Self::FeatureOutOfBounds { node, feature } => {
                write!(f, "node {} splits on unknown feature {}", node, feature)
            }
            Self::LeafWidth { node, len, n_classes } => {
                write!(f, "leaf {} has {} values for {} classes", node, len, n_classes)
            }
            Self::EmptyLeaf { node } => write!(f, "leaf {} has zero total weight", node),
        }
    }
}

/// One fitted decision tree
///
/// Deserialized as-is; `validate` must run before the tree is used.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
}

impl DecisionTree {
    pub fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF
    }

    /// Number of class values stored at the first leaf
    pub fn leaf_width(&self) -> Option<usize> {
        (0..self.n_nodes())
            .find(|&node| self.is_leaf(node))
            .and_then(|node| self.value.get(node))
            .map(Vec::len)
    }

    /// Check structure against the ensemble's shape and normalize leaf
    /// values into class distributions.
    pub fn validate(
        mut self,
        n_features: usize,
        n_classes: usize,
    ) -> Result<Self, TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        let lengths = [
            ("children_right", self.children_right.len()),
            ("feature", self.feature.len()),
            ("threshold", self.threshold.len()),
            ("value", self.value.len()),
        ];
        for (field, len) in lengths {
            if len != n_nodes {
                return Err(TreeValidationError::LengthMismatch { field, len, n_nodes });
            }
        }

        let mut visited = vec![false; n_nodes];
        let mut stack = vec![0usize];

        while let Some(node) = stack.pop() {
            if visited[node] {
                return Err(TreeValidationError::DuplicateVisit { node });
            }
            visited[node] = true;

            let (left, right) = (self.children_left[node], self.children_right[node]);

            match (left == LEAF, right == LEAF) {
                (true, true) => {
                    let values = &mut self.value[node];
                    if values.len() != n_classes {
                        return Err(TreeValidationError::LeafWidth {
                            node,
                            len: values.len(),
                            n_classes,
                        });
                    }

                    let total: f64 = values.iter().sum();
                    if total.is_nan() || total <= 0.0 {
                        return Err(TreeValidationError::EmptyLeaf { node });
                    }
                    values.iter_mut().for_each(|v| *v /= total);
                }
                (false, false) => {
                    let feature = self.feature[node];
                    if feature < 0 || feature as usize >= n_features {
                        return Err(TreeValidationError::FeatureOutOfBounds { node, feature });
                    }

                    for child in [left, right] {
                        if child < 0 || child as usize >= n_nodes {
                            return Err(TreeValidationError::ChildOutOfBounds { node, child });
                        }
                        if child as usize == node {
                            return Err(TreeValidationError::SelfLoop { node });
                        }
                        stack.push(child as usize);
                    }
                }
                _ => return Err(TreeValidationError::HalfLeaf { node }),
            }
        }

        if let Some(node) = visited.iter().position(|&seen| !seen) {
            return Err(TreeValidationError::UnreachableNode { node });
        }

        Ok(self)
    }

    /// Class distribution of the leaf `sample` falls into
    pub fn predict_row(&self, sample: ArrayView1<'_, f64>) -> &[f64] {
        let mut node = 0usize;

        while !self.is_leaf(node) {
            let value = sample[self.feature[node] as usize];
            node = if value <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        &self.value[node]
    }
}
