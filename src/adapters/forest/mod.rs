//! Forest adapter: Implementation of Classifier for exported tree ensembles.
//!
//! The model artifact is a JSON export of a fitted random forest. Each tree
//! is stored as parallel node arrays:
//!
//! - `children_left[i]` / `children_right[i]`: child node indices, `-1` at leaves
//! - `feature[i]`: column tested at node `i`
//! - `threshold[i]`: go left when `x[feature[i]] <= threshold[i]`
//! - `value[i]`: training class counts `[retained, left]` at node `i`
//!
//! Prediction averages the per-tree class probabilities at the reached
//! leaves and takes the most probable class (ties go to "retained").
//!
//! # Exporting a fitted forest
//!
//! For a scikit-learn `RandomForestClassifier` trained on the 14 encoded
//! columns, each `estimator.tree_` exposes `children_left`,
//! `children_right`, `feature`, `threshold` and `value` (squeeze the middle
//! axis of `value` to get `[retained, left]` per node). Dump those lists per
//! tree with `n_features`, `n_classes` and `feature_names` as JSON. The
//! bundled `models/employee_model.json` is a hand-written 3-tree demo in
//! this layout.
//!
//! # Integrity
//!
//! An expected SHA-256 digest of the artifact can be pinned; a mismatch
//! refuses the load.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureVector, RetentionLabel, FEATURE_NAMES};
use crate::ports::{Classifier, ScoringError};

/// Leaf marker in `children_left` / `children_right`.
const LEAF: i64 = -1;

/// Binary classification only: retained / left.
const N_CLASSES: usize = 2;

/// One decision tree in array form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

/// Tree ensemble parameters as exported from the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedForest {
    pub n_features: usize,
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub n_classes: usize,
    pub trees: Vec<ExportedTree>,
}

impl ExportedTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Structural checks that make `leaf_for` total.
    ///
    /// Children must come after their parent, which rules out cycles.
    fn check(&self, n_features: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("node array lengths differ".into());
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {i} has exactly one child"));
                }
                let counts = &self.value[i];
                if counts.len() != N_CLASSES {
                    return Err(format!("leaf {i} has {} class counts", counts.len()));
                }
                if counts.iter().any(|c| !c.is_finite() || *c < 0.0)
                    || counts.iter().sum::<f64>() <= 0.0
                {
                    return Err(format!("leaf {i} has invalid class counts"));
                }
                continue;
            }

            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {i} has out-of-order child {child}"));
                }
            }
            if self.feature[i] < 0 || self.feature[i] as usize >= n_features {
                return Err(format!("node {i} tests feature {}", self.feature[i]));
            }
            if self.threshold[i].is_nan() {
                return Err(format!("node {i} has NaN threshold"));
            }
        }
        Ok(())
    }

    fn leaf_for(&self, x: &[f64]) -> usize {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let f = self.feature[node] as usize;
            node = if x[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Probability of the "left" class for one row.
    fn left_probability(&self, x: &[f64]) -> f64 {
        let counts = &self.value[self.leaf_for(x)];
        counts[1] / (counts[0] + counts[1])
    }
}

impl ExportedForest {
    /// Validate the export before it is used for scoring.
    ///
    /// # Errors
    /// Returns `ScoringError::InvalidModel` describing the first problem.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let invalid = |msg: String| Err(ScoringError::InvalidModel(msg));

        if self.n_classes != N_CLASSES {
            return invalid(format!("expected {N_CLASSES} classes, got {}", self.n_classes));
        }
        if self.n_features == 0 {
            return invalid("model declares zero features".into());
        }
        if self.trees.is_empty() {
            return invalid("model has no trees".into());
        }
        if !self.feature_names.is_empty() {
            if self.feature_names.len() != self.n_features {
                return invalid("feature_names length does not match n_features".into());
            }
            if self.n_features == FEATURE_NAMES.len()
                && self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES)
            {
                return invalid("feature columns are not in training order".into());
            }
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if let Err(msg) = tree.check(self.n_features) {
                return invalid(format!("tree {t}: {msg}"));
            }
        }
        Ok(())
    }
}

/// Classifier backed by an exported random forest.
pub struct ForestClassifier {
    model: Option<ExportedForest>,
    expected_sha256: Option<String>,
}

impl Default for ForestClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ForestClassifier {
    /// Create an adapter with no model loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: None,
            expected_sha256: None,
        }
    }

    /// Require the artifact to hash to this SHA-256 (hex) digest.
    #[must_use]
    pub fn with_expected_sha256(mut self, digest: impl Into<String>) -> Self {
        self.expected_sha256 = Some(digest.into().trim().to_ascii_lowercase());
        self
    }

    /// Use an already-parsed model.
    ///
    /// # Errors
    /// Returns `ScoringError::InvalidModel` if the model is malformed.
    pub fn from_model(model: ExportedForest) -> Result<Self, ScoringError> {
        model.validate()?;
        Ok(Self {
            model: Some(model),
            expected_sha256: None,
        })
    }

    /// Load the model artifact from a JSON file.
    ///
    /// # Errors
    /// Returns `ScoringError::ModelNotLoaded` if the file cannot be read,
    /// `ScoringError::Integrity` on digest mismatch, and
    /// `ScoringError::InvalidModel` if the content is malformed.
    pub fn load_model(&mut self, path: &Path) -> Result<(), ScoringError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ScoringError::ModelNotLoaded(format!("{}: {e}", path.display())))?;

        if let Some(expected) = &self.expected_sha256 {
            let actual: String = Sha256::digest(&bytes)
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect();
            if &actual != expected {
                tracing::error!("Model artifact {:?} failed digest check", path);
                return Err(ScoringError::Integrity {
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        let model: ExportedForest = serde_json::from_slice(&bytes)
            .map_err(|e| ScoringError::InvalidModel(e.to_string()))?;
        model.validate()?;

        tracing::info!(
            "Loaded model from {:?} (n_trees={}, n_features={})",
            path,
            model.trees.len(),
            model.n_features
        );

        self.model = Some(model);
        Ok(())
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.trees.len())
    }

    fn model(&self) -> Result<&ExportedForest, ScoringError> {
        self.model
            .as_ref()
            .ok_or_else(|| ScoringError::ModelNotLoaded("no model artifact loaded".into()))
    }

    /// Mean "left" probability across trees for each row.
    ///
    /// # Errors
    /// Returns error if no model is loaded or the row width is wrong.
    pub fn predict_proba(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, ScoringError> {
        let model = self.model()?;

        rows.iter()
            .map(|row| {
                let x = row.as_slice();
                if x.len() != model.n_features {
                    return Err(ScoringError::ShapeMismatch {
                        expected: model.n_features,
                        got: x.len(),
                    });
                }
                let total: f64 = model.trees.iter().map(|t| t.left_probability(x)).sum();
                Ok(total / model.trees.len() as f64)
            })
            .collect()
    }
}

impl Classifier for ForestClassifier {
    fn n_features(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.n_features)
    }

    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<RetentionLabel>, ScoringError> {
        Ok(self
            .predict_proba(rows)?
            .into_iter()
            .map(|p| {
                if p > 0.5 {
                    RetentionLabel::Left
                } else {
                    RetentionLabel::Retained
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeProfile, FeatureEncoder, SalaryTier, FEATURE_COUNT};
    use std::io::Write;

    const DEMO_MODEL: &str = "models/employee_model.json";

    fn stump(feature: i64, threshold: f64, left: [f64; 2], right: [f64; 2]) -> ExportedTree {
        ExportedTree {
            children_left: vec![1, LEAF, LEAF],
            children_right: vec![2, LEAF, LEAF],
            feature: vec![feature, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![vec![0.0, 0.0], left.to_vec(), right.to_vec()],
        }
    }

    fn forest(trees: Vec<ExportedTree>) -> ExportedForest {
        ExportedForest {
            n_features: FEATURE_COUNT,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            n_classes: 2,
            trees,
        }
    }

    fn row(satisfaction: f64, department: &str) -> FeatureVector {
        FeatureEncoder
            .encode(&EmployeeProfile {
                satisfaction_level: satisfaction,
                number_project: 2,
                average_monthly_hours: 157.0,
                time_spend_company: 3,
                salary: SalaryTier::Low,
                department: department.into(),
            })
            .expect("Should encode")
    }

    #[test]
    fn test_stump_prediction() {
        // satisfaction <= 0.465 -> mostly left
        let clf = ForestClassifier::from_model(forest(vec![stump(
            0,
            0.465,
            [10.0, 90.0],
            [95.0, 5.0],
        )]))
        .expect("Should build");

        let labels = clf
            .predict(&[row(0.2, "sales"), row(0.9, "sales")])
            .expect("Should predict");
        assert_eq!(labels, vec![RetentionLabel::Left, RetentionLabel::Retained]);
    }

    #[test]
    fn test_probabilities_are_averaged() {
        let clf = ForestClassifier::from_model(forest(vec![
            stump(0, 0.5, [0.0, 10.0], [10.0, 0.0]),
            stump(0, 0.5, [10.0, 0.0], [10.0, 0.0]),
        ]))
        .expect("Should build");

        let p = clf.predict_proba(&[row(0.1, "hr")]).expect("Should predict");
        assert!((p[0] - 0.5).abs() < 1e-12);
        // Tie resolves to retained.
        assert_eq!(
            clf.predict(&[row(0.1, "hr")]).expect("Should predict"),
            vec![RetentionLabel::Retained]
        );
    }

    #[test]
    fn test_department_indicator_split() {
        // Feature 12 is the "sales" indicator.
        let clf = ForestClassifier::from_model(forest(vec![stump(
            12,
            0.5,
            [90.0, 10.0],
            [10.0, 90.0],
        )]))
        .expect("Should build");

        let labels = clf
            .predict(&[row(0.5, "sales"), row(0.5, "technical")])
            .expect("Should predict");
        assert_eq!(labels, vec![RetentionLabel::Left, RetentionLabel::Retained]);
    }

    #[test]
    fn test_unloaded_model_fails() {
        let clf = ForestClassifier::new();
        assert!(!clf.is_loaded());
        assert!(matches!(
            clf.predict(&[row(0.5, "hr")]),
            Err(ScoringError::ModelNotLoaded(_))
        ));
    }

    #[test]
    fn test_shape_mismatch() {
        let mut model = forest(vec![stump(0, 0.5, [1.0, 0.0], [0.0, 1.0])]);
        model.n_features = 15;
        model.feature_names.clear();
        let clf = ForestClassifier::from_model(model).expect("Should build");

        assert_eq!(
            clf.predict(&[row(0.5, "hr")]),
            Err(ScoringError::ShapeMismatch {
                expected: 15,
                got: FEATURE_COUNT
            })
        );
    }

    #[test]
    fn test_validation_rejects_bad_trees() {
        let mut cyclic = stump(0, 0.5, [1.0, 0.0], [0.0, 1.0]);
        cyclic.children_left[0] = 0;
        assert!(matches!(
            ForestClassifier::from_model(forest(vec![cyclic])),
            Err(ScoringError::InvalidModel(_))
        ));

        let mut bad_feature = stump(0, 0.5, [1.0, 0.0], [0.0, 1.0]);
        bad_feature.feature[0] = 20;
        assert!(ForestClassifier::from_model(forest(vec![bad_feature])).is_err());

        let empty_leaf = stump(0, 0.5, [0.0, 0.0], [0.0, 1.0]);
        assert!(ForestClassifier::from_model(forest(vec![empty_leaf])).is_err());

        assert!(ForestClassifier::from_model(forest(vec![])).is_err());

        let mut reordered = forest(vec![stump(0, 0.5, [1.0, 0.0], [0.0, 1.0])]);
        reordered.feature_names.swap(0, 1);
        assert!(ForestClassifier::from_model(reordered).is_err());
    }

    #[test]
    fn test_load_demo_model() {
        let mut clf = ForestClassifier::new();
        clf.load_model(Path::new(DEMO_MODEL))
            .expect("Demo model should load");
        assert_eq!(clf.n_features(), FEATURE_COUNT);
        assert_eq!(clf.n_trees(), 3);

        // Reference row from the dataset (left = 1).
        let labels = clf.predict(&[row(0.38, "sales")]).expect("Should predict");
        assert_eq!(labels, vec![RetentionLabel::Left]);

        let labels = clf.predict(&[row(0.9, "sales")]).expect("Should predict");
        assert_eq!(labels, vec![RetentionLabel::Retained]);
    }

    #[test]
    fn test_missing_artifact() {
        let mut clf = ForestClassifier::new();
        let err = clf
            .load_model(Path::new("models/does_not_exist.json"))
            .expect_err("Should fail");
        assert!(matches!(err, ScoringError::ModelNotLoaded(_)));
    }

    #[test]
    fn test_digest_pin() {
        let model = forest(vec![stump(0, 0.5, [1.0, 0.0], [0.0, 1.0])]);
        let bytes = serde_json::to_vec(&model).expect("serialize model");
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(&bytes).expect("write model");

        let digest: String = Sha256::digest(&bytes)
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();

        let mut pinned = ForestClassifier::new().with_expected_sha256(digest.to_uppercase());
        pinned.load_model(file.path()).expect("Digest should match");
        assert!(pinned.is_loaded());

        let mut wrong = ForestClassifier::new().with_expected_sha256("00".repeat(32));
        assert!(matches!(
            wrong.load_model(file.path()),
            Err(ScoringError::Integrity { .. })
        ));
        assert!(!wrong.is_loaded());
    }
}
