//! Classifier port: Trait for the pre-trained retention model.
//!
//! The model is opaque to the application: it only needs to label
//! feature rows. Accuracy scoring is derived from `predict`.

use crate::domain::{FeatureVector, RetentionLabel};

/// Errors that can occur while scoring with the classifier.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("Model not loaded: {0}")]
    ModelNotLoaded(String),

    #[error("Feature shape mismatch: model expects {expected} features, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Label count mismatch: {rows} rows but {labels} labels")]
    LabelCountMismatch { rows: usize, labels: usize },

    #[error("Evaluation split is empty")]
    EmptyEvaluation,

    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("Model artifact digest mismatch: expected {expected}, got {actual}")]
    Integrity { expected: String, actual: String },
}

/// Trait for a fitted binary classifier.
///
/// Implementations are immutable once loaded and may be shared across
/// requests.
pub trait Classifier: Send + Sync {
    /// Number of features the model was fitted on.
    fn n_features(&self) -> usize;

    /// Predict a label for each row.
    ///
    /// # Errors
    /// Returns `ScoringError::ShapeMismatch` if the rows do not have the
    /// width the model was fitted on.
    fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<RetentionLabel>, ScoringError>;

    /// Mean accuracy of `predict(rows)` against `labels`.
    ///
    /// # Errors
    /// Returns `ScoringError::EmptyEvaluation` for an empty set and
    /// `ScoringError::LabelCountMismatch` if the lengths differ.
    fn score(&self, rows: &[FeatureVector], labels: &[RetentionLabel]) -> Result<f64, ScoringError> {
        if rows.len() != labels.len() {
            return Err(ScoringError::LabelCountMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if rows.is_empty() {
            return Err(ScoringError::EmptyEvaluation);
        }

        let predicted = self.predict(rows)?;
        let correct = predicted
            .iter()
            .zip(labels)
            .filter(|(p, y)| p == y)
            .count();

        Ok(correct as f64 / labels.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeProfile, FeatureEncoder, SalaryTier};

    /// Labels everyone with satisfaction below 0.5 as leaving.
    struct ThresholdClassifier;

    impl Classifier for ThresholdClassifier {
        fn n_features(&self) -> usize {
            crate::domain::FEATURE_COUNT
        }

        fn predict(&self, rows: &[FeatureVector]) -> Result<Vec<RetentionLabel>, ScoringError> {
            Ok(rows
                .iter()
                .map(|r| {
                    if r[0] < 0.5 {
                        RetentionLabel::Left
                    } else {
                        RetentionLabel::Retained
                    }
                })
                .collect())
        }
    }

    fn row(satisfaction: f64) -> FeatureVector {
        FeatureEncoder
            .encode(&EmployeeProfile {
                satisfaction_level: satisfaction,
                number_project: 3,
                average_monthly_hours: 160.0,
                time_spend_company: 3,
                salary: SalaryTier::Medium,
                department: "support".into(),
            })
            .expect("Should encode")
    }

    #[test]
    fn test_default_score() {
        let rows = vec![row(0.1), row(0.9), row(0.2), row(0.8)];
        let labels = vec![
            RetentionLabel::Left,
            RetentionLabel::Retained,
            RetentionLabel::Retained,
            RetentionLabel::Retained,
        ];

        let accuracy = ThresholdClassifier.score(&rows, &labels).expect("Should score");
        assert!((accuracy - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_rejects_empty_and_mismatched() {
        assert_eq!(
            ThresholdClassifier.score(&[], &[]),
            Err(ScoringError::EmptyEvaluation)
        );
        assert_eq!(
            ThresholdClassifier.score(&[row(0.1)], &[]),
            Err(ScoringError::LabelCountMismatch { rows: 1, labels: 0 })
        );
    }
}
