//! Prediction service: Orchestrates a custom retention prediction.
//!
//! This service coordinates:
//! - Form validation
//! - Feature encoding
//! - Classifier scoring
//! - Result formatting with the held-out accuracy

use std::sync::Arc;

use crate::application::EvaluationSplit;
use crate::domain::{
    validate_submission, EmployeeProfile, FeatureEncoder, FormValues, PredictionResult,
};
use crate::ports::{Classifier, ScoringError};
use crate::StaywiseError;

/// Service answering prediction requests from the form.
///
/// Holds the explicitly initialized context: the loaded classifier and the
/// evaluation split. Both are read-only after construction.
pub struct PredictionService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
    evaluation: EvaluationSplit,
    encoder: FeatureEncoder,
}

impl<C> PredictionService<C>
where
    C: Classifier,
{
    /// Create a new prediction service.
    pub fn new(classifier: Arc<C>, evaluation: EvaluationSplit) -> Self {
        Self {
            classifier,
            evaluation,
            encoder: FeatureEncoder,
        }
    }

    /// Run the full pipeline on raw form values.
    ///
    /// Validation failures stop the request before the encoder runs.
    ///
    /// # Errors
    /// Returns `StaywiseError::Validation` for a rejected field,
    /// `StaywiseError::Encoding` for an unknown department and
    /// `StaywiseError::Scoring` if the classifier fails.
    pub fn predict(&self, form: &FormValues) -> Result<PredictionResult, StaywiseError> {
        let profile = validate_submission(form)?;
        self.predict_profile(&profile)
    }

    /// Run encoding and scoring on an already validated profile.
    ///
    /// # Errors
    /// Returns `StaywiseError::Encoding` or `StaywiseError::Scoring`.
    pub fn predict_profile(
        &self,
        profile: &EmployeeProfile,
    ) -> Result<PredictionResult, StaywiseError> {
        let vector = self.encoder.encode(profile)?;

        let label = self
            .classifier
            .predict(std::slice::from_ref(&vector))?
            .into_iter()
            .next()
            .ok_or_else(|| ScoringError::InvalidModel("classifier returned no label".into()))?;

        let accuracy = self.accuracy()?;
        let result = PredictionResult::new(label, accuracy);

        tracing::info!(
            "Prediction complete: label={}, accuracy={:.4}",
            label.class(),
            accuracy
        );

        Ok(result)
    }

    /// Accuracy of the classifier on the held-out split.
    ///
    /// # Errors
    /// Returns `ScoringError` if the model is unavailable or the split is empty.
    pub fn accuracy(&self) -> Result<f64, ScoringError> {
        self.classifier
            .score(self.evaluation.rows(), self.evaluation.labels())
    }

    /// Number of held-out rows used for accuracy.
    #[must_use]
    pub fn evaluation_size(&self) -> usize {
        self.evaluation.len()
    }

    #[must_use]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::forest::ForestClassifier;
    use crate::domain::{EmployeeRecord, FormField, RetentionLabel};
    use std::path::Path;

    fn evaluation() -> EvaluationSplit {
        let records = vec![
            EmployeeRecord {
                satisfaction_level: 0.38,
                last_evaluation: 0.53,
                number_project: 2,
                average_monthly_hours: 157.0,
                time_spend_company: 3,
                left: 1,
                department: "sales".into(),
                salary: "low".into(),
            },
            EmployeeRecord {
                satisfaction_level: 0.9,
                last_evaluation: 0.7,
                number_project: 4,
                average_monthly_hours: 200.0,
                time_spend_company: 3,
                left: 0,
                department: "IT".into(),
                salary: "high".into(),
            },
            EmployeeRecord {
                satisfaction_level: 0.6,
                last_evaluation: 0.8,
                number_project: 3,
                average_monthly_hours: 180.0,
                time_spend_company: 2,
                left: 1,
                department: "technical".into(),
                salary: "medium".into(),
            },
            EmployeeRecord {
                satisfaction_level: 0.75,
                last_evaluation: 0.9,
                number_project: 4,
                average_monthly_hours: 170.0,
                time_spend_company: 4,
                left: 0,
                department: "hr".into(),
                salary: "low".into(),
            },
        ];
        EvaluationSplit::holdout(&records, 0.0, 3).expect("Should split")
    }

    fn create_test_service() -> PredictionService<ForestClassifier> {
        let mut clf = ForestClassifier::new();
        clf.load_model(Path::new("models/employee_model.json"))
            .expect("Model should load for tests");
        PredictionService::new(Arc::new(clf), evaluation())
    }

    fn reference_form() -> FormValues {
        FormValues {
            satisfaction_level: "0.38".into(),
            number_project: "2".into(),
            average_monthly_hours: "157".into(),
            time_spend_company: "3".into(),
            salary: "1".into(),
            department: "sales".into(),
        }
    }

    #[test]
    fn test_reference_prediction() {
        let service = create_test_service();
        let result = service.predict(&reference_form()).expect("Should predict");

        assert_eq!(result.label, RetentionLabel::Left);
        // Reference row predicted left, the other three retained: 3 of 4 right.
        assert!((result.accuracy - 0.75).abs() < f64::EPSILON);
        assert_eq!(
            result.message,
            "The employee is less likely to retain (value returned was [1]) Model Accuracy: 0.75"
        );
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let service = create_test_service();
        let a = service.predict(&reference_form()).expect("Should predict");
        let b = service.predict(&reference_form()).expect("Should predict");
        assert_eq!(a.label, b.label);
        assert_eq!(a.message, b.message);
    }

    #[test]
    fn test_validation_error_names_field() {
        let service = create_test_service();
        let mut form = reference_form();
        form.satisfaction_level = "1.00".into();

        match service.predict(&form) {
            Err(StaywiseError::Validation(e)) => {
                assert_eq!(e.field, FormField::SatisfactionLevel)
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_department_is_encoding_error() {
        let service = create_test_service();
        let mut form = reference_form();
        form.department = "engineering".into();

        assert!(matches!(
            service.predict(&form),
            Err(StaywiseError::Encoding(_))
        ));
    }

    #[test]
    fn test_missing_model_is_scoring_error() {
        let service = PredictionService::new(Arc::new(ForestClassifier::new()), evaluation());

        assert!(matches!(
            service.predict(&reference_form()),
            Err(StaywiseError::Scoring(ScoringError::ModelNotLoaded(_)))
        ));
    }

    #[test]
    fn test_empty_evaluation_is_scoring_error() {
        let mut clf = ForestClassifier::new();
        clf.load_model(Path::new("models/employee_model.json"))
            .expect("Model should load for tests");
        let empty = EvaluationSplit::holdout(&[], 0.8, 1).expect("Should split");
        let service = PredictionService::new(Arc::new(clf), empty);

        assert!(matches!(
            service.predict(&reference_form()),
            Err(StaywiseError::Scoring(ScoringError::EmptyEvaluation))
        ));
    }
}
