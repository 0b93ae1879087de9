//! Prediction result types.
//!
//! Represents the output of the retention classifier for one employee.

use serde::{Deserialize, Serialize};

/// Classifier output label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetentionLabel {
    /// Label 0: the employee stays
    Retained,
    /// Label 1: the employee leaves
    Left,
}

impl RetentionLabel {
    /// Label from its numeric class (0 or 1).
    #[must_use]
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(Self::Retained),
            1 => Some(Self::Left),
            _ => None,
        }
    }

    /// Numeric class as used in the dataset's `left` column.
    #[must_use]
    pub fn class(&self) -> u8 {
        match self {
            Self::Retained => 0,
            Self::Left => 1,
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Retained => "highly likely to retain",
            Self::Left => "less likely to retain",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Retained => (16, 185, 129), // Emerald (#10B981)
            Self::Left => (244, 63, 94),      // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RetentionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retained => write!(f, "RETAINED"),
            Self::Left => write!(f, "LEFT"),
        }
    }
}

/// Outcome of a single prediction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted label
    pub label: RetentionLabel,

    /// Accuracy of the classifier on the held-out split (0.0 to 1.0)
    pub accuracy: f64,

    /// Text shown in the form's output row
    pub message: String,

    /// Timestamp of the prediction
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PredictionResult {
    /// Create a result and format its message.
    #[must_use]
    pub fn new(label: RetentionLabel, accuracy: f64) -> Self {
        Self {
            label,
            accuracy,
            message: Self::format_message(label, accuracy),
            created_at: chrono::Utc::now(),
        }
    }

    /// Message carrying the verdict, the raw label and the accuracy.
    #[must_use]
    pub fn format_message(label: RetentionLabel, accuracy: f64) -> String {
        format!(
            "The employee is {} (value returned was [{}]) Model Accuracy: {}",
            label.description(),
            label.class(),
            accuracy
        )
    }
}
