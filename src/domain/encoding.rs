//! Feature encoding: employee profile to classifier input.
//!
//! The classifier was fitted on five scalar columns followed by the
//! department dummies with `technical` dropped as the baseline category,
//! so `technical` encodes as all-zero indicators.

use serde::{Deserialize, Serialize};

use super::employee::{Department, EmployeeProfile};

/// Length of the feature vector.
pub const FEATURE_COUNT: usize = 14;

/// Number of department indicator columns.
pub const INDICATOR_COUNT: usize = 9;

/// Column order used to fit the classifier.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "satisfaction_level",
    "number_project",
    "average_montly_hours",
    "time_spend_company",
    "salary",
    "IT",
    "RandD",
    "accounting",
    "hr",
    "management",
    "marketing",
    "product_mng",
    "sales",
    "support",
];

/// Offset of the first department indicator in the vector.
const INDICATOR_OFFSET: usize = FEATURE_COUNT - INDICATOR_COUNT;

/// Errors produced while encoding features.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("Unknown department: {0:?}")]
    UnknownDepartment(String),
}

impl Department {
    /// Indicator column set to 1 for this department.
    ///
    /// `None` for the baseline (`technical`), which has no column.
    #[must_use]
    pub fn indicator_index(&self) -> Option<usize> {
        match self {
            Self::It => Some(0),
            Self::RandD => Some(1),
            Self::Accounting => Some(2),
            Self::Hr => Some(3),
            Self::Management => Some(4),
            Self::Marketing => Some(5),
            Self::ProductMng => Some(6),
            Self::Sales => Some(7),
            Self::Support => Some(8),
            Self::Technical => None,
        }
    }

    /// One-hot indicators over the nine non-baseline departments.
    #[must_use]
    pub fn one_hot(&self) -> [f64; INDICATOR_COUNT] {
        let mut indicators = [0.0; INDICATOR_COUNT];
        if let Some(i) = self.indicator_index() {
            indicators[i] = 1.0;
        }
        indicators
    }
}

/// Ordered numeric input for the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The nine department indicator values.
    #[must_use]
    pub fn department_indicators(&self) -> &[f64] {
        &self.0[INDICATOR_OFFSET..]
    }
}

impl std::ops::Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Builds feature vectors in the training column order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Encode a validated profile.
    ///
    /// # Errors
    /// Returns `EncodingError::UnknownDepartment` if the department is not
    /// one of the ten known categories. An unknown department is never
    /// mapped to the baseline.
    pub fn encode(&self, profile: &EmployeeProfile) -> Result<FeatureVector, EncodingError> {
        let department: Department = profile.department.parse()?;

        let mut values = [0.0; FEATURE_COUNT];
        values[0] = profile.satisfaction_level;
        values[1] = f64::from(profile.number_project);
        values[2] = profile.average_monthly_hours;
        values[3] = f64::from(profile.time_spend_company);
        values[4] = f64::from(profile.salary.code());
        values[INDICATOR_OFFSET..].copy_from_slice(&department.one_hot());

        Ok(FeatureVector(values))
    }
}
