//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O. Validation and
//! feature encoding live here because they are pure functions over
//! form values.

mod employee;
pub mod encoding;
mod prediction;
pub mod validation;

pub use employee::{
    Department, EmployeeProfile, EmployeeRecord, FormValues, SalaryTier, DEPARTMENTS,
};
pub use encoding::{EncodingError, FeatureEncoder, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use prediction::{PredictionResult, RetentionLabel};
pub use validation::{validate_submission, FormField, ValidationError};
