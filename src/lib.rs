//! # Staywise
//!
//! Employee attrition dashboard and retention predictor.
//!
//! This crate provides:
//! - Descriptive statistics over the HR attrition dataset
//! - Validation and encoding of a single employee profile
//! - Retention prediction with a pre-trained random forest
//! - Terminal UI presenting both
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (employee profile, validation, encoding)
//! - `ports`: Trait definitions for the dataset and classifier
//! - `adapters`: Concrete implementations (CSV file, JSON forest export)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface
//!
//! ## Running
//!
//! The HR attrition CSV (`HR_comma_sep.csv` layout) is not bundled. Point
//! `STAYWISE_DATASET_PATH` at it, or place it at `data/HR_comma_sep.csv`;
//! startup fails without it. The other `STAYWISE_*` variables are listed in
//! [`config`].
//!
//! `models/employee_model.json` is a small demo forest so the predictor
//! works out of the box. Its accuracy figure describes that demo model.
//! Replace it via `STAYWISE_MODEL_PATH` with an export of a fitted forest
//! (layout in [`adapters::forest`]).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::AppConfig;
pub use domain::{EmployeeProfile, FeatureVector, FormValues, PredictionResult, RetentionLabel};

/// Result type for Staywise operations
pub type Result<T> = std::result::Result<T, StaywiseError>;

/// Main error type for Staywise
#[derive(Debug, thiserror::Error)]
pub enum StaywiseError {
    #[error("Invalid input: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Encoding failed: {0}")]
    Encoding(#[from] domain::EncodingError),

    #[error("Scoring failed: {0}")]
    Scoring(#[from] ports::ScoringError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] ports::DatasetError),
}
