//! Dataset port: Trait for reading the HR attrition dataset.
//!
//! This trait abstracts the tabular source (CSV file) from the
//! application logic.

use crate::domain::EmployeeRecord;

/// Errors that can occur while loading the dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid value in row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

/// Trait for a read-only source of employee records.
pub trait DatasetSource: Send + Sync {
    /// Error type for load operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every row, in file order.
    ///
    /// # Errors
    /// Returns error if the source cannot be read or a row is malformed.
    fn load_records(&self) -> Result<Vec<EmployeeRecord>, Self::Error>;

    /// Load rows with exact duplicates removed, keeping first occurrences.
    ///
    /// # Errors
    /// Returns error if the source cannot be read or a row is malformed.
    fn load_unique_records(&self) -> Result<Vec<EmployeeRecord>, Self::Error>;
}
