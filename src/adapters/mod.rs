//! Adapters layer: Concrete implementations of ports.
//!
//! - `csv_dataset`: csv-backed dataset source
//! - `forest`: random forest classifier loaded from a JSON export

pub mod csv_dataset;
pub mod forest;
