//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (model artifact, dataset).

mod classifier;
mod dataset;

pub use classifier::{Classifier, ScoringError};
pub use dataset::{DatasetError, DatasetSource};
