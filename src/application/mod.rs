//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod analytics;
mod evaluation;
mod prediction;

pub use analytics::{
    AnalyticsService, BoxSummary, CorrelationMatrix, DensityCurve, GroupCount,
    GroupedBoxSummary, NumericColumn, DENSITY_POINTS,
};
pub use evaluation::EvaluationSplit;
pub use prediction::PredictionService;
