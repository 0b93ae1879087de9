//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides:
//! - Dashboard with retention charts and model status
//! - Correlation heatmap
//! - Distribution curves and box summaries
//! - Custom prediction form

mod app;
mod theme;
mod ui;

pub use app::{App, Screen};
pub use theme::DashboardTheme;
