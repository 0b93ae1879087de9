//! Dashboard color palette and styles.
//!
//! Outcome colors come from `RetentionLabel::color` so every view shows
//! retained and left employees the same way.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RetentionLabel;

/// Dashboard theme color palette.
pub struct DashboardTheme;

impl DashboardTheme {
    // === Primary Colors ===

    /// Indigo - Primary color
    pub const PRIMARY: Color = Color::Rgb(79, 70, 229); // #4F46E5

    /// Lighter indigo for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(129, 140, 248); // #818CF8

    /// Darker indigo for accents
    pub const PRIMARY_DARK: Color = Color::Rgb(55, 48, 163); // #3730A3

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    /// Amber - Warning
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose - Error
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Emerald - Success
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for the table header row
    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Color of an outcome (retained or left).
    #[must_use]
    pub fn outcome_color(label: RetentionLabel) -> Color {
        let (r, g, b) = label.color();
        Color::Rgb(r, g, b)
    }

    #[must_use]
    pub fn outcome(label: RetentionLabel) -> Style {
        Style::default()
            .fg(Self::outcome_color(label))
            .add_modifier(Modifier::BOLD)
    }

    /// Attrition rate style: low is good.
    #[must_use]
    pub fn attrition(rate: f64) -> Style {
        if rate < 0.15 {
            Self::success()
        } else if rate < 0.3 {
            Self::warning()
        } else {
            Self::danger()
        }
    }

    /// Diverging heatmap cell: blue for negative, red for positive.
    #[must_use]
    pub fn correlation(r: f64) -> Style {
        let strength = r.abs().clamp(0.0, 1.0);
        let fade = |full: u8| (f64::from(full) * strength + 30.0 * (1.0 - strength)) as u8;
        let bg = if r < 0.0 {
            Color::Rgb(fade(37), fade(99), fade(235))
        } else {
            Color::Rgb(fade(220), fade(38), fade(38))
        };
        let fg = if strength > 0.5 {
            Self::TEXT_PRIMARY
        } else {
            Self::TEXT_SECONDARY
        };
        Style::default().fg(fg).bg(bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_colors_follow_labels() {
        assert_eq!(
            DashboardTheme::outcome_color(RetentionLabel::Left),
            Color::Rgb(244, 63, 94)
        );
        assert_ne!(
            DashboardTheme::outcome_color(RetentionLabel::Left),
            DashboardTheme::outcome_color(RetentionLabel::Retained)
        );
    }

    #[test]
    fn test_correlation_style_direction() {
        let neg = DashboardTheme::correlation(-1.0);
        let pos = DashboardTheme::correlation(1.0);
        assert_eq!(neg.bg, Some(Color::Rgb(37, 99, 235)));
        assert_eq!(pos.bg, Some(Color::Rgb(220, 38, 38)));
        assert_eq!(
            DashboardTheme::correlation(0.0).bg,
            Some(Color::Rgb(30, 30, 30))
        );
    }
}
