//! UI module: View components for the TUI.

pub mod correlation;
pub mod dashboard;
pub mod distributions;
pub mod prediction;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::theme::DashboardTheme;

/// Header line shared by every screen.
pub fn render_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", DashboardTheme::text()),
        Span::styled(title.to_string(), DashboardTheme::title()),
        Span::styled(" │ ", DashboardTheme::text_muted()),
        Span::styled(subtitle.to_string(), DashboardTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(DashboardTheme::border()),
    );

    f.render_widget(header, area);
}

const DISCLAIMER: [&str; 2] = [
    "Predictions are indicative only. The bundled model is a small demo forest; set STAYWISE_MODEL_PATH to a fitted export.",
    "Accuracy is measured on a held-out split of the de-duplicated dataset and describes the loaded model.",
];

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text: Vec<Line> = DISCLAIMER
        .iter()
        .map(|line| Line::from(Span::styled(*line, DashboardTheme::text_muted())))
        .collect();

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(DashboardTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Key hint line, e.g. `[Esc] Back`.
pub fn key_hints(hints: &[(&str, &str)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{key}] "), DashboardTheme::key_hint()),
                Span::styled(format!("{desc} "), DashboardTheme::key_desc()),
            ]
        })
        .collect();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disclaimer_flags_demo_model() {
        assert!(DISCLAIMER[0].contains("demo"));
        assert!(DISCLAIMER[0].contains("STAYWISE_MODEL_PATH"));
    }

    #[test]
    fn test_key_hints_layout() {
        let line = key_hints(&[("Esc", "Back")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[Esc] Back ");
    }
}
