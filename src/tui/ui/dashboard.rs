//! Dashboard view: Retention overview with salary and department charts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::application::GroupCount;
use crate::domain::RetentionLabel;
use crate::tui::theme::DashboardTheme;

use super::{key_hints, render_header};

/// Dashboard state for rendering.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub record_count: usize,
    pub attrition_rate: Option<f64>,
    pub salary_counts: Vec<GroupCount>,
    pub department_counts: Vec<GroupCount>,
    pub model_loaded: bool,
    pub model_trees: usize,
    pub evaluation_size: usize,
    pub accuracy: Option<f64>,
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0], "Staywise", "Employee Attrition Dashboard");
    render_main_content(f, chunks[1], state);
}

fn render_main_content(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Status panels
            Constraint::Percentage(70), // Charts
        ])
        .split(area);

    render_status_panels(f, chunks[0], state);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_group_chart(f, charts[0], " Salary vs Retention ", &state.salary_counts, 5);
    render_group_chart(
        f,
        charts[1],
        " Department vs Retention ",
        &state.department_counts,
        2,
    );
}

fn render_status_panels(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Dataset and model status
            Constraint::Min(0),    // Actions
        ])
        .margin(1)
        .split(area);

    let attrition = match state.attrition_rate {
        Some(rate) => Span::styled(
            format!("{:.1}%", rate * 100.0),
            DashboardTheme::attrition(rate),
        ),
        None => Span::styled("n/a", DashboardTheme::text_muted()),
    };
    let accuracy = match state.accuracy {
        Some(acc) => Span::styled(format!("{acc:.4}"), DashboardTheme::text()),
        None => Span::styled("unavailable", DashboardTheme::danger()),
    };

    let status_items = vec![
        Line::from(vec![
            Span::styled("  Employees: ", DashboardTheme::text_secondary()),
            Span::styled(state.record_count.to_string(), DashboardTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Attrition: ", DashboardTheme::text_secondary()),
            attrition,
        ]),
        Line::from(""),
        format_status_item("Model Loaded", state.model_loaded),
        Line::from(vec![
            Span::styled("  Trees: ", DashboardTheme::text_secondary()),
            Span::styled(state.model_trees.to_string(), DashboardTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Held-out rows: ", DashboardTheme::text_secondary()),
            Span::styled(state.evaluation_size.to_string(), DashboardTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Accuracy: ", DashboardTheme::text_secondary()),
            accuracy,
        ]),
    ];

    let status_block = Block::default()
        .title(Span::styled(" Status ", DashboardTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(DashboardTheme::border());

    f.render_widget(Paragraph::new(status_items).block(status_block), chunks[0]);

    let actions = vec![
        key_hints(&[("P", "Predict Retention")]),
        key_hints(&[("C", "Correlation")]),
        key_hints(&[("D", "Distributions")]),
        key_hints(&[("Q", "Quit")]),
        Line::from(""),
        Line::from(vec![
            Span::styled("■ ", DashboardTheme::outcome(RetentionLabel::Retained)),
            Span::styled("retained  ", DashboardTheme::text_secondary()),
            Span::styled("■ ", DashboardTheme::outcome(RetentionLabel::Left)),
            Span::styled("left", DashboardTheme::text_secondary()),
        ]),
    ];

    let actions_block = Block::default()
        .title(Span::styled(" Actions ", DashboardTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(DashboardTheme::border());

    f.render_widget(Paragraph::new(actions).block(actions_block), chunks[1]);
}

fn format_status_item(label: &str, ok: bool) -> Line<'static> {
    let (icon, style) = if ok {
        ("OK", DashboardTheme::success())
    } else {
        ("FAIL", DashboardTheme::danger())
    };

    Line::from(vec![
        Span::styled(format!("  {icon} "), style),
        Span::styled(label.to_string(), DashboardTheme::text()),
    ])
}

fn outcome_bar(value: u64, label: RetentionLabel) -> Bar<'static> {
    Bar::default()
        .value(value)
        .style(Style::default().fg(DashboardTheme::outcome_color(label)))
        .value_style(DashboardTheme::header())
}

/// Grouped bar chart of retained and left counts per key.
fn render_group_chart(f: &mut Frame, area: Rect, title: &str, groups: &[GroupCount], bar_width: u16) {
    let block = Block::default()
        .title(Span::styled(title.to_string(), DashboardTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(DashboardTheme::border());

    if groups.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No records loaded.",
            DashboardTheme::text_muted(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(2)
        .label_style(DashboardTheme::text_secondary());

    for group in groups {
        let bars = [
            outcome_bar(group.retained, RetentionLabel::Retained),
            outcome_bar(group.left, RetentionLabel::Left),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(group.key.clone()))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}
