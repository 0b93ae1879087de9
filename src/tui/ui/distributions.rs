//! Distribution view: density curve and box summaries per numeric column.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table},
    Frame,
};

use crate::application::{BoxSummary, DensityCurve, GroupedBoxSummary, NumericColumn};
use crate::domain::RetentionLabel;
use crate::tui::theme::DashboardTheme;

use super::{key_hints, render_header};

/// Distribution screen state.
#[derive(Debug, Default)]
pub struct DistributionState {
    pub column_index: usize,
    pub density: Option<DensityCurve>,
    pub boxes: Option<GroupedBoxSummary>,
}

impl DistributionState {
    #[must_use]
    pub fn column(&self) -> NumericColumn {
        NumericColumn::ALL[self.column_index % NumericColumn::ALL.len()]
    }

    pub fn next_column(&mut self) {
        self.column_index = (self.column_index + 1) % NumericColumn::ALL.len();
    }

    pub fn prev_column(&mut self) {
        if self.column_index == 0 {
            self.column_index = NumericColumn::ALL.len() - 1;
        } else {
            self.column_index -= 1;
        }
    }
}

pub fn render_distributions(f: &mut Frame, area: Rect, state: &DistributionState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Density chart
            Constraint::Length(6), // Box summaries
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let position = format!(
        "{} ({}/{})",
        state.column().name(),
        state.column_index + 1,
        NumericColumn::ALL.len()
    );
    render_header(f, chunks[0], "Distributions", &position);

    render_density(f, chunks[1], state.density.as_ref());
    render_boxes(f, chunks[2], state.boxes.as_ref());

    let footer = Paragraph::new(key_hints(&[("←→", "Column"), ("Esc", "Back")])).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(DashboardTheme::border()),
    );
    f.render_widget(footer, chunks[3]);
}

fn render_density(f: &mut Frame, area: Rect, curve: Option<&DensityCurve>) {
    let block = Block::default()
        .title(Span::styled(" Density ", DashboardTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(DashboardTheme::border());

    let Some(curve) = curve else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "Not enough distinct values for a density estimate.",
            DashboardTheme::text_muted(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    };

    let (x_min, x_max) = match (curve.points.first(), curve.points.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => (0.0, 1.0),
    };
    let y_max = curve
        .points
        .iter()
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max)
        * 1.1;

    let dataset = Dataset::default()
        .name(format!("bw={:.3}", curve.bandwidth))
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(DashboardTheme::focused())
        .data(&curve.points);

    let x_axis = Axis::default()
        .title(Span::styled(curve.column.name(), DashboardTheme::text_secondary()))
        .style(DashboardTheme::border())
        .bounds([x_min, x_max])
        .labels(vec![
            format!("{x_min:.2}"),
            format!("{:.2}", (x_min + x_max) / 2.0),
            format!("{x_max:.2}"),
        ]);
    let y_axis = Axis::default()
        .style(DashboardTheme::border())
        .bounds([0.0, y_max])
        .labels(vec!["0".to_string(), format!("{y_max:.3}")]);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);

    f.render_widget(chart, area);
}

fn summary_row(label: RetentionLabel, summary: Option<&BoxSummary>) -> Row<'static> {
    let name = match label {
        RetentionLabel::Retained => "retained",
        RetentionLabel::Left => "left",
    };
    let head = Cell::from(name).style(DashboardTheme::outcome(label));

    let Some(s) = summary else {
        return Row::new(vec![head, Cell::from("no rows")]);
    };

    let mut cells = vec![head, Cell::from(s.count.to_string())];
    cells.extend(
        [s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker]
            .into_iter()
            .map(|v| Cell::from(format!("{v:.2}"))),
    );
    cells.push(Cell::from(s.outliers.to_string()));

    Row::new(cells)
}

fn render_boxes(f: &mut Frame, area: Rect, boxes: Option<&GroupedBoxSummary>) {
    let block = Block::default()
        .title(Span::styled(" Box Summary ", DashboardTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(DashboardTheme::border());

    let header = Row::new(vec![
        "", "count", "low", "q1", "median", "q3", "high", "outliers",
    ])
    .style(DashboardTheme::header());

    let rows = vec![
        summary_row(
            RetentionLabel::Retained,
            boxes.and_then(|b| b.retained.as_ref()),
        ),
        summary_row(RetentionLabel::Left, boxes.and_then(|b| b.left.as_ref())),
    ];

    let widths = [Constraint::Length(10); 8];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_cycling_wraps() {
        let mut state = DistributionState::default();
        assert_eq!(state.column(), NumericColumn::SatisfactionLevel);

        state.prev_column();
        assert_eq!(state.column(), NumericColumn::TimeSpendCompany);

        state.next_column();
        state.next_column();
        assert_eq!(state.column(), NumericColumn::LastEvaluation);
    }
}
