//! Correlation heatmap of the encoded columns.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::application::CorrelationMatrix;
use crate::tui::theme::DashboardTheme;

use super::{key_hints, render_header};

const CELL_WIDTH: u16 = 6;

#[derive(Debug, Default)]
pub struct CorrelationState {
    pub matrix: Option<CorrelationMatrix>,
}

/// Short column header; the heatmap has sixteen columns.
fn short_name(column: &str) -> &str {
    match column {
        "satisfaction_level" => "satis",
        "number_project" => "proj",
        "average_montly_hours" => "hours",
        "time_spend_company" => "tenure",
        "accounting" => "acct",
        "management" => "mgmt",
        "marketing" => "mkt",
        "product_mng" => "prod",
        "support" => "supp",
        "technical" => "tech",
        other => other,
    }
}

pub fn render_correlation(f: &mut Frame, area: Rect, state: &CorrelationState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Heatmap
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], "Correlation", "Pearson r, lower triangle");

    let block = Block::default()
        .title(Span::styled(" Heatmap ", DashboardTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(DashboardTheme::border());

    match &state.matrix {
        Some(matrix) => f.render_widget(heatmap(matrix).block(block), chunks[1]),
        None => f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No correlation data.",
                DashboardTheme::text_muted(),
            )))
            .block(block),
            chunks[1],
        ),
    }

    let footer = Paragraph::new(key_hints(&[("Esc", "Back")])).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(DashboardTheme::border()),
    );
    f.render_widget(footer, chunks[2]);
}

fn heatmap(matrix: &CorrelationMatrix) -> Table<'static> {
    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(
                matrix
                    .columns
                    .iter()
                    .map(|c| Cell::from(short_name(c).to_string())),
            )
            .collect::<Vec<_>>(),
    )
    .style(DashboardTheme::header());

    let rows: Vec<Row> = matrix
        .columns
        .iter()
        .zip(&matrix.values)
        .map(|(name, values)| {
            let label = Cell::from(name.clone()).style(DashboardTheme::text_secondary());
            let cells = values.iter().map(|v| match v {
                Some(r) => Cell::from(format!("{r:+.2}")).style(DashboardTheme::correlation(*r)),
                None => Cell::from(""),
            });
            Row::new(std::iter::once(label).chain(cells).collect::<Vec<_>>())
        })
        .collect();

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(21))
        .chain(matrix.columns.iter().map(|_| Constraint::Length(CELL_WIDTH)))
        .collect();

    Table::new(rows, widths).header(header).column_spacing(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_names_fit_cells() {
        let names = [
            "satisfaction_level",
            "number_project",
            "average_montly_hours",
            "time_spend_company",
            "salary",
            "product_mng",
            "management",
        ];
        for name in names {
            assert!(short_name(name).len() <= CELL_WIDTH as usize, "{name}");
        }
    }
}
