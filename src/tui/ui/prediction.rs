//! Custom prediction form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{FormField, FormValues, PredictionResult, SalaryTier, DEPARTMENTS};
use crate::tui::theme::DashboardTheme;

use super::{key_hints, render_header};

/// What the output row currently shows.
#[derive(Debug, Clone)]
pub enum FormOutput {
    Prediction(PredictionResult),
    Error(String),
}

/// Prediction form state.
///
/// Selectors start unselected; submitting without a choice is rejected.
#[derive(Debug, Default)]
pub struct PredictionFormState {
    pub values: FormValues,
    pub selected_field: usize,
    pub salary_choice: Option<usize>,
    pub department_choice: Option<usize>,
    pub output: Option<FormOutput>,
    pub invalid_field: Option<FormField>,
}

fn cycle(current: Option<usize>, len: usize, forward: bool) -> usize {
    match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(0), false) => len - 1,
        (Some(i), false) => i - 1,
    }
}

impl PredictionFormState {
    #[must_use]
    pub fn field(&self) -> FormField {
        FormField::ALL[self.selected_field]
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % FormField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = FormField::ALL.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current text field. Selectors ignore typing.
    pub fn input_char(&mut self, c: char) {
        if self.field().validator().is_none() {
            return;
        }
        if c.is_ascii_digit() || c == '.' {
            self.values.get_mut(self.field()).push(c);
            self.invalid_field = None;
        }
    }

    pub fn delete_char(&mut self) {
        if self.field().validator().is_some() {
            self.values.get_mut(self.field()).pop();
        }
    }

    pub fn clear_field(&mut self) {
        if self.field().validator().is_some() {
            self.values.get_mut(self.field()).clear();
        }
    }

    /// Step the current selector forward or back. Text fields are unaffected.
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.field() {
            FormField::Salary => {
                let i = cycle(self.salary_choice, SalaryTier::ALL.len(), forward);
                self.salary_choice = Some(i);
                self.values.salary = SalaryTier::ALL[i].code().to_string();
            }
            FormField::Department => {
                let i = cycle(self.department_choice, DEPARTMENTS.len(), forward);
                self.department_choice = Some(i);
                self.values.department = DEPARTMENTS[i].as_str().to_string();
            }
            _ => return,
        }
        self.invalid_field = None;
    }

    /// Text displayed for a field's current value.
    fn display_value(&self, field: FormField) -> Option<String> {
        match field {
            FormField::Salary => self
                .salary_choice
                .map(|i| format!("◀ {} ▶", SalaryTier::ALL[i].label())),
            FormField::Department => self
                .department_choice
                .map(|i| format!("◀ {} ▶", DEPARTMENTS[i].label())),
            other => {
                let raw = self.values.get(other);
                (!raw.is_empty()).then(|| raw.to_string())
            }
        }
    }
}

/// Render the prediction form
pub fn render_prediction_form(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(4), // Output row
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], "Custom Prediction", "Retention Predictor");
    render_form_fields(f, chunks[1], state);
    render_output(f, chunks[2], state);

    let footer = Paragraph::new(key_hints(&[
        ("↑↓", "Navigate"),
        ("←→", "Select"),
        ("Enter", "Submit"),
        ("Esc", "Back"),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(DashboardTheme::border()),
    );
    f.render_widget(footer, chunks[3]);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = FormField::ALL.len().div_ceil(2);
    render_field_column(f, columns[0], state, &FormField::ALL[..mid], 0);
    render_field_column(f, columns[1], state, &FormField::ALL[mid..], mid);
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    state: &PredictionFormState,
    fields: &[FormField],
    offset: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == state.selected_field;
        let is_invalid = state.invalid_field == Some(*field);

        let border_style = if is_invalid {
            DashboardTheme::danger()
        } else if is_selected {
            DashboardTheme::border_focused()
        } else {
            DashboardTheme::border()
        };

        let title_style = if is_selected {
            DashboardTheme::focused()
        } else {
            DashboardTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = match state.display_value(*field) {
            Some(v) => Span::styled(v, DashboardTheme::text()),
            None => Span::styled(field.hint(), DashboardTheme::text_muted()),
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected && field.validator().is_some() {
                Span::styled("▌", DashboardTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}

fn render_output(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let line = match &state.output {
        Some(FormOutput::Prediction(result)) => Line::from(vec![
            Span::styled(format!("{} ", result.label), DashboardTheme::outcome(result.label)),
            Span::styled(result.message.clone(), DashboardTheme::text()),
        ]),
        Some(FormOutput::Error(message)) => Line::from(vec![
            Span::styled("! ", DashboardTheme::danger()),
            Span::styled(message.clone(), DashboardTheme::danger()),
        ]),
        None => Line::from(Span::styled(
            "Fill in the form and press [Enter].",
            DashboardTheme::text_muted(),
        )),
    };

    let block = Block::default()
        .title(Span::styled(" Output ", DashboardTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(DashboardTheme::border());

    f.render_widget(
        Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_only_reaches_text_fields() {
        let mut state = PredictionFormState::default();
        for c in "0.4x5".chars() {
            state.input_char(c);
        }
        assert_eq!(state.values.satisfaction_level, "0.45");

        state.selected_field = 4; // salary
        state.input_char('2');
        assert_eq!(state.values.salary, "");
    }

    #[test]
    fn test_selectors_cycle_and_fill_values() {
        let mut state = PredictionFormState::default();
        state.selected_field = 4;
        state.cycle_choice(true);
        assert_eq!(state.values.salary, "1");
        state.cycle_choice(false);
        assert_eq!(state.values.salary, "3");

        state.next_field();
        assert_eq!(state.field(), FormField::Department);
        state.cycle_choice(false);
        assert_eq!(state.values.department, "technical");
        state.cycle_choice(true);
        assert_eq!(state.values.department, "IT");
    }

    #[test]
    fn test_cycle_on_text_field_is_noop() {
        let mut state = PredictionFormState::default();
        state.cycle_choice(true);
        assert_eq!(state.values, FormValues::default());
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut state = PredictionFormState::default();
        state.prev_field();
        assert_eq!(state.field(), FormField::Department);
        state.next_field();
        assert_eq!(state.field(), FormField::SatisfactionLevel);
    }
}
