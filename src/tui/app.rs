//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::csv_dataset::CsvDataset;
use crate::adapters::forest::ForestClassifier;
use crate::application::{AnalyticsService, EvaluationSplit, PredictionService, DENSITY_POINTS};
use crate::config::AppConfig;
use crate::StaywiseError;

use super::ui::{
    correlation::{render_correlation, CorrelationState},
    dashboard::{render_dashboard, DashboardState},
    distributions::{render_distributions, DistributionState},
    prediction::{render_prediction_form, FormOutput, PredictionFormState},
    render_disclaimer,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Correlation,
    Distributions,
    PredictionForm,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,

    prediction_service: PredictionService<ForestClassifier>,
    analytics_service: AnalyticsService,

    dashboard_state: DashboardState,
    correlation_state: CorrelationState,
    distribution_state: DistributionState,
    form_state: PredictionFormState,
}

impl App {
    /// Create a new application instance from configuration.
    ///
    /// Loads the dataset, prepares the evaluation split and loads the model.
    /// A model that fails to load is logged and left unloaded so the
    /// dashboard still works; predictions then report the failure.
    ///
    /// # Errors
    /// Returns error if the dataset cannot be read or encoded.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let dataset = CsvDataset::new(&config.dataset_path);

        let (records, unique) = dataset.load_all_and_unique().map_err(|e| {
            anyhow!(
                "Failed to load dataset from {:?}: {}. Set STAYWISE_DATASET_PATH to the HR CSV file.",
                config.dataset_path,
                e
            )
        })?;

        let evaluation =
            EvaluationSplit::holdout(&unique, config.train_fraction, config.split_seed)?;

        let mut classifier = ForestClassifier::new();
        if let Some(digest) = &config.model_sha256 {
            classifier = classifier.with_expected_sha256(digest.as_str());
        }
        if let Err(e) = classifier.load_model(&config.model_path) {
            tracing::warn!("Model unavailable, predictions disabled: {}", e);
        }

        let prediction_service = PredictionService::new(Arc::new(classifier), evaluation);
        let analytics_service = AnalyticsService::new(records);

        Ok(Self::with_dependencies(prediction_service, analytics_service))
    }

    /// Create application with injected services (Composition Root pattern).
    #[must_use]
    pub fn with_dependencies(
        prediction_service: PredictionService<ForestClassifier>,
        analytics_service: AnalyticsService,
    ) -> Self {
        let mut app = Self {
            screen: Screen::Dashboard,
            should_quit: false,
            prediction_service,
            analytics_service,
            dashboard_state: DashboardState::default(),
            correlation_state: CorrelationState::default(),
            distribution_state: DistributionState::default(),
            form_state: PredictionFormState::default(),
        };
        app.update_dashboard_state();
        app
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let content_area = chunks[0];
                match self.screen {
                    Screen::Dashboard => render_dashboard(f, content_area, &self.dashboard_state),
                    Screen::Correlation => {
                        render_correlation(f, content_area, &self.correlation_state)
                    }
                    Screen::Distributions => {
                        render_distributions(f, content_area, &self.distribution_state)
                    }
                    Screen::PredictionForm => {
                        render_prediction_form(f, content_area, &self.form_state)
                    }
                }

                render_disclaimer(f, chunks[1]);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if key == KeyCode::Esc {
            self.screen = Screen::Dashboard;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Distributions => self.handle_distributions_key(key),
            Screen::PredictionForm => self.handle_form_key(key),
            Screen::Correlation => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if self.correlation_state.matrix.is_none() {
                    self.correlation_state.matrix =
                        Some(self.analytics_service.correlation_matrix());
                }
                self.screen = Screen::Correlation;
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.load_distribution();
                self.screen = Screen::Distributions;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.screen = Screen::PredictionForm;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_distributions_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Right => {
                self.distribution_state.next_column();
                self.load_distribution();
            }
            KeyCode::Left => {
                self.distribution_state.prev_column();
                self.load_distribution();
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::BackTab => self.form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form_state.next_field(),
            KeyCode::Left => self.form_state.cycle_choice(false),
            KeyCode::Right => self.form_state.cycle_choice(true),
            KeyCode::Char(c) => self.form_state.input_char(c),
            KeyCode::Backspace => self.form_state.delete_char(),
            KeyCode::Delete => self.form_state.clear_field(),
            KeyCode::Enter => self.submit_prediction_form(),
            _ => {}
        }
    }

    fn submit_prediction_form(&mut self) {
        match self.prediction_service.predict(&self.form_state.values) {
            Ok(result) => {
                self.form_state.invalid_field = None;
                self.form_state.output = Some(FormOutput::Prediction(result));
            }
            Err(e) => {
                tracing::warn!("Prediction request rejected: {}", e);
                self.form_state.invalid_field = match &e {
                    StaywiseError::Validation(v) => Some(v.field),
                    StaywiseError::Encoding(_) => Some(crate::domain::FormField::Department),
                    _ => None,
                };
                self.form_state.output = Some(FormOutput::Error(e.to_string()));
            }
        }
    }

    fn load_distribution(&mut self) {
        let column = self.distribution_state.column();
        self.distribution_state.density = self.analytics_service.density(column, DENSITY_POINTS);
        self.distribution_state.boxes = Some(self.analytics_service.box_summary(column));
    }

    fn update_dashboard_state(&mut self) {
        let classifier = self.prediction_service.classifier();

        self.dashboard_state = DashboardState {
            record_count: self.analytics_service.record_count(),
            attrition_rate: self.analytics_service.attrition_rate(),
            salary_counts: self.analytics_service.salary_counts(),
            department_counts: self.analytics_service.department_counts(),
            model_loaded: classifier.is_loaded(),
            model_trees: classifier.n_trees(),
            evaluation_size: self.prediction_service.evaluation_size(),
            accuracy: self.prediction_service.accuracy().ok(),
        };
    }
}
