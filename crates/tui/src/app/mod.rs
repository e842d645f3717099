mod form;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use engine::{ConversionError, Ledger, Tracker};

use crate::{
    client::RateClient,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use form::{Field, FormState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
}

impl ToastState {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub form: FormState,
    /// Selected table row.
    pub selected: Option<usize>,
    pub toast: Option<ToastState>,
    /// A conversion request is in flight.
    pub pending: bool,
}

impl AppState {
    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(len - 1)));
    }

    fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }
}

pub struct App {
    tracker: Tracker<RateClient>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(tracker: Tracker<RateClient>) -> Self {
        let state = AppState {
            form: FormState::new(tracker.today()),
            selected: None,
            toast: Some(ToastState::new(
                ToastLevel::Info,
                "Fill in the form and press Enter to add an expense.",
            )),
            pending: false,
        };

        Self {
            tracker,
            state,
            should_quit: false,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        self.tracker.ledger()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut guard = ui::TerminalGuard::enter()?;
        let result = self.event_loop(guard.terminal()).await;
        guard.restore()?;
        result
    }

    fn draw(&self, terminal: &mut ui::Terminal) -> Result<()> {
        terminal
            .draw(|frame| ui::render(frame, &self.state, self.tracker.ledger()))
            .map_err(|err| AppError::Terminal(err.to_string()))?;
        Ok(())
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.draw(terminal)?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                if map_key(key) == AppAction::Submit {
                    // Show the pending state while the conversion request blocks the loop.
                    self.state.pending = true;
                    self.draw(terminal)?;
                }
                self.handle_key(key).await;
                self.state.pending = false;
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let rows = self.tracker.ledger().len();
        match map_key(key) {
            AppAction::Quit => self.should_quit = true,
            AppAction::Cancel => self.state.toast = None,
            AppAction::NextField => self.state.form.next_field(),
            AppAction::PrevField => self.state.form.prev_field(),
            AppAction::Left => self.state.form.cycle(false),
            AppAction::Right => self.state.form.cycle(true),
            AppAction::Backspace => self.state.form.backspace(),
            AppAction::Input(ch) => self.state.form.input(ch),
            AppAction::ScrollUp => self.state.select_prev(rows),
            AppAction::ScrollDown => self.state.select_next(rows),
            AppAction::Submit => self.add_expense().await,
            AppAction::None => {}
        }
    }

    /// The "Add Expense" button.
    async fn add_expense(&mut self) {
        let raw = self.state.form.to_raw();
        let appended = match self.tracker.validate_and_add(&raw).await {
            Ok(appended) => appended,
            Err(err) => {
                tracing::info!("expense rejected: {err}");
                self.state.toast = Some(ToastState::new(ToastLevel::Error, err.to_string()));
                return;
            }
        };

        self.state.form.clear_amount();
        self.state.selected = self.tracker.ledger().len().checked_sub(1);

        let reference = self.tracker.ledger().reference();
        let toast = match appended.conversion {
            Ok(_) => ToastState::new(
                ToastLevel::Success,
                format!(
                    "Added {}. Total {}",
                    appended.record,
                    appended.total.format(reference)
                ),
            ),
            Err(err) => ToastState::new(ToastLevel::Error, conversion_message(&err)),
        };
        self.state.toast = Some(toast);
    }
}

fn conversion_message(err: &ConversionError) -> String {
    let reason = match err {
        ConversionError::Status { status, message } => {
            format!("rate service error {status}: {message}")
        }
        ConversionError::Transport(message) => format!("rate service unreachable: {message}"),
        ConversionError::InvalidResponse(message) => {
            format!("unexpected rate service reply: {message}")
        }
        ConversionError::TotalOverflow(_) => "running total is too large".to_string(),
    };
    format!("Expense added but the total was not updated ({reason}).")
}
