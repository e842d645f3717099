pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use engine::Ledger;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, TerminalGuard};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState, ledger: &Ledger) {
    let theme = Theme::default();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(screens::form::HEIGHT),
            Constraint::Min(3),    // Expenses table
            Constraint::Length(1), // Running total
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_title(frame, layout[0], ledger, &theme);
    screens::form::render(frame, layout[1], state, &theme);
    screens::expenses::render(frame, layout[2], state, ledger, &theme);
    frame.render_widget(
        Paragraph::new(components::money::total_line(ledger, state.pending, &theme)),
        layout[3],
    );
    render_bottom_bar(frame, layout[4], &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_title(frame: &mut Frame<'_>, area: Rect, ledger: &Ledger, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            "Expense Tracker",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Reference", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}", ledger.reference())),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let hints = [
        ("Tab", " next field"),
        ("←/→", " change option"),
        ("Enter", " add expense"),
        ("PgUp/PgDn", " scroll"),
        ("Esc", " dismiss"),
        ("Ctrl+C", " quit"),
    ];

    let mut parts = Vec::new();
    for (i, (key, label)) in hints.into_iter().enumerate() {
        if i > 0 {
            parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        }
        parts.push(Span::styled(key, Style::default().fg(theme.accent)));
        parts.push(Span::raw(label));
    }

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
