use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    app::{AppState, Field},
    ui::theme::Theme,
};

/// Rows taken by the form: one per field, a spacer, the button and the borders.
pub const HEIGHT: u16 = Field::ALL.len() as u16 + 4;

const LABEL_WIDTH: usize = 16;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .title(" add expense ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1); Field::ALL.len()];
    constraints.push(Constraint::Length(1)); // Spacer
    constraints.push(Constraint::Length(1)); // Button
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (row, field) in rows.iter().zip(Field::ALL) {
        render_field(frame, *row, state, field, theme);
    }

    let button = if state.pending {
        Span::styled("[ Converting... ]", Style::default().fg(theme.warning))
    } else {
        Span::styled(
            "[ Add Expense ]",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    };
    let padding = " ".repeat(LABEL_WIDTH);
    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::raw(padding), button])),
        rows[Field::ALL.len() + 1],
    );
}

fn render_field(frame: &mut Frame<'_>, area: Rect, state: &AppState, field: Field, theme: &Theme) {
    let focused = state.form.focus == field;
    let value = state.form.value(field);

    let display = match (field.is_text(), focused) {
        (true, true) => format!("{value}│"),
        (true, false) => value.to_string(),
        (false, true) => format!("‹ {value} ›"),
        (false, false) => format!("  {value}"),
    };

    let value_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let line = Line::from(vec![
        Span::styled(
            format!("{:<LABEL_WIDTH$}", field.label()),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(display, value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
