use engine::{Ledger, LedgerEntry};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::{app::AppState, ui::theme::Theme};

const HEADERS: [&str; 6] = [
    "Amount",
    "Currency",
    "Category",
    "Payment Method",
    "Date",
    "Converted",
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, ledger: &Ledger, theme: &Theme) {
    let header = Row::new(HEADERS.map(Cell::from)).style(
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::BOLD),
    );

    let rows = ledger
        .entries()
        .iter()
        .map(|entry| entry_row(entry, theme))
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(11),
        Constraint::Min(12),
    ];

    let title = format!(" expenses ({}) ", ledger.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    table_state.select(state.selected);
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn entry_row(entry: &LedgerEntry, theme: &Theme) -> Row<'static> {
    let record = &entry.record;
    let converted = match entry.converted {
        Some(amount) => Cell::from(amount.to_string()),
        None => Cell::from("-").style(Style::default().fg(theme.error)),
    };

    Row::new(vec![
        Cell::from(record.amount().to_string()),
        Cell::from(record.currency().code()),
        Cell::from(record.category().to_string()),
        Cell::from(record.payment_method().to_string()),
        Cell::from(engine::format_date(record.date())),
        converted,
    ])
}
