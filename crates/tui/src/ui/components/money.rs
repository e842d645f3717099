use engine::Ledger;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::Theme;

/// Running total in the reference currency, flagged when some entries are missing from it.
#[must_use]
pub fn total_line(ledger: &Ledger, pending: bool, theme: &Theme) -> Line<'static> {
    let mut parts = vec![
        Span::styled("Total: ", Style::default().fg(theme.text_muted)),
        Span::styled(
            ledger.total().format(ledger.reference()),
            Style::default()
                .fg(theme.positive)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let unconverted = ledger.unconverted();
    if unconverted > 0 {
        let noun = if unconverted == 1 { "entry" } else { "entries" };
        parts.push(Span::styled(
            format!("  ({unconverted} {noun} not converted)"),
            Style::default().fg(theme.warning),
        ));
    }
    if pending {
        parts.push(Span::styled(
            "  converting...",
            Style::default().fg(theme.text_muted),
        ));
    }

    Line::from(parts)
}

#[cfg(test)]
mod tests {
    use engine::Currency;

    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn empty_ledger_shows_zero_total() {
        let ledger = Ledger::new(Currency::Aed);
        let line = total_line(&ledger, false, &Theme::default());
        assert_eq!(text(&line), "Total: 0.00 AED");
    }

    #[test]
    fn pending_is_announced() {
        let ledger = Ledger::new(Currency::Usd);
        let line = total_line(&ledger, true, &Theme::default());
        assert_eq!(text(&line), "Total: 0.00 USD  converting...");
    }
}
