use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::{ToastLevel, ToastState},
    ui::theme::Theme,
};

/// Draws the current message in the bottom right corner, above the hint bar.
pub fn render(frame: &mut Frame<'_>, area: Rect, toast: Option<&ToastState>) {
    let Some(toast) = toast else {
        return;
    };
    let theme = Theme::default();
    let width = (toast.message.chars().count() + 4).min(area.width as usize) as u16;
    let inner_width = width.saturating_sub(2).max(1) as usize;
    let lines = toast.message.chars().count().div_ceil(inner_width).max(1) as u16;
    let height = (lines + 2).min(area.height);
    let x = area.x + area.width.saturating_sub(width);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height + 2));
    let rect = Rect { x, y, width, height };

    let style = match toast.level {
        ToastLevel::Info => Style::default().fg(theme.text),
        ToastLevel::Success => Style::default().fg(theme.positive),
        ToastLevel::Error => Style::default().fg(theme.error),
    };

    let block = Block::default().borders(Borders::ALL).border_style(style);
    let content = Paragraph::new(Line::from(toast.message.as_str()))
        .style(style)
        .wrap(Wrap { trim: true });
    frame.render_widget(Clear, rect);
    frame.render_widget(content.block(block), rect);
}
