//! Inline alert banner

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a single-line alert
pub const ALERT_HEIGHT: u16 = 3;

/// Render a danger banner with a bold title and a message
pub fn render_alert(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(Color::LightRed),
    )))
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(paragraph, area);
}
