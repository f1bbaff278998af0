//! Layout components (header, status bar)

use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{AppState, Route};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Height of the header (breadcrumbs + title)
const HEADER_HEIGHT: u16 = 2;

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw breadcrumbs and the page title
pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let crumbs = state.breadcrumbs();
    let last = crumbs.len().saturating_sub(1);

    let mut crumb_spans = vec![Span::raw(" ")];
    for (idx, crumb) in crumbs.iter().enumerate() {
        let text = if crumb.translate {
            state.translator.t(&crumb.text).to_string()
        } else {
            crumb.text.clone()
        };
        let style = if idx == last {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::Blue)
        };
        if idx > 0 {
            crumb_spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        crumb_spans.push(Span::styled(text, style));
    }

    let title = Line::from(Span::styled(
        format!(" {}", state.title()),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(Paragraph::new(vec![Line::from(crumb_spans), title]), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![];

    // Connection status
    let conn_status = if state.service_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    spans.push(Span::styled(
        get_view_hints(state.router.current()),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Key hints for the current route
pub fn get_view_hints(route: &Route) -> String {
    match route {
        Route::Labs => "j/k:navigate  Enter:open  n:new request  r:reload  q:quit".to_string(),
        Route::NewLabRequest => {
            format!("Tab/S-Tab:field  ↑/↓:choose  Enter:select  {SUBMIT_SHORTCUT}:save  Esc:cancel")
        }
        Route::ViewLab(_) => "j/k:scroll  Esc:back".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_hints_mention_save_shortcut() {
        assert!(get_view_hints(&Route::NewLabRequest).contains(SUBMIT_SHORTCUT));
    }

    #[test]
    fn test_layout_reserves_header_and_status_bar() {
        let (header, content, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header.height, HEADER_HEIGHT);
        assert_eq!(status.height, 1);
        assert_eq!(status.y, 23);
        assert_eq!(content.height, 24 - HEADER_HEIGHT - 1);
    }
}
