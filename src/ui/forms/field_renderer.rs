//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Presentation flags of a single form field
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldLook {
    pub is_active: bool,
    pub is_multiline: bool,
    pub is_required: bool,
    pub is_invalid: bool,
}

impl FieldLook {
    fn border_style(&self) -> Style {
        if self.is_invalid {
            Style::default().fg(Color::Red)
        } else if self.is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn text_style(&self) -> Style {
        if self.is_active {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}

/// Field title with a required marker
pub fn field_title(label: &str, is_required: bool) -> String {
    if is_required {
        format!(" {label} * ")
    } else {
        format!(" {label} ")
    }
}

/// Draw a bordered text field with an optional cursor
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    look: FieldLook,
) {
    let cursor = Span::styled(
        if look.is_active { CURSOR } else { "" },
        Style::default().fg(Color::Cyan),
    );

    let content = if look.is_multiline {
        let mut lines: Vec<Line> = value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), look.text_style())))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(value, look.text_style()),
            cursor,
        ]))
    };

    let block = Block::default()
        .title(field_title(label, look.is_required))
        .borders(Borders::ALL)
        .border_style(look.border_style());

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a read-only selector box showing the current choice or a placeholder
pub fn draw_select(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<&str>,
    placeholder: &str,
    look: FieldLook,
) {
    let text = match value {
        Some(v) => Span::styled(v.to_string(), look.text_style()),
        None => Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
    };
    let arrow = Span::styled(" ▾", Style::default().fg(Color::DarkGray));

    let block = Block::default()
        .title(field_title(label, look.is_required))
        .borders(Borders::ALL)
        .border_style(look.border_style());

    frame.render_widget(Paragraph::new(Line::from(vec![text, arrow])).block(block), area);
}

/// Draw the invalid-feedback line under a field
pub fn draw_feedback(frame: &mut Frame, area: Rect, text: &str) {
    let feedback = Paragraph::new(Span::styled(
        format!(" {text}"),
        Style::default().fg(Color::Red),
    ));
    frame.render_widget(feedback, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_title() {
        assert_eq!(field_title("Type", true), " Type * ");
        assert_eq!(field_title("Notes", false), " Notes ");
    }
}
