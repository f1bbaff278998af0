//! Labs list and detail views

use super::widgets::render_scrollable_list;
use crate::i18n::format_start_time;
use crate::state::{AppState, Lab, LabStatus, RequestStatus};
use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn status_color(status: LabStatus) -> Color {
    match status {
        LabStatus::Requested => Color::Yellow,
        LabStatus::Completed => Color::Green,
        LabStatus::Canceled => Color::Red,
    }
}

/// Draw the labs list
pub fn draw_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.translator;
    let labs = &state.store.labs;
    let block = Block::default()
        .title(format!(" {} ", t.t("labs.label")))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if labs.labs.is_empty() {
        let message = if labs.status == RequestStatus::Loading {
            t.t("states.loading")
        } else {
            t.t("labs.empty")
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = labs
        .labs
        .iter()
        .enumerate()
        .map(|(idx, lab)| {
            let is_selected = idx == state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(
                    format!("{:<10}", lab.display_code()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("[{}]", t.t(lab.status.i18n_key())),
                    Style::default().fg(status_color(lab.status)),
                ),
                Span::raw(" "),
                Span::styled(&lab.lab_type, style),
                Span::styled(
                    format!("  {}", format_start_time(lab.requested_on, &Local, t.locale())),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    render_scrollable_list(frame, area, list, Some(state.selected_index));
}

/// Draw a single lab
pub fn draw_detail(frame: &mut Frame, area: Rect, state: &AppState, lab_id: &str) {
    let t = &state.translator;

    let Some(lab) = state.store.find_lab(lab_id) else {
        let message = if state.store.labs.status == RequestStatus::Loading {
            t.t("states.loading")
        } else {
            t.t("labs.notFound")
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .title(format!(" {} ", t.t("labs.label")))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(content, area);
        return;
    };

    let content = Paragraph::new(detail_lines(state, lab))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset as u16, 0))
        .block(
            Block::default()
                .title(format!(" {} ", lab.display_code()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(content, area);
}

fn detail_lines<'a>(state: &'a AppState, lab: &'a Lab) -> Vec<Line<'a>> {
    let t = &state.translator;
    let label = |key: &'static str| {
        Span::styled(
            format!("{}: ", t.t(key)),
            Style::default().fg(Color::DarkGray),
        )
    };
    let when = |at: DateTime<Utc>| format_start_time(at, &Local, t.locale());

    let mut lines = vec![
        Line::from(vec![
            label("labs.lab.status"),
            Span::styled(
                t.t(lab.status.i18n_key()),
                Style::default()
                    .fg(status_color(lab.status))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![label("labs.lab.code"), Span::raw(lab.display_code())]),
        Line::from(vec![label("labs.lab.type"), Span::raw(lab.lab_type.as_str())]),
        Line::from(vec![label("labs.lab.patient"), Span::raw(lab.patient_id.as_str())]),
        Line::from(vec![label("labs.lab.requestedOn"), Span::raw(when(lab.requested_on))]),
    ];

    if let Some(completed_on) = lab.completed_on {
        lines.push(Line::from(vec![
            label("labs.lab.completedOn"),
            Span::raw(when(completed_on)),
        ]));
    }
    if let Some(canceled_on) = lab.canceled_on {
        lines.push(Line::from(vec![
            label("labs.lab.canceledOn"),
            Span::raw(when(canceled_on)),
        ]));
    }

    if let Some(notes) = &lab.notes {
        lines.push(Line::from(""));
        lines.push(Line::from(label("labs.lab.notes")));
        lines.extend(notes.lines().map(Line::from));
    }
    if let Some(result) = &lab.result {
        lines.push(Line::from(""));
        lines.push(Line::from(label("labs.lab.result")));
        lines.extend(result.lines().map(Line::from));
    }

    lines
}
