//! New lab request form rendering

use super::field_renderer::{draw_feedback, draw_field_with_value, draw_select, FieldLook};
use crate::i18n::Translator;
use crate::state::{AppState, FormButton, FormField, NewLabRequestForm, RequestStatus};
use crate::ui::components::{render_action_button, render_alert, ALERT_HEIGHT, BUTTON_HEIGHT};
use crate::ui::widgets::render_scrollable_list;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Maximum rows of an open result list
const MENU_ROWS: u16 = 5;

/// Default look of a field from its focus and flags
fn look(form: &NewLabRequestForm, field: FormField) -> FieldLook {
    FieldLook {
        is_active: form.active_field == field,
        is_multiline: field.is_multiline(),
        is_required: field.is_required(),
        is_invalid: false,
    }
}

fn label(t: &Translator, field: FormField) -> &str {
    t.t(field.label_key().unwrap_or_default())
}

/// Draw the new lab request form
pub fn draw_lab_request_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let form = &state.lab_request_form;
    let store = &state.store;
    let t = &state.translator;
    let error = &store.lab.error;

    let show_banner = store.has_lab_error();
    let menu_height = open_menu_height(state);
    let type_invalid = error.lab_type.is_some();

    let mut constraints = Vec::new();
    if show_banner {
        constraints.push(Constraint::Length(ALERT_HEIGHT));
    }
    constraints.push(Constraint::Length(3)); // Patient / appointment row
    if menu_height > 0 {
        constraints.push(Constraint::Length(menu_height));
    }
    constraints.push(Constraint::Length(3)); // Type
    if type_invalid {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(4)); // Notes
    constraints.push(Constraint::Length(BUTTON_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(area);
    let mut chunk = chunks.iter().copied();
    let mut next_area = || chunk.next().unwrap_or_default();

    if show_banner {
        let message = error.message.as_deref().unwrap_or_default();
        render_alert(frame, next_area(), t.t("states.error"), t.t(message));
    }

    // Patient typeahead and, once a patient is chosen, the appointment selector
    let top_row = next_area();
    let top_chunks = if form.show_appointments {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(top_row)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(top_row)
    };

    draw_field_with_value(
        frame,
        top_chunks[0],
        label(t, FormField::Patient),
        form.typeahead.input_text(),
        FieldLook {
            is_invalid: error.patient.is_some(),
            ..look(form, FormField::Patient)
        },
    );

    if form.show_appointments {
        let chosen = form.appointment_label(&Local, t.locale());
        let placeholder = if store.appointments.status == RequestStatus::Loading {
            t.t("states.loading")
        } else {
            t.t("labs.lab.appointments")
        };
        draw_select(
            frame,
            top_chunks[1],
            label(t, FormField::Appointment),
            chosen.as_deref(),
            placeholder,
            look(form, FormField::Appointment),
        );
    }

    if menu_height > 0 {
        draw_open_menu(frame, next_area(), state);
    }

    draw_field_with_value(
        frame,
        next_area(),
        label(t, FormField::LabType),
        &form.draft.lab_type,
        FieldLook {
            is_invalid: type_invalid,
            ..look(form, FormField::LabType)
        },
    );
    if let Some(key) = &error.lab_type {
        draw_feedback(frame, next_area(), t.t(key));
    }

    draw_field_with_value(
        frame,
        next_area(),
        label(t, FormField::Notes),
        &form.draft.notes,
        look(form, FormField::Notes),
    );

    draw_buttons(frame, next_area(), state);
}

/// Height of the result menu under the patient/appointment row, 0 when closed
fn open_menu_height(state: &AppState) -> u16 {
    let form = &state.lab_request_form;
    let entries = match form.active_field {
        FormField::Patient if !form.has_patient() => form.typeahead.results.len(),
        FormField::Appointment => state.store.appointments.appointments.len(),
        _ => 0,
    };
    if entries == 0 {
        0
    } else {
        (entries as u16).min(MENU_ROWS) + 2
    }
}

fn draw_open_menu(frame: &mut Frame, area: Rect, state: &AppState) {
    let form = &state.lab_request_form;
    let t = &state.translator;

    let (items, selected): (Vec<ListItem>, usize) = if form.active_field == FormField::Appointment
    {
        let items = state
            .store
            .appointments
            .appointments
            .iter()
            .map(|a| {
                let when = crate::i18n::format_start_time(a.start_date_time, &Local, t.locale());
                ListItem::new(format!("{when}  {}", a.location))
            })
            .collect();
        (items, form.appointment_highlight)
    } else {
        let items = form
            .typeahead
            .results
            .iter()
            .map(|p| ListItem::new(p.menu_label()))
            .collect();
        (items, form.typeahead.highlighted)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    render_scrollable_list(frame, area, list, Some(selected));
}

fn draw_buttons(frame: &mut Frame, area: Rect, state: &AppState) {
    let form = &state.lab_request_form;
    let t = &state.translator;
    let row_active = form.is_buttons_row_active();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(14),
            Constraint::Length(1),
            Constraint::Length(14),
        ])
        .split(area);

    render_action_button(
        frame,
        chunks[1],
        t.t(FormButton::Save.label_key()),
        row_active && form.selected_button == FormButton::Save,
        Color::Green,
    );
    render_action_button(
        frame,
        chunks[3],
        t.t(FormButton::Cancel.label_key()),
        row_active && form.selected_button == FormButton::Cancel,
        Color::Yellow,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Patient, Route, UNABLE_TO_REQUEST_KEY};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(state: &AppState) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_lab_request_form(frame, frame.area(), state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn border_color(state: &AppState, x: u16, y: u16) -> Color {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_lab_request_form(frame, frame.area(), state))
            .unwrap();
        terminal.backend().buffer()[(x, y)].fg
    }

    fn form_state() -> AppState {
        let mut state = AppState::default();
        state.router.push(Route::NewLabRequest);
        state
    }

    #[test]
    fn test_no_banner_without_error() {
        let screen = render(&form_state());
        assert!(!screen.contains("Unable to create new lab request."));
        assert!(screen.contains("Patient *"));
        assert!(screen.contains("Type *"));
        assert!(screen.contains("Save"));
        assert!(screen.contains("Cancel"));
    }

    #[test]
    fn test_banner_shows_store_message() {
        let mut state = form_state();
        state.store.lab.status = RequestStatus::Error;
        state.store.lab.error.message = Some(UNABLE_TO_REQUEST_KEY.to_string());

        let screen = render(&state);
        assert!(screen.contains("Error"));
        assert!(screen.contains("Unable to create new lab request."));
    }

    #[test]
    fn test_type_feedback_rendered() {
        let mut state = form_state();
        state.store.lab.status = RequestStatus::Error;
        state.store.lab.error.message = Some(UNABLE_TO_REQUEST_KEY.to_string());
        state.store.lab.error.lab_type = Some("labs.requests.error.typeRequired".to_string());

        let screen = render(&state);
        assert!(screen.contains("Type is required."));
    }

    #[test]
    fn test_appointment_selector_hidden_until_patient_chosen() {
        let mut state = form_state();
        assert!(!render(&state).contains("Appointments"));

        state.lab_request_form.show_appointments = true;
        state.lab_request_form.draft.patient_id = Some("p1".to_string());
        assert!(render(&state).contains("Appointments"));
    }

    #[test]
    fn test_patient_focus_kept_after_choice() {
        let mut state = form_state();
        state.lab_request_form.show_appointments = true;
        state.lab_request_form.draft.patient_id = Some("p1".to_string());
        state.lab_request_form.active_field = FormField::Patient;
        assert_eq!(border_color(&state, 1, 1), Color::Cyan);

        state.lab_request_form.active_field = FormField::LabType;
        assert_eq!(border_color(&state, 1, 1), Color::DarkGray);
    }

    #[test]
    fn test_typeahead_results_listed() {
        let mut state = form_state();
        state.lab_request_form.typeahead.query = "ja".to_string();
        state.lab_request_form.typeahead.results = vec![Patient {
            id: "p1".to_string(),
            full_name: "Jane Doe".to_string(),
            code: "P00001".to_string(),
        }];

        let screen = render(&state);
        assert!(screen.contains("Jane Doe (P00001)"));
    }
}
