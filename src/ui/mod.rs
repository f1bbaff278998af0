//! UI module for rendering the TUI

mod components;
mod forms;
mod labs;
mod layout;
mod widgets;

use crate::state::{AppState, Route};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, state);

    match state.router.current() {
        Route::Labs => labs::draw_list(frame, main_area, state),
        Route::NewLabRequest => forms::draw_lab_request_form(frame, main_area, state),
        Route::ViewLab(id) => labs::draw_detail(frame, main_area, state, id),
    }

    layout::draw_status_bar(frame, status_area, state);

    // Error dialog overlays everything
    if let Some(message) = state.current_error() {
        components::render_error_dialog(frame, state.translator.t("states.error"), message);
    }
}
