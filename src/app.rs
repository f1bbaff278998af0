//! Application state and core logic

use crate::config::TuiConfig;
use crate::hospital::{HospitalClient, HospitalClientTrait};
use crate::i18n::Translator;
use crate::platform::{is_interrupt_key, is_submit_key};
use crate::state::{AppState, FormButton, FormField, NewLabRequestForm, Route};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

/// Main application struct
pub struct App<C: HospitalClientTrait = HospitalClient> {
    /// Current application state
    pub state: AppState,
    /// Hospital service client
    pub client: C,
    /// Whether the app should quit
    quit: bool,
}

impl App<HospitalClient> {
    /// Create a new App connected to the configured hospital service
    pub async fn new(initial_route: Option<Route>) -> Result<Self> {
        let config = TuiConfig::load().unwrap_or_else(|e| {
            warn!("Ignoring unreadable config file: {e:#}");
            TuiConfig::default()
        });

        let client = HospitalClient::new(config.resolved_address()).await?;
        let mut app = Self::with_client(client, Translator::new(config.locale()));

        app.state.service_connected = app.client.check_connection().await;
        if let Some(route) = initial_route.filter(|r| *r != Route::Labs) {
            app.state.router.push(route);
        }
        app.enter_route().await;

        Ok(app)
    }
}

impl<C: HospitalClientTrait> App<C> {
    /// Create an App around an existing client
    pub fn with_client(client: C, translator: Translator) -> Self {
        Self {
            state: AppState::new(translator),
            client,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if is_interrupt_key(&key) {
            self.quit = true;
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        self.state.status_message = None;

        // Track route before handling key to detect navigation
        let route_before = self.state.router.current().clone();

        match &route_before {
            Route::Labs => self.handle_labs_key(key).await?,
            Route::NewLabRequest => self.handle_lab_request_key(key).await?,
            Route::ViewLab(_) => self.handle_lab_detail_key(key),
        }

        if route_before != *self.state.router.current() {
            self.enter_route().await;
        }

        Ok(())
    }

    /// Navigate to a new route
    pub fn navigate(&mut self, route: Route) {
        self.state.router.push(route);
    }

    /// Go back to the previous non-form route
    pub fn go_back(&mut self) {
        self.state.router.back();
    }

    /// Prepare the state a route needs once it becomes current
    async fn enter_route(&mut self) {
        self.state.reset_selection();
        match self.state.router.current().clone() {
            Route::Labs => self.load_labs().await,
            Route::NewLabRequest => {
                self.state.lab_request_form = NewLabRequestForm::new();
                self.state.store.reset_lab_request();
            }
            Route::ViewLab(id) => {
                if let Err(e) = self.state.store.load_lab(&mut self.client, &id).await {
                    warn!("Failed to load lab {id}: {e:#}");
                    self.push_error(format!("Failed to load lab: {e}"));
                }
            }
        }
    }

    async fn load_labs(&mut self) {
        if let Err(e) = self.state.store.load_labs(&mut self.client).await {
            warn!("Failed to load labs: {e:#}");
            self.push_error(format!("Failed to load labs: {e}"));
        }
    }

    /// Handle keys in the labs list
    async fn handle_labs_key(&mut self, key: KeyEvent) -> Result<()> {
        let count = self.state.store.labs.labs.len();
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(count),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Enter => {
                if let Some(lab) = self.state.store.labs.labs.get(self.state.selected_index) {
                    let route = Route::ViewLab(lab.id.clone());
                    self.navigate(route);
                }
            }
            KeyCode::Char('n') => self.navigate(Route::NewLabRequest),
            KeyCode::Char('r') => self.load_labs().await,
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the lab detail view
    fn handle_lab_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => self.go_back(),
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            _ => {}
        }
    }

    /// Handle keys in the new lab request form
    async fn handle_lab_request_key(&mut self, key: KeyEvent) -> Result<()> {
        // Keyboard shortcut (works from anywhere)
        if is_submit_key(&key) {
            self.submit_lab_request().await;
            return Ok(());
        }

        let form = &mut self.state.lab_request_form;
        match key.code {
            KeyCode::Esc => form.cancel(&mut self.state.router),
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            _ => match form.active_field {
                FormField::Patient => self.handle_patient_key(key).await,
                FormField::Appointment => self.handle_appointment_key(key),
                FormField::LabType => {
                    if let Some(text) = edit_text(&form.draft.lab_type, &key, false) {
                        form.change_lab_type(text);
                    }
                }
                FormField::Notes => {
                    if let Some(text) = edit_text(&form.draft.notes, &key, true) {
                        form.change_notes(text);
                    }
                }
                FormField::Buttons => match key.code {
                    KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                        form.selected_button.toggle()
                    }
                    KeyCode::Enter => match form.selected_button {
                        FormButton::Save => self.submit_lab_request().await,
                        FormButton::Cancel => form.cancel(&mut self.state.router),
                    },
                    _ => {}
                },
            },
        }
        Ok(())
    }

    /// Patient typeahead: typing searches, Enter picks or drops the patient
    async fn handle_patient_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.lab_request_form;

        if form.has_patient() {
            match key.code {
                KeyCode::Backspace | KeyCode::Delete => form.clear_patient(),
                KeyCode::Enter => {
                    if let Some(patient) = form.typeahead.selected.clone() {
                        form.toggle_patient(&patient, &mut self.state.store, &mut self.client)
                            .await;
                    }
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Down => form.typeahead.move_highlight(true),
            KeyCode::Up => form.typeahead.move_highlight(false),
            KeyCode::Enter => {
                if let Some(patient) = form.typeahead.highlighted_patient().cloned() {
                    form.toggle_patient(&patient, &mut self.state.store, &mut self.client)
                        .await;
                }
            }
            _ => {
                let Some(query) = edit_text(&form.typeahead.query, &key, false) else {
                    return;
                };
                if let Err(e) = form.update_patient_query(query, &mut self.client).await {
                    warn!("Patient search failed: {e:#}");
                    self.push_error(format!("Patient search failed: {e}"));
                }
            }
        }
    }

    fn handle_appointment_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.lab_request_form;
        let appointments = &self.state.store.appointments.appointments;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                form.move_appointment_highlight(true, appointments.len())
            }
            KeyCode::Up | KeyCode::Char('k') => {
                form.move_appointment_highlight(false, appointments.len())
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(appointment) = appointments.get(form.appointment_highlight) {
                    form.select_appointment(appointment);
                }
            }
            _ => {}
        }
    }

    /// Submit the lab request; the form navigates to the new lab on success
    async fn submit_lab_request(&mut self) {
        let state = &mut self.state;
        state
            .lab_request_form
            .submit(&mut state.store, &mut self.client, &mut state.router)
            .await;

        if let Some(lab) = &state.store.lab.lab {
            if !state.store.has_lab_error() {
                info!("Lab request saved as {}", lab.display_code());
                state.status_message = Some(format!("{} {}", lab.display_code(), lab.lab_type));
            }
        }
    }
}

/// Apply a text editing key to `current`, returning the new text when it changed
fn edit_text(current: &str, key: &KeyEvent, multiline: bool) -> Option<String> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let mut text = current.to_string();
    match key.code {
        KeyCode::Char(c) => text.push(c),
        KeyCode::Backspace => {
            text.pop()?;
        }
        KeyCode::Enter if multiline => text.push('\n'),
        _ => return None,
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hospital::MockHospitalClientTrait;
    use crate::state::{Appointment, Lab, LabStatus, NewLab, Patient, RequestStatus};
    use anyhow::anyhow;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn patient() -> Patient {
        Patient {
            id: "p1".to_string(),
            full_name: "Jane Doe".to_string(),
            code: "P00001".to_string(),
        }
    }

    fn appointment() -> Appointment {
        Appointment {
            id: "a1".to_string(),
            patient_id: "p1".to_string(),
            start_date_time: Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap(),
            end_date_time: Utc.with_ymd_and_hms(2020, 1, 1, 11, 0, 0).unwrap(),
            location: "Ward 3".to_string(),
            reason: "Checkup".to_string(),
        }
    }

    fn created_lab(new_lab: &NewLab) -> Lab {
        Lab {
            id: "42".to_string(),
            code: "L-42".to_string(),
            patient_id: new_lab.patient_id.clone(),
            appointment_id: new_lab.appointment_id.clone(),
            lab_type: new_lab.lab_type.clone(),
            notes: Some(new_lab.notes.clone()),
            result: None,
            status: LabStatus::Requested,
            requested_on: new_lab.requested_on.unwrap_or_else(Utc::now),
            completed_on: None,
            canceled_on: None,
        }
    }

    fn app_with(client: MockHospitalClientTrait) -> App<MockHospitalClientTrait> {
        App::with_client(client, Translator::default())
    }

    async fn open_form(app: &mut App<MockHospitalClientTrait>) {
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(app.state.router.location(), "/labs/new");
    }

    async fn type_text(app: &mut App<MockHospitalClientTrait>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    mod labs_list {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_enter_opens_selected_lab() {
            let mut app = app_with(MockHospitalClientTrait::new());
            let lab = created_lab(&NewLab {
                patient_id: "p1".to_string(),
                lab_type: "X-Ray".to_string(),
                ..Default::default()
            });
            app.state.store.labs.labs = vec![lab];

            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.router.location(), "/labs/42");
        }

        #[tokio::test]
        async fn test_new_request_resets_form_and_store() {
            let mut app = app_with(MockHospitalClientTrait::new());
            app.state.lab_request_form.change_lab_type("stale".to_string());
            app.state.store.lab.status = RequestStatus::Error;

            open_form(&mut app).await;

            assert_eq!(app.state.lab_request_form.draft.lab_type, "");
            assert!(!app.state.store.has_lab_error());
        }

        #[tokio::test]
        async fn test_reload_failure_queues_error() {
            let mut client = MockHospitalClientTrait::new();
            client
                .expect_list_labs()
                .times(1)
                .returning(|| Err(anyhow!("unavailable")));
            let mut app = app_with(client);

            app.handle_key(key(KeyCode::Char('r'))).await.unwrap();

            assert_eq!(app.state.current_error(), Some("Failed to load labs: unavailable"));
            assert_eq!(app.state.store.labs.status, RequestStatus::Error);
        }

        #[test]
        fn test_q_and_ctrl_c_quit() {
            let mut app = app_with(MockHospitalClientTrait::new());
            tokio_test::block_on(app.handle_key(key(KeyCode::Char('q')))).unwrap();
            assert!(app.should_quit());

            let mut app = app_with(MockHospitalClientTrait::new());
            tokio_test::block_on(app.handle_key(ctrl('c'))).unwrap();
            assert!(app.should_quit());
        }
    }

    mod error_dialog {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_dialog_is_modal() {
            let mut app = app_with(MockHospitalClientTrait::new());
            app.push_error("boom");

            app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
            assert_eq!(app.state.router.current(), &Route::Labs);
            assert!(app.state.has_errors());

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(!app.state.has_errors());
        }
    }

    mod lab_request {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_typing_searches_and_enter_selects_patient() {
            let mut client = MockHospitalClientTrait::new();
            client
                .expect_search_patients()
                .returning(|_| Ok(vec![patient()]));
            client
                .expect_fetch_patient_appointments()
                .withf(|id| id == "p1")
                .times(1)
                .returning(|_| Ok(vec![appointment()]));
            let mut app = app_with(client);
            open_form(&mut app).await;

            type_text(&mut app, "ja").await;
            assert_eq!(app.state.lab_request_form.typeahead.results.len(), 1);

            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            let form = &app.state.lab_request_form;
            assert_eq!(form.draft.patient_id.as_deref(), Some("p1"));
            assert!(form.show_appointments);
            assert_eq!(app.state.store.appointments.appointments.len(), 1);
        }

        #[tokio::test]
        async fn test_backspace_clears_chosen_patient() {
            let mut client = MockHospitalClientTrait::new();
            client
                .expect_fetch_patient_appointments()
                .returning(|_| Ok(vec![]));
            let mut app = app_with(client);
            open_form(&mut app).await;
            let state = &mut app.state;
            state
                .lab_request_form
                .select_patient(&patient(), &mut state.store, &mut app.client)
                .await;

            app.handle_key(key(KeyCode::Backspace)).await.unwrap();

            assert!(!app.state.lab_request_form.has_patient());
            assert!(!app.state.lab_request_form.show_appointments);
        }

        #[tokio::test]
        async fn test_search_failure_queues_error() {
            let mut client = MockHospitalClientTrait::new();
            client
                .expect_search_patients()
                .returning(|_| Err(anyhow!("timeout")));
            let mut app = app_with(client);
            open_form(&mut app).await;

            type_text(&mut app, "j").await;

            assert_eq!(app.state.current_error(), Some("Patient search failed: timeout"));
        }

        #[tokio::test]
        async fn test_appointment_choice_via_keys() {
            let mut client = MockHospitalClientTrait::new();
            client
                .expect_fetch_patient_appointments()
                .returning(|_| Ok(vec![appointment()]));
            let mut app = app_with(client);
            open_form(&mut app).await;
            let state = &mut app.state;
            state
                .lab_request_form
                .select_patient(&patient(), &mut state.store, &mut app.client)
                .await;

            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert_eq!(app.state.lab_request_form.active_field, FormField::Appointment);
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            let chosen = app.state.lab_request_form.draft.appointment.as_ref().unwrap();
            assert_eq!(chosen.id, "a1");
        }

        #[tokio::test]
        async fn test_full_request_navigates_to_created_lab() {
            let mut client = MockHospitalClientTrait::new();
            client
                .expect_search_patients()
                .returning(|_| Ok(vec![patient()]));
            client
                .expect_fetch_patient_appointments()
                .returning(|_| Ok(vec![appointment()]));
            client
                .expect_request_lab()
                .withf(|lab| {
                    lab.patient_id == "p1"
                        && lab.appointment_id.as_deref() == Some("a1")
                        && lab.lab_type == "X-Ray"
                        && lab.notes == "fasting\nbefore 8"
                        && lab.status == LabStatus::Requested
                        && lab.requested_on.is_some()
                })
                .times(1)
                .returning(|lab| Ok(created_lab(&lab)));
            let mut app = app_with(client);
            open_form(&mut app).await;

            type_text(&mut app, "j").await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "X-Ray").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "fasting").await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            type_text(&mut app, "before 8").await;

            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.router.location(), "/labs/42");
            assert_eq!(app.state.store.labs.labs[0].id, "42");
            assert_eq!(app.state.status_message.as_deref(), Some("L-42 X-Ray"));
        }

        #[tokio::test]
        async fn test_save_without_patient_shows_banner_and_skips_client() {
            let mut app = app_with(MockHospitalClientTrait::new());
            open_form(&mut app).await;

            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "X-Ray").await;
            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.router.location(), "/labs/new");
            assert!(app.state.store.has_lab_error());
            assert_eq!(
                app.state.store.lab.error.patient.as_deref(),
                Some("labs.requests.error.patientRequired")
            );
            assert_eq!(app.state.lab_request_form.draft.lab_type, "X-Ray");
        }

        #[tokio::test]
        async fn test_cancel_button_returns_to_labs() {
            let mut client = MockHospitalClientTrait::new();
            client.expect_list_labs().times(1).returning(|| Ok(vec![]));
            let mut app = app_with(client);
            open_form(&mut app).await;

            app.handle_key(key(KeyCode::BackTab)).await.unwrap();
            assert!(app.state.lab_request_form.is_buttons_row_active());
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.router.location(), "/labs");
        }

        #[tokio::test]
        async fn test_escape_cancels() {
            let mut client = MockHospitalClientTrait::new();
            client.expect_list_labs().times(1).returning(|| Ok(vec![]));
            let mut app = app_with(client);
            open_form(&mut app).await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "X-Ray").await;
            assert_eq!(app.state.lab_request_form.draft.lab_type, "X-Ray");

            app.handle_key(key(KeyCode::Esc)).await.unwrap();

            assert_eq!(app.state.router.location(), "/labs");
        }
    }

    mod lab_detail {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_back_from_created_lab_skips_form() {
            let mut client = MockHospitalClientTrait::new();
            client.expect_list_labs().times(1).returning(|| Ok(vec![]));
            let mut app = app_with(client);
            app.navigate(Route::NewLabRequest);
            app.navigate(Route::ViewLab("42".to_string()));

            app.handle_key(key(KeyCode::Esc)).await.unwrap();

            assert_eq!(app.state.router.current(), &Route::Labs);
        }

        #[tokio::test]
        async fn test_unknown_lab_is_fetched_on_entry() {
            let mut client = MockHospitalClientTrait::new();
            client
                .expect_get_lab()
                .withf(|id| id == "42")
                .times(1)
                .returning(|_| {
                    Ok(created_lab(&NewLab {
                        patient_id: "p1".to_string(),
                        lab_type: "CBC".to_string(),
                        ..Default::default()
                    }))
                });
            let mut app = app_with(client);
            app.navigate(Route::ViewLab("42".to_string()));

            app.enter_route().await;

            assert!(app.state.store.find_lab("42").is_some());
        }
    }
}
