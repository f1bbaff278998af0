//! New lab request form: draft state and operations
//!
//! The form never reaches for global state. Operations that touch the store,
//! the hospital service or navigation receive them as parameters.

use super::field::{FormButton, FormField};
use crate::hospital::HospitalClientTrait;
use crate::i18n::{format_start_time, Locale};
use crate::state::{Appointment, LabStatus, NewLab, Patient, Route, Router, Store};
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};

/// Appointment chosen for the request. The display string is derived on render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedAppointment {
    pub id: String,
    pub start_date_time: DateTime<Utc>,
}

/// Unsaved lab request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabRequestDraft {
    pub patient_id: Option<String>,
    pub appointment: Option<SelectedAppointment>,
    pub lab_type: String,
    pub notes: String,
    pub status: LabStatus,
}

impl LabRequestDraft {
    /// Build the request payload
    pub fn to_new_lab(&self) -> NewLab {
        NewLab {
            patient_id: self.patient_id.clone().unwrap_or_default(),
            appointment_id: self.appointment.as_ref().map(|a| a.id.clone()),
            lab_type: self.lab_type.clone(),
            notes: self.notes.clone(),
            status: self.status,
            requested_on: None,
        }
    }
}

/// Patient search box state
#[derive(Debug, Clone, Default)]
pub struct PatientTypeahead {
    pub query: String,
    pub results: Vec<Patient>,
    pub highlighted: usize,
    pub selected: Option<Patient>,
}

impl PatientTypeahead {
    /// Text shown in the input: the chosen patient's name or the query
    pub fn input_text(&self) -> &str {
        self.selected
            .as_ref()
            .map(|p| p.full_name.as_str())
            .unwrap_or(self.query.as_str())
    }

    pub fn highlighted_patient(&self) -> Option<&Patient> {
        self.results.get(self.highlighted)
    }

    /// Move the highlight within the result list, clamped to its bounds
    pub fn move_highlight(&mut self, down: bool) {
        if self.results.is_empty() {
            self.highlighted = 0;
        } else if down {
            self.highlighted = (self.highlighted + 1).min(self.results.len() - 1);
        } else {
            self.highlighted = self.highlighted.saturating_sub(1);
        }
    }
}

/// State of one "new lab request" form session
#[derive(Debug, Clone, Default)]
pub struct NewLabRequestForm {
    pub draft: LabRequestDraft,
    pub typeahead: PatientTypeahead,
    /// Whether the appointment selector is visible (a patient is chosen)
    pub show_appointments: bool,
    pub appointment_highlight: usize,
    pub active_field: FormField,
    pub selected_button: FormButton,
}

impl NewLabRequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a patient has been chosen
    pub fn has_patient(&self) -> bool {
        self.draft.patient_id.is_some()
    }

    /// Choose a patient and load their appointments
    pub async fn select_patient<C>(&mut self, patient: &Patient, store: &mut Store, client: &mut C)
    where
        C: HospitalClientTrait + ?Sized,
    {
        tracing::debug!("Patient {} selected for lab request", patient.id);
        self.draft.patient_id = Some(patient.id.clone());
        self.draft.appointment = None;
        self.typeahead.selected = Some(patient.clone());
        self.typeahead.results.clear();
        self.typeahead.highlighted = 0;
        self.show_appointments = true;
        self.appointment_highlight = 0;
        store.fetch_patient_appointments(client, &patient.id).await;
    }

    /// Forget the chosen patient and hide the appointment selector
    pub fn clear_patient(&mut self) {
        self.draft.patient_id = None;
        self.draft.appointment = None;
        self.typeahead.selected = None;
        self.typeahead.query.clear();
        self.typeahead.results.clear();
        self.typeahead.highlighted = 0;
        self.show_appointments = false;
        self.appointment_highlight = 0;
        if self.active_field == FormField::Appointment {
            self.active_field = FormField::Patient;
        }
    }

    /// Typeahead change handler: selects when no patient is chosen, clears otherwise
    pub async fn toggle_patient<C>(&mut self, patient: &Patient, store: &mut Store, client: &mut C)
    where
        C: HospitalClientTrait + ?Sized,
    {
        if self.show_appointments {
            self.clear_patient();
        } else {
            self.select_patient(patient, store, client).await;
        }
    }

    /// Update the patient query and search for matches
    pub async fn update_patient_query<C>(&mut self, query: String, client: &mut C) -> Result<()>
    where
        C: HospitalClientTrait + ?Sized,
    {
        self.typeahead.query = query;
        self.typeahead.highlighted = 0;
        if self.typeahead.query.trim().is_empty() {
            self.typeahead.results.clear();
            return Ok(());
        }
        tracing::debug!("Searching patients for {:?}", self.typeahead.query);
        match client.search_patients(&self.typeahead.query).await {
            Ok(patients) => {
                self.typeahead.results = patients;
                Ok(())
            }
            Err(e) => {
                self.typeahead.results.clear();
                Err(e)
            }
        }
    }

    /// Choose an appointment for the request
    pub fn select_appointment(&mut self, appointment: &Appointment) {
        self.draft.appointment = Some(SelectedAppointment {
            id: appointment.id.clone(),
            start_date_time: appointment.start_date_time,
        });
    }

    /// Localized start time of the chosen appointment
    pub fn appointment_label<Tz>(&self, tz: &Tz, locale: Locale) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.draft
            .appointment
            .as_ref()
            .map(|a| format_start_time(a.start_date_time, tz, locale))
    }

    /// Move the appointment highlight within `count` entries
    pub fn move_appointment_highlight(&mut self, down: bool, count: usize) {
        if count == 0 {
            self.appointment_highlight = 0;
        } else if down {
            self.appointment_highlight = (self.appointment_highlight + 1).min(count - 1);
        } else {
            self.appointment_highlight = self.appointment_highlight.saturating_sub(1);
        }
    }

    pub fn change_lab_type(&mut self, text: String) {
        self.draft.lab_type = text;
    }

    pub fn change_notes(&mut self, text: String) {
        self.draft.notes = text;
    }

    /// Send the draft to the store; navigates to the created lab on success
    pub async fn submit<C>(&self, store: &mut Store, client: &mut C, router: &mut Router)
    where
        C: HospitalClientTrait + ?Sized,
    {
        let lab = self.draft.to_new_lab();
        store
            .request_lab(client, lab, |created| {
                router.push(Route::ViewLab(created.id.clone()))
            })
            .await;
    }

    /// Leave the form without saving
    pub fn cancel(&self, router: &mut Router) {
        router.push(Route::Labs);
    }

    pub fn next_field(&mut self) {
        self.active_field = self.active_field.next(self.show_appointments);
    }

    pub fn prev_field(&mut self) {
        self.active_field = self.active_field.prev(self.show_appointments);
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field == FormField::Buttons
    }
}
