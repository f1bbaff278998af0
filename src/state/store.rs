//! Central store holding the lab and appointment slices
//!
//! Every operation takes the hospital client as an explicit parameter, so the
//! same store runs against the gRPC client or a mock.

use super::models::{Appointment, Lab, LabStatus, NewLab};
use crate::hospital::HospitalClientTrait;
use anyhow::Result;
use chrono::Utc;
use thiserror::Error;

/// Translation key shown in the banner when a lab request fails
pub const UNABLE_TO_REQUEST_KEY: &str = "labs.requests.error.unableToRequest";

/// Status of an asynchronous store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Completed,
    Error,
}

/// Reasons a lab request can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabRequestError {
    #[error("a patient must be selected")]
    PatientRequired,
    #[error("a lab type must be entered")]
    TypeRequired,
    #[error("hospital service rejected the lab request: {0}")]
    Rejected(String),
}

impl LabRequestError {
    /// Translation key for the user facing message
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Self::PatientRequired => "labs.requests.error.patientRequired",
            Self::TypeRequired => "labs.requests.error.typeRequired",
            Self::Rejected(_) => UNABLE_TO_REQUEST_KEY,
        }
    }
}

/// Error state of the lab slice. All values are translation keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabError {
    pub message: Option<String>,
    pub patient: Option<String>,
    pub lab_type: Option<String>,
}

impl LabError {
    fn from_errors(errors: &[LabRequestError]) -> Self {
        let mut lab_error = Self {
            message: Some(UNABLE_TO_REQUEST_KEY.to_string()),
            ..Default::default()
        };
        for error in errors {
            match error {
                LabRequestError::PatientRequired => {
                    lab_error.patient = Some(error.i18n_key().to_string())
                }
                LabRequestError::TypeRequired => {
                    lab_error.lab_type = Some(error.i18n_key().to_string())
                }
                LabRequestError::Rejected(_) => {}
            }
        }
        lab_error
    }
}

/// Check the fields the hospital service requires
pub fn validate_lab_request(lab: &NewLab) -> Vec<LabRequestError> {
    let mut errors = Vec::new();
    if lab.patient_id.is_empty() {
        errors.push(LabRequestError::PatientRequired);
    }
    if lab.lab_type.trim().is_empty() {
        errors.push(LabRequestError::TypeRequired);
    }
    errors
}

/// State of the lab currently being requested
#[derive(Debug, Clone, Default)]
pub struct LabSlice {
    pub status: RequestStatus,
    pub error: LabError,
    pub lab: Option<Lab>,
}

/// Appointments of the patient chosen in the lab request form
#[derive(Debug, Clone, Default)]
pub struct AppointmentsSlice {
    pub status: RequestStatus,
    pub appointments: Vec<Appointment>,
}

/// Labs known to the client
#[derive(Debug, Clone, Default)]
pub struct LabsSlice {
    pub status: RequestStatus,
    pub labs: Vec<Lab>,
}

/// Main store
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub lab: LabSlice,
    pub appointments: AppointmentsSlice,
    pub labs: LabsSlice,
}

impl Store {
    /// Fetch the appointments of a patient into the appointments slice
    pub async fn fetch_patient_appointments<C>(&mut self, client: &mut C, patient_id: &str)
    where
        C: HospitalClientTrait + ?Sized,
    {
        self.appointments.status = RequestStatus::Loading;
        match client.fetch_patient_appointments(patient_id).await {
            Ok(appointments) => {
                tracing::debug!(
                    "Loaded {} appointments for patient {patient_id}",
                    appointments.len()
                );
                self.appointments.appointments = appointments;
                self.appointments.status = RequestStatus::Completed;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch appointments for patient {patient_id}: {e:#}");
                self.appointments.appointments.clear();
                self.appointments.status = RequestStatus::Error;
            }
        }
    }

    /// Request a new lab. `on_success` runs with the stored lab once saved.
    pub async fn request_lab<C, F>(&mut self, client: &mut C, mut lab: NewLab, on_success: F)
    where
        C: HospitalClientTrait + ?Sized,
        F: FnOnce(&Lab),
    {
        self.lab.status = RequestStatus::Loading;

        let errors = validate_lab_request(&lab);
        if !errors.is_empty() {
            tracing::info!("Lab request rejected by validation: {errors:?}");
            self.lab.error = LabError::from_errors(&errors);
            self.lab.status = RequestStatus::Error;
            return;
        }

        lab.status = LabStatus::Requested;
        lab.requested_on = Some(Utc::now());

        match client.request_lab(lab).await {
            Ok(created) => {
                tracing::info!("Lab {} requested for patient {}", created.id, created.patient_id);
                self.lab.error = LabError::default();
                self.lab.status = RequestStatus::Completed;
                self.upsert_lab(created.clone());
                self.lab.lab = Some(created);
                if let Some(created) = self.lab.lab.as_ref() {
                    on_success(created);
                }
            }
            Err(e) => {
                let error = LabRequestError::Rejected(format!("{e:#}"));
                tracing::warn!("{error}");
                self.lab.error = LabError::from_errors(&[error]);
                self.lab.status = RequestStatus::Error;
            }
        }
    }

    /// Reset the lab slice for a fresh request
    pub fn reset_lab_request(&mut self) {
        self.lab = LabSlice::default();
    }

    /// Load all labs
    pub async fn load_labs<C>(&mut self, client: &mut C) -> Result<()>
    where
        C: HospitalClientTrait + ?Sized,
    {
        self.labs.status = RequestStatus::Loading;
        match client.list_labs().await {
            Ok(labs) => {
                self.labs.labs = labs;
                self.labs.status = RequestStatus::Completed;
                Ok(())
            }
            Err(e) => {
                self.labs.status = RequestStatus::Error;
                Err(e)
            }
        }
    }

    /// Make sure a single lab is present, fetching it when unknown
    pub async fn load_lab<C>(&mut self, client: &mut C, lab_id: &str) -> Result<()>
    where
        C: HospitalClientTrait + ?Sized,
    {
        if self.find_lab(lab_id).is_some() {
            return Ok(());
        }
        let lab = client.get_lab(lab_id).await?;
        self.upsert_lab(lab);
        Ok(())
    }

    /// Find a lab by id
    pub fn find_lab(&self, lab_id: &str) -> Option<&Lab> {
        self.labs.labs.iter().find(|l| l.id == lab_id)
    }

    /// Whether the lab slice reports an error
    pub fn has_lab_error(&self) -> bool {
        self.lab.status == RequestStatus::Error
    }

    fn upsert_lab(&mut self, lab: Lab) {
        if let Some(existing) = self.labs.labs.iter_mut().find(|l| l.id == lab.id) {
            *existing = lab;
        } else {
            self.labs.labs.insert(0, lab);
        }
    }
}
