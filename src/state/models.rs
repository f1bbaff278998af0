//! Records exchanged with the hospital service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Patient information (the subset the labs screens read)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub full_name: String,
    pub code: String,
}

impl Patient {
    /// Label used for typeahead menu entries
    pub fn menu_label(&self) -> String {
        format!("{} ({})", self.full_name, self.code)
    }
}

/// Scheduled appointment for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub location: String,
    pub reason: String,
}

/// Lifecycle status of a lab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabStatus {
    #[default]
    Requested,
    Completed,
    Canceled,
}

impl LabStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Parse a wire value, treating unknown values as requested
    pub fn parse(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            "canceled" => Self::Canceled,
            _ => Self::Requested,
        }
    }

    /// Translation key for the status label
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Self::Requested => "labs.status.requested",
            Self::Completed => "labs.status.completed",
            Self::Canceled => "labs.status.canceled",
        }
    }
}

/// A lab as stored by the hospital service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lab {
    pub id: String,
    pub code: String,
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub lab_type: String,
    pub notes: Option<String>,
    pub result: Option<String>,
    pub status: LabStatus,
    pub requested_on: DateTime<Utc>,
    pub completed_on: Option<DateTime<Utc>>,
    pub canceled_on: Option<DateTime<Utc>>,
}

impl Lab {
    /// Human facing reference, falling back to the id when no code was assigned
    pub fn display_code(&self) -> &str {
        if self.code.is_empty() {
            &self.id
        } else {
            &self.code
        }
    }
}

/// Payload for requesting a new lab
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewLab {
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub lab_type: String,
    pub notes: String,
    pub status: LabStatus,
    pub requested_on: Option<DateTime<Utc>>,
}
