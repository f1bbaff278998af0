//! gRPC client for communicating with the hospital service
//!
//! Converts between the wire messages in [`proto`] and the records in
//! [`crate::state`].

use super::proto;
use super::traits::HospitalClientTrait;
use crate::state::{Appointment, Lab, LabStatus, NewLab, Patient};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use proto::hospital_service_client::HospitalServiceClient;

/// Default hospital service address
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:50061";

/// Client for communicating with the hospital service
pub struct HospitalClient {
    /// The gRPC client
    client: Option<HospitalServiceClient<tonic::transport::Channel>>,
    /// The service address
    address: String,
}

impl HospitalClient {
    /// Create a new client, connecting eagerly when the service is up
    pub async fn new(address: String) -> Result<Self> {
        let client = match HospitalServiceClient::connect(address.clone()).await {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("Hospital service at {address} not reachable: {e}");
                None
            }
        };

        Ok(Self { client, address })
    }

    /// Ensure connection is established
    async fn ensure_connected(
        &mut self,
    ) -> Result<&mut HospitalServiceClient<tonic::transport::Channel>> {
        if self.client.is_none() {
            self.client = Some(
                HospitalServiceClient::connect(self.address.clone())
                    .await
                    .map_err(|e| anyhow!("Failed to connect to hospital service: {}", e))?,
            );
        }
        self.client
            .as_mut()
            .ok_or_else(|| anyhow!("Client not connected"))
    }
}

#[async_trait]
impl HospitalClientTrait for HospitalClient {
    async fn check_connection(&self) -> bool {
        self.client.is_some()
    }

    async fn search_patients(&mut self, query: &str) -> Result<Vec<Patient>> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::SearchPatientsRequest {
            query: query.to_string(),
        });

        let response = client
            .search_patients(request)
            .await
            .map_err(|e| anyhow!("Failed to search patients: {}", e))?;

        Ok(response
            .into_inner()
            .patients
            .into_iter()
            .map(patient_from_proto)
            .collect())
    }

    async fn fetch_patient_appointments(&mut self, patient_id: &str) -> Result<Vec<Appointment>> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::ListPatientAppointmentsRequest {
            patient_id: patient_id.to_string(),
        });

        let response = client
            .list_patient_appointments(request)
            .await
            .map_err(|e| anyhow!("Failed to fetch appointments: {}", e))?;

        Ok(response
            .into_inner()
            .appointments
            .into_iter()
            .map(appointment_from_proto)
            .collect())
    }

    async fn request_lab(&mut self, lab: NewLab) -> Result<Lab> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::RequestLabRequest {
            lab: Some(new_lab_to_proto(&lab)),
        });

        let response = client
            .request_lab(request)
            .await
            .map_err(|e| anyhow!("Failed to request lab: {}", e))?;

        let inner = response.into_inner();
        if !inner.success {
            return Err(anyhow!("Failed to request lab: {}", inner.error));
        }

        inner
            .lab
            .map(lab_from_proto)
            .ok_or_else(|| anyhow!("Failed to request lab: empty response"))
    }

    async fn list_labs(&mut self) -> Result<Vec<Lab>> {
        let client = self.ensure_connected().await?;

        let response = client
            .list_labs(tonic::Request::new(proto::ListLabsRequest {}))
            .await
            .map_err(|e| anyhow!("Failed to list labs: {}", e))?;

        Ok(response
            .into_inner()
            .labs
            .into_iter()
            .map(lab_from_proto)
            .collect())
    }

    async fn get_lab(&mut self, lab_id: &str) -> Result<Lab> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::GetLabRequest {
            lab_id: lab_id.to_string(),
        });

        let response = client
            .get_lab(request)
            .await
            .map_err(|e| anyhow!("Failed to get lab: {}", e))?;

        response
            .into_inner()
            .lab
            .map(lab_from_proto)
            .ok_or_else(|| anyhow!("Lab {lab_id} not found"))
    }
}

fn patient_from_proto(p: proto::Patient) -> Patient {
    Patient {
        id: p.id,
        full_name: p.full_name,
        code: p.code,
    }
}

fn appointment_from_proto(a: proto::Appointment) -> Appointment {
    Appointment {
        id: a.id,
        patient_id: a.patient_id,
        start_date_time: parse_timestamp(&a.start_date_time),
        end_date_time: parse_timestamp(&a.end_date_time),
        location: a.location,
        reason: a.reason,
    }
}

fn lab_from_proto(l: proto::Lab) -> Lab {
    Lab {
        id: l.id,
        code: l.code,
        patient_id: l.patient_id,
        appointment_id: non_empty(l.appointment_id),
        lab_type: l.lab_type,
        notes: non_empty(l.notes),
        result: non_empty(l.result),
        status: LabStatus::parse(&l.status),
        requested_on: parse_timestamp(&l.requested_on),
        completed_on: parse_optional_timestamp(&l.completed_on),
        canceled_on: parse_optional_timestamp(&l.canceled_on),
    }
}

fn new_lab_to_proto(lab: &NewLab) -> proto::Lab {
    proto::Lab {
        patient_id: lab.patient_id.clone(),
        appointment_id: lab.appointment_id.clone().unwrap_or_default(),
        lab_type: lab.lab_type.clone(),
        notes: lab.notes.clone(),
        status: lab.status.as_str().to_string(),
        requested_on: lab
            .requested_on
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default(),
        ..Default::default()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Parse an ISO timestamp string to DateTime<Utc>
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    parse_optional_timestamp(s).unwrap_or_else(Utc::now)
}

fn parse_optional_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
