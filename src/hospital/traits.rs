//! Trait abstraction for the hospital client to enable mocking in tests

use crate::state::{Appointment, Lab, NewLab, Patient};
use anyhow::Result;
use async_trait::async_trait;

/// Trait for hospital service operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HospitalClientTrait: Send + Sync {
    /// Check if the hospital service is reachable
    async fn check_connection(&self) -> bool;

    /// Search patients by name or code
    async fn search_patients(&mut self, query: &str) -> Result<Vec<Patient>>;

    /// List the appointments of a patient
    async fn fetch_patient_appointments(&mut self, patient_id: &str) -> Result<Vec<Appointment>>;

    /// Save a new lab request, returning the stored lab
    async fn request_lab(&mut self, lab: NewLab) -> Result<Lab>;

    /// List all labs
    async fn list_labs(&mut self) -> Result<Vec<Lab>>;

    /// Get a single lab by id
    async fn get_lab(&mut self, lab_id: &str) -> Result<Lab>;
}
