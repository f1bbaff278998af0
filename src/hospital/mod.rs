//! Hospital service client module for gRPC communication

mod client;
mod proto;
mod traits;

pub use client::{HospitalClient, DEFAULT_ADDRESS};
pub use traits::HospitalClientTrait;

#[cfg(test)]
pub use traits::MockHospitalClientTrait;
