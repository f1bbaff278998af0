//! Form domain layer
//!
//! Draft state, focus order and operations for the create views.

mod field;
mod lab_request_form;

pub use field::{FormButton, FormField};
pub use lab_request_form::NewLabRequestForm;
