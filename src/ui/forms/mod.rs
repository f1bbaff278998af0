//! Form rendering module
//!
//! - `field_renderer`: bordered fields, selectors and feedback lines
//! - `lab_request_form`: the new lab request form

mod field_renderer;
mod lab_request_form;

pub use lab_request_form::draw_lab_request_form;
