//! Application state module

mod app_state;
mod forms;
mod models;
mod store;

pub use app_state::*;
pub use forms::*;
pub use models::*;
pub use store::*;
