//! CSV and XML interchange helpers.

pub use perseus_services::*;
