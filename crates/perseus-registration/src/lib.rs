//! The sample conference registration application.
//!
//! Wires the toolkit together: the registration form definition, the
//! page flow that stores registrants and mails confirmations, listing
//! and CSV export helpers, and the installer schema.

mod app;
mod data;
mod form;
mod installer;

pub use app::{
	LISTING_COLUMNS, REGISTRATION_COLUMNS, REGISTRATION_TABLE, RegistrationApp, export_csv,
	registrants,
};
pub use data::{canadian_provinces, countries, state_options, us_states};
pub use form::RegistrationForm;
pub use installer::installer;
