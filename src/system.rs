//! The system facade: settings, theme, messages, databases.

pub use perseus_system::*;
