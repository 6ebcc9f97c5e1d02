//! MySQL access for Perseus sites.
//!
//! One [`MySqlService`] wraps one `sqlx` pool for one named credential
//! set. Statement text is produced by pure builder functions in
//! [`builder`], so query construction is testable without a server.
//! Runtime failures follow a swallow-to-message policy: the error is
//! queued for the page and the call degrades to an empty result.

mod builder;
mod installer;
mod service;
mod value;

pub use builder::{Filter, FilterOp, build_insert, build_select};
pub use installer::Installer;
pub use service::MySqlService;
pub use value::SqlValue;
