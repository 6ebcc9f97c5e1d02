//! MySQL access: the pooled service, query builders, and installers.

pub use perseus_db::*;
