//! Mail building and delivery backends.

pub use perseus_mail::*;
