//! Errors, severities, and the shared message queue.

pub use perseus_core::*;
