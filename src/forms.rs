//! Form building, request binding, and validation.

pub use perseus_forms::*;
