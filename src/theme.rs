//! The renderable tree and the Tera-backed theme engine.

pub use perseus_theme::*;
