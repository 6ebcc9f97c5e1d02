//! Core types shared across the Perseus toolkit.
//!
//! This crate provides the two things every other Perseus crate leans on:
//!
//! - [`Error`]: the toolkit-wide error type carrying a [`Severity`] code
//! - [`MessageQueue`]: the per-request user-facing message queue that the
//!   rendering layer drains into the `messages` template
//!
//! The error policy is deliberately forgiving: components report failures
//! through the message queue and degrade (empty result sets, skipped
//! sends) instead of aborting the request.

pub mod exception;
pub mod messages;

pub use exception::{Error, Result, Severity};
pub use messages::{MessageQueue, QueuedMessage};
