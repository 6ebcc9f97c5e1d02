//! Outgoing mail for Perseus sites.
//!
//! [`MailMessage`] is a builder for one message; delivery goes through
//! a [`MailBackend`]. Incomplete messages are refused with queued
//! errors rather than bounced by the transport, so form handlers can
//! treat `send` as best-effort.

mod backend;
mod message;

pub use backend::{
	ConsoleBackend, MailBackend, MemoryBackend, SmtpBackend, backend_from_settings,
};
pub use message::{MailFormat, MailMessage, word_wrap};
