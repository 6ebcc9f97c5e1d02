//! Toolkit-wide error type with severity codes.
//!
//! Every failure in Perseus carries a [`Severity`] so the system facade
//! can convert it into a queued user-facing message of the right level
//! instead of aborting the request.

use serde::{Deserialize, Serialize};

/// Severity of an error or queued message.
///
/// The numeric codes and CSS class names mirror the levels the theme
/// layer styles messages with.
///
/// # Examples
///
/// ```
/// use perseus_core::Severity;
///
/// assert_eq!(Severity::Error.code(), 3);
/// assert_eq!(Severity::Warning.css_class(), "warning");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
	Notice,
	Warning,
	Error,
}

impl Severity {
	/// Numeric code for the severity, 1 through 3.
	pub fn code(self) -> u8 {
		match self {
			Severity::Notice => 1,
			Severity::Warning => 2,
			Severity::Error => 3,
		}
	}

	/// CSS class used when the message list is themed.
	pub fn css_class(self) -> &'static str {
		match self {
			Severity::Notice => "notice",
			Severity::Warning => "warning",
			Severity::Error => "error",
		}
	}

	/// All severities in ascending order.
	pub fn all() -> [Severity; 3] {
		[Severity::Notice, Severity::Warning, Severity::Error]
	}
}

impl std::fmt::Display for Severity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.css_class())
	}
}

/// The Perseus error type.
///
/// Variants cover the handful of failure domains in the toolkit; each
/// reports a [`Severity`] used when the error is funneled into the
/// message queue.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{0}")]
	Config(String),
	#[error("{0}")]
	Template(String),
	#[error("{0}")]
	Database(String),
	#[error("{0}")]
	Mail(String),
	#[error("{0}")]
	Io(String),
	#[error("{message}")]
	Other { message: String, severity: Severity },
}

impl From<std::io::Error> for Error {
	fn from(e: std::io::Error) -> Self {
		Error::Io(e.to_string())
	}
}

impl Error {
	/// Create an error with an explicit severity.
	///
	/// # Examples
	///
	/// ```
	/// use perseus_core::{Error, Severity};
	///
	/// let err = Error::with_severity("file missing", Severity::Warning);
	/// assert_eq!(err.severity(), Severity::Warning);
	/// ```
	pub fn with_severity(message: impl Into<String>, severity: Severity) -> Self {
		Error::Other {
			message: message.into(),
			severity,
		}
	}

	/// The severity attached to this error.
	pub fn severity(&self) -> Severity {
		match self {
			Error::Config(_) | Error::Database(_) => Severity::Error,
			Error::Template(_) | Error::Mail(_) => Severity::Error,
			Error::Io(_) => Severity::Warning,
			Error::Other { severity, .. } => *severity,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
