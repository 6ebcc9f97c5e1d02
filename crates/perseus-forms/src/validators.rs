//! Per-item value validators.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static EMAIL_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

static PHONE_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^\+?[0-9().\-\s]{7,20}$").expect("phone pattern compiles"));

/// A validator applied to an item's submitted value.
///
/// Validators run only on non-empty values; the required-field check is
/// handled separately and always runs first.
#[derive(Clone)]
pub enum Validator {
	/// Reject values containing markup.
	PlainText,
	/// Require a plausible email address.
	Email,
	/// Require a plausible phone number: digits with optional
	/// punctuation, 7 to 20 characters.
	Phone,
	/// Arbitrary check; returns the user-facing error message on failure.
	Custom(Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>),
}

impl Validator {
	/// Build a custom validator from a closure.
	///
	/// # Examples
	///
	/// ```
	/// use perseus_forms::Validator;
	///
	/// let zip = Validator::custom(|value| {
	///     if value.chars().all(|c| c.is_ascii_digit()) {
	///         Ok(())
	///     } else {
	///         Err("Zip code must be numeric.".to_string())
	///     }
	/// });
	/// assert!(zip.check("label", "80401").is_ok());
	/// assert!(zip.check("label", "80401-x").is_err());
	/// ```
	pub fn custom<F>(f: F) -> Self
	where
		F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
	{
		Validator::Custom(Arc::new(f))
	}

	/// Check a value, returning the error message on failure.
	pub fn check(&self, label: &str, value: &str) -> Result<(), String> {
		match self {
			Validator::PlainText => {
				if value.contains('<') || value.contains('>') {
					Err(format!("Field '{label}' may not contain markup."))
				} else {
					Ok(())
				}
			}
			Validator::Email => {
				if EMAIL_RE.is_match(value) {
					Ok(())
				} else {
					Err(format!("Field '{label}' is not a valid email address."))
				}
			}
			Validator::Phone => {
				if PHONE_RE.is_match(value) {
					Ok(())
				} else {
					Err(format!("Field '{label}' is not a valid phone number."))
				}
			}
			Validator::Custom(f) => f(value),
		}
	}
}

impl std::fmt::Debug for Validator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Validator::PlainText => f.write_str("PlainText"),
			Validator::Email => f.write_str("Email"),
			Validator::Phone => f.write_str("Phone"),
			Validator::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}
