//! Building and validating outgoing mail.

use crate::backend::MailBackend;
use perseus_core::{MessageQueue, Severity};

/// Body format of an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MailFormat {
	#[default]
	Plain,
	Html,
}

/// One outgoing mail message, assembled with the builder methods.
///
/// # Examples
///
/// ```
/// use perseus_mail::MailMessage;
///
/// let message = MailMessage::new()
///     .to("ada@example.com")
///     .from("noreply@example.com")
///     .subject("Registration received")
///     .body("Thank you for registering.");
/// assert_eq!(message.recipients().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MailMessage {
	pub to: Vec<String>,
	pub cc: Vec<String>,
	pub bcc: Vec<String>,
	pub from: String,
	pub reply_to: Option<String>,
	pub subject: String,
	pub body: String,
	pub format: MailFormat,
}

impl MailMessage {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn to(mut self, address: impl Into<String>) -> Self {
		self.to.push(address.into());
		self
	}

	pub fn cc(mut self, address: impl Into<String>) -> Self {
		self.cc.push(address.into());
		self
	}

	pub fn bcc(mut self, address: impl Into<String>) -> Self {
		self.bcc.push(address.into());
		self
	}

	pub fn from(mut self, address: impl Into<String>) -> Self {
		self.from = address.into();
		self
	}

	pub fn reply_to(mut self, address: impl Into<String>) -> Self {
		self.reply_to = Some(address.into());
		self
	}

	pub fn subject(mut self, subject: impl Into<String>) -> Self {
		self.subject = subject.into();
		self
	}

	pub fn body(mut self, body: impl Into<String>) -> Self {
		self.body = body.into();
		self
	}

	pub fn html(mut self) -> Self {
		self.format = MailFormat::Html;
		self
	}

	/// Every address the message is delivered to.
	pub fn recipients(&self) -> Vec<&str> {
		self.to
			.iter()
			.chain(&self.cc)
			.chain(&self.bcc)
			.map(String::as_str)
			.collect()
	}

	/// Deliver through `backend`.
	///
	/// A message without recipients, subject, or body queues an error
	/// for each missing piece and is not delivered. Plain-text bodies
	/// are word-wrapped at 60 columns first. Returns whether delivery
	/// happened.
	pub async fn send(&self, backend: &dyn MailBackend, messages: &MessageQueue) -> bool {
		let mut complete = true;
		if self.recipients().is_empty() {
			messages.add(Severity::Error, "Message has no recipients.");
			complete = false;
		}
		if self.subject.trim().is_empty() {
			messages.add(Severity::Error, "Message has no subject.");
			complete = false;
		}
		if self.body.trim().is_empty() {
			messages.add(Severity::Error, "Message has no body.");
			complete = false;
		}
		if !complete {
			return false;
		}

		let mut prepared = self.clone();
		if prepared.format == MailFormat::Plain {
			prepared.body = word_wrap(&prepared.body, 60);
		}

		match backend.deliver(&prepared).await {
			Ok(()) => {
				tracing::info!(subject = %self.subject, to = ?self.to, "mail sent");
				true
			}
			Err(e) => {
				messages.add(Severity::Error, format!("Mail delivery failed: {e}"));
				false
			}
		}
	}
}

/// Wrap `text` so no line exceeds `width` columns, preserving existing
/// line breaks. Words longer than the width stay unbroken.
pub fn word_wrap(text: &str, width: usize) -> String {
	let mut out = Vec::new();
	for line in text.lines() {
		if line.len() <= width {
			out.push(line.to_string());
			continue;
		}
		let mut current = String::new();
		for word in line.split_whitespace() {
			if current.is_empty() {
				current = word.to_string();
			} else if current.len() + 1 + word.len() <= width {
				current.push(' ');
				current.push_str(word);
			} else {
				out.push(std::mem::take(&mut current));
				current = word.to_string();
			}
		}
		if !current.is_empty() {
			out.push(current);
		}
	}
	out.join("\n")
}
