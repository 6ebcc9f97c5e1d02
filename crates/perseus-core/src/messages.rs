//! Session-style message queue.
//!
//! Any component may queue a user-facing message; the rendering layer
//! reads and purges the queue once per request. The queue is shared via
//! `Arc<MessageQueue>` and internally locked, matching the single
//! writer-then-drain lifecycle of a server-rendered page.

use crate::exception::Severity;
use parking_lot::Mutex;
use serde::Serialize;

/// A single queued message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedMessage {
	pub severity: Severity,
	pub text: String,
}

/// Shared queue of user-facing status messages.
///
/// # Examples
///
/// ```
/// use perseus_core::{MessageQueue, Severity};
///
/// let queue = MessageQueue::new();
/// queue.add(Severity::Error, "Something went wrong.");
///
/// let errors = queue.take(Severity::Error);
/// assert_eq!(errors, vec!["Something went wrong.".to_string()]);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MessageQueue {
	inner: Mutex<Vec<QueuedMessage>>,
}

impl MessageQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// A fresh queue behind an `Arc`, the form most components hold.
	pub fn shared() -> std::sync::Arc<Self> {
		std::sync::Arc::new(Self::new())
	}

	/// Queue a message at the given severity.
	pub fn add(&self, severity: Severity, text: impl Into<String>) {
		let text = text.into();
		tracing::debug!(severity = %severity, message = %text, "queued message");
		self.inner.lock().push(QueuedMessage { severity, text });
	}

	/// Remove and return all messages of one severity, in queue order.
	pub fn take(&self, severity: Severity) -> Vec<String> {
		let mut inner = self.inner.lock();
		let mut taken = Vec::new();
		inner.retain(|m| {
			if m.severity == severity {
				taken.push(m.text.clone());
				false
			} else {
				true
			}
		});
		taken
	}

	/// Remove and return every queued message, in queue order.
	pub fn take_all(&self) -> Vec<QueuedMessage> {
		std::mem::take(&mut *self.inner.lock())
	}

	/// Messages of one severity without purging them.
	pub fn peek(&self, severity: Severity) -> Vec<String> {
		self.inner
			.lock()
			.iter()
			.filter(|m| m.severity == severity)
			.map(|m| m.text.clone())
			.collect()
	}

	/// All messages without purging them.
	pub fn peek_all(&self) -> Vec<QueuedMessage> {
		self.inner.lock().clone()
	}

	pub fn len(&self) -> usize {
		self.inner.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.lock().is_empty()
	}
}
