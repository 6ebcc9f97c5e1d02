//! Event rate limiting backed by the `flood` table.

use chrono::Utc;
use indexmap::IndexMap;
use perseus_db::{Filter, FilterOp, MySqlService, SqlValue};
use std::sync::Arc;

/// Default counting window, in seconds.
pub const DEFAULT_WINDOW_SECS: i64 = 3600;

/// Idempotent schema for the `flood` table.
pub const FLOOD_TABLE_SCRIPT: &str = "\
CREATE TABLE IF NOT EXISTS flood (
  fid INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
  event VARCHAR(64) NOT NULL,
  hostname VARCHAR(128) NOT NULL,
  timestamp BIGINT NOT NULL,
  INDEX flood_event (event, hostname, timestamp)
)";

/// Counts named events per client so handlers can refuse repeats.
///
/// The count is per `(event, identifier)` within a sliding window;
/// the identifier is normally the client address. Database failures
/// follow the service's degrade policy: the event count reads as zero,
/// so a broken database never locks users out.
pub struct FloodControl {
	db: Arc<MySqlService>,
}

impl FloodControl {
	pub fn new(db: Arc<MySqlService>) -> Self {
		Self { db }
	}

	/// Whether `identifier` may trigger `event` again: true while the
	/// count of events inside the window stays below `threshold`.
	/// `window` is in seconds, one hour when unset.
	pub async fn is_allowed(
		&self,
		event: &str,
		threshold: usize,
		window: Option<i64>,
		identifier: &str,
	) -> bool {
		let cutoff = window_cutoff(Utc::now().timestamp(), window);
		let filters = window_filters(event, identifier, cutoff);
		let rows = self.db.select("flood", &["fid"], &filters).await;
		rows.len() < threshold
	}

	/// Record one occurrence of `event` for `identifier`.
	pub async fn register_event(&self, event: &str, identifier: &str) -> u64 {
		let columns = event_columns(event, identifier, Utc::now().timestamp());
		self.db.insert("flood", &columns).await
	}
}

/// Oldest timestamp still inside the counting window.
fn window_cutoff(now: i64, window: Option<i64>) -> i64 {
	now - window.unwrap_or(DEFAULT_WINDOW_SECS)
}

/// Conditions selecting one client's events newer than `cutoff`.
fn window_filters(event: &str, identifier: &str, cutoff: i64) -> [Filter; 3] {
	[
		Filter::eq("event", event),
		Filter::eq("hostname", identifier),
		Filter::new("timestamp", FilterOp::Gt, cutoff),
	]
}

fn event_columns(event: &str, identifier: &str, now: i64) -> IndexMap<String, SqlValue> {
	[
		("event".to_string(), SqlValue::from(event)),
		("hostname".to_string(), SqlValue::from(identifier)),
		("timestamp".to_string(), SqlValue::Int(now)),
	]
	.into_iter()
	.collect()
}
