//! Schema installation from raw scripts.

use crate::service::MySqlService;
use indexmap::IndexMap;

/// Registry of `CREATE TABLE IF NOT EXISTS` scripts, keyed by table
/// name. Scripts must be idempotent; installation can run on every
/// boot.
#[derive(Debug, Default)]
pub struct Installer {
	scripts: IndexMap<String, String>,
}

impl Installer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, table: impl Into<String>, script: impl Into<String>) {
		self.scripts.insert(table.into(), script.into());
	}

	pub fn tables(&self) -> impl Iterator<Item = &str> {
		self.scripts.keys().map(String::as_str)
	}

	/// Run every registered script in registration order. Failures are
	/// queued by the service; the remaining scripts still run. Returns
	/// the number of scripts executed.
	pub async fn install(&self, db: &MySqlService) -> usize {
		for (table, script) in &self.scripts {
			tracing::info!(table, "installing schema");
			db.query(script).await;
		}
		self.scripts.len()
	}
}
