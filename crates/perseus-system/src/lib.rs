//! The system facade every Perseus page talks to.
//!
//! [`System`] bootstraps the site: it loads settings, builds the theme
//! search path, owns the shared message queue, and caches one database
//! service per credential name. Errors funnel through
//! [`System::handle_error`] into the queue so a broken subsystem
//! degrades to an on-page message instead of a failed request.

mod flood;

pub use flood::{FLOOD_TABLE_SCRIPT, FloodControl};

use perseus_conf::Settings;
use perseus_core::{Error, MessageQueue, Result, Severity};
use perseus_db::MySqlService;
use perseus_theme::{Renderable, Theme};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Relative path of the settings file under the site root.
pub const SETTINGS_FILE: &str = "settings/perseus.toml";

pub struct System {
	site_root: PathBuf,
	settings: Settings,
	theme: Theme,
	messages: Arc<MessageQueue>,
	databases: Mutex<HashMap<String, Arc<MySqlService>>>,
}

impl System {
	/// Bootstrap a site rooted at `site_root`.
	///
	/// Loads `settings/perseus.toml` and builds the theme from the
	/// configured template directories. Fails only on configuration
	/// problems; everything later degrades to queued messages.
	pub fn new(site_root: impl Into<PathBuf>) -> Result<Self> {
		let site_root = site_root.into();
		let settings = Settings::from_file(site_root.join(SETTINGS_FILE))?;
		let theme = Theme::new(&settings.theme.template_dirs(&site_root))?;
		tracing::info!(site = %settings.site.name, root = %site_root.display(), "system up");
		Ok(Self {
			site_root,
			settings,
			theme,
			messages: MessageQueue::shared(),
			databases: Mutex::new(HashMap::new()),
		})
	}

	/// Assemble a system from parts. For tests and embedded use where
	/// the settings do not come from a file.
	pub fn from_parts(site_root: impl Into<PathBuf>, settings: Settings, theme: Theme) -> Self {
		Self {
			site_root: site_root.into(),
			settings,
			theme,
			messages: MessageQueue::shared(),
			databases: Mutex::new(HashMap::new()),
		}
	}

	pub fn site_root(&self) -> &Path {
		&self.site_root
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	pub fn theme_mut(&mut self) -> &mut Theme {
		&mut self.theme
	}

	pub fn messages(&self) -> Arc<MessageQueue> {
		self.messages.clone()
	}

	/// The database service for a named credential set, connecting on
	/// first use. Missing credentials and connection failures are
	/// queued as errors in addition to the returned `Err`.
	pub async fn db(&self, name: &str) -> Result<Arc<MySqlService>> {
		let mut databases = self.databases.lock().await;
		if let Some(service) = databases.get(name) {
			return Ok(service.clone());
		}

		let Some(config) = self.settings.database(name) else {
			let err = Error::Database(format!("No database credentials named '{name}'."));
			self.handle_error(&err);
			return Err(err);
		};
		match MySqlService::connect(config, self.messages.clone()).await {
			Ok(service) => {
				let service = Arc::new(service);
				databases.insert(name.to_string(), service.clone());
				Ok(service)
			}
			Err(err) => {
				self.handle_error(&err);
				Err(err)
			}
		}
	}

	/// Queue an error as a user-facing message at its own severity.
	/// Debug sites also see the internal form of the error.
	pub fn handle_error(&self, err: &Error) {
		tracing::warn!(severity = %err.severity(), error = %err, "handled error");
		let text = if self.settings.site.debug {
			format!("{err} [{err:?}]")
		} else {
			err.to_string()
		};
		self.messages.add(err.severity(), text);
	}

	/// Render a renderable tree with the site theme.
	pub fn render(&self, item: &mut dyn Renderable) -> Result<String> {
		self.theme.render(item)
	}

	/// Drain the message queue into the `messages` template.
	///
	/// Each message carries its text and severity CSS class. An empty
	/// queue renders to an empty string without touching the template.
	pub fn render_messages(&self) -> Result<String> {
		let queued = self.messages.take_all();
		if queued.is_empty() {
			return Ok(String::new());
		}
		let entries: Vec<Value> = queued
			.iter()
			.map(|m| json!({"class": m.severity.css_class(), "text": m.text}))
			.collect();
		let mut vars = Map::new();
		vars.insert("messages".to_string(), Value::Array(entries));
		self.theme.theme("messages", &vars)
	}

	/// Queue a notice, the "it worked" message level.
	pub fn notice(&self, text: impl Into<String>) {
		self.messages.add(Severity::Notice, text);
	}

	/// Flood check against the default database. An unreachable
	/// database counts zero events, so the action stays allowed.
	pub async fn flood_is_allowed(
		&self,
		event: &str,
		threshold: usize,
		window: Option<i64>,
		identifier: &str,
	) -> bool {
		match self.db("default").await {
			Ok(db) => {
				FloodControl::new(db)
					.is_allowed(event, threshold, window, identifier)
					.await
			}
			Err(_) => true,
		}
	}

	/// Record one flood event against the default database.
	pub async fn flood_register_event(&self, event: &str, identifier: &str) -> u64 {
		match self.db("default").await {
			Ok(db) => FloodControl::new(db).register_event(event, identifier).await,
			Err(_) => 0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use tempfile::tempdir;

	const SETTINGS_TOML: &str = r#"
[site]
name = "Conference"

[databases.default]
host = "localhost"
user = "app"
password = "secret"
name = "conference"
"#;

	fn site() -> tempfile::TempDir {
		let dir = tempdir().unwrap();
		fs::create_dir_all(dir.path().join("settings")).unwrap();
		fs::write(dir.path().join(SETTINGS_FILE), SETTINGS_TOML).unwrap();
		fs::create_dir_all(dir.path().join("theme/templates")).unwrap();
		fs::write(
			dir.path().join("theme/templates/messages.html"),
			"{% for m in messages %}<div class=\"message {{ m.class }}\">{{ m.text }}</div>{% endfor %}",
		)
		.unwrap();
		dir
	}

	#[test]
	fn boots_from_site_root() {
		let dir = site();
		let system = System::new(dir.path()).unwrap();
		assert_eq!(system.settings().site.name, "Conference");
		assert!(system.settings().database("default").is_some());
	}

	#[test]
	fn missing_settings_file_is_a_config_error() {
		let dir = tempdir().unwrap();
		assert!(System::new(dir.path()).is_err());
	}

	#[test]
	fn handled_errors_land_in_the_queue() {
		let dir = site();
		let system = System::new(dir.path()).unwrap();
		system.handle_error(&Error::Database("connection refused".into()));
		assert_eq!(
			system.messages().peek(Severity::Error),
			vec!["connection refused".to_string()]
		);
	}

	#[test]
	fn debug_sites_queue_the_internal_error_form() {
		let mut settings = Settings::default();
		settings.site.debug = true;
		let system = System::from_parts("/tmp/site", settings, Theme::empty());

		system.handle_error(&Error::Database("connection refused".into()));
		assert_eq!(
			system.messages().peek(Severity::Error),
			vec![r#"connection refused [Database("connection refused")]"#.to_string()]
		);
	}

	#[test]
	fn render_messages_drains_the_queue() {
		let dir = site();
		let system = System::new(dir.path()).unwrap();
		system.notice("Registration saved.");
		system.handle_error(&Error::Template("missing block".into()));

		let html = system.render_messages().unwrap();
		assert!(html.contains(r#"<div class="message notice">Registration saved.</div>"#));
		assert!(html.contains(r#"<div class="message error">missing block</div>"#));
		assert!(system.messages().is_empty());
	}

	#[test]
	fn render_messages_is_empty_for_an_empty_queue() {
		let dir = site();
		let system = System::new(dir.path()).unwrap();
		assert_eq!(system.render_messages().unwrap(), "");
	}

	#[tokio::test]
	async fn unknown_database_name_queues_an_error() {
		let dir = site();
		let system = System::new(dir.path()).unwrap();
		assert!(system.db("analytics").await.is_err());
		let errors = system.messages().take(Severity::Error);
		assert_eq!(errors, vec!["No database credentials named 'analytics'.".to_string()]);
	}
}
