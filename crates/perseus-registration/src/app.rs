//! Registration page flow: persist, confirm, thank.

use crate::form::RegistrationForm;
use indexmap::IndexMap;
use perseus_core::Result;
use perseus_db::{MySqlService, SqlValue};
use perseus_forms::{Form, RequestData};
use perseus_mail::{MailBackend, MailMessage};
use perseus_services::CsvExporter;
use perseus_system::System;

/// The registrants table.
pub const REGISTRATION_TABLE: &str = "registration";

/// Column order used for inserts and the CSV export.
pub const REGISTRATION_COLUMNS: [&str; 12] = [
	"name",
	"affiliation",
	"address",
	"city",
	"state",
	"country",
	"zip",
	"phone",
	"fax",
	"mail",
	"meal",
	"dietary_needs",
];

/// Columns shown on the registrants listing page.
pub const LISTING_COLUMNS: [&str; 4] = ["name", "affiliation", "phone", "mail"];

/// One registration page request.
pub struct RegistrationApp<'a> {
	system: &'a System,
	pub form: Form,
}

impl<'a> RegistrationApp<'a> {
	pub fn new(system: &'a System) -> Self {
		Self {
			system,
			form: RegistrationForm::build(system.messages()),
		}
	}

	/// Process one request end to end.
	///
	/// Binds the request to the form and, when the submission is valid,
	/// stores the registrant, sends the confirmation mail, and queues
	/// the thank-you notice. Database and mail failures degrade to
	/// queued messages; the registration still counts as handled.
	/// Returns whether a valid submission was processed.
	pub async fn handle(&mut self, request: &RequestData, mail: &dyn MailBackend) -> bool {
		self.form.process_request(request);
		self.form.validate();
		if !self.form.submit() {
			return false;
		}

		if let Ok(db) = self.system.db("default").await {
			db.insert(REGISTRATION_TABLE, &self.record()).await;
		}

		let messages = self.system.messages();
		self.confirmation_mail().send(mail, &messages).await;

		self.system.notice("Thank you for submitting your registration.");
		tracing::info!(
			registrant = self.form.value("name").unwrap_or_default(),
			"registration stored"
		);
		true
	}

	/// The database row for the submitted form, in fixed column order.
	/// Newlines in the dietary-needs text become `<br />` markup and
	/// the meal choice is stored numerically.
	pub fn record(&self) -> IndexMap<String, SqlValue> {
		REGISTRATION_COLUMNS
			.iter()
			.map(|&column| {
				let value = self.form.value(column).unwrap_or_default();
				let value = match column {
					"dietary_needs" => SqlValue::Text(nl2br(value)),
					"meal" => SqlValue::Int(value.parse().unwrap_or(0)),
					_ => SqlValue::Text(value.to_string()),
				};
				(column.to_string(), value)
			})
			.collect()
	}

	/// Confirmation mail summarizing the submission, sent to the site
	/// mail address with the registrant on reply-to.
	fn confirmation_mail(&self) -> MailMessage {
		let settings = self.system.settings();
		let name = self.form.value("name").unwrap_or_default().to_string();
		let registrant_mail = self.form.value("mail").unwrap_or_default().to_string();

		let mut body = format!(
			"The following information has been added to the {} registration database:<br /><br />",
			settings.site.name
		);
		for column in REGISTRATION_COLUMNS {
			let value = match column {
				"meal" if self.form.value("meal") == Some("1") => "Yes".to_string(),
				"meal" => "No".to_string(),
				_ => self.form.value(column).unwrap_or_default().to_string(),
			};
			body.push_str(&format!("{}: {}<br />", field_label(column), value));
		}

		MailMessage::new()
			.to(settings.mail.from.clone())
			.from(registrant_mail.clone())
			.reply_to(registrant_mail)
			.subject(format!("{} registration: {}", settings.site.name, name))
			.body(body)
			.html()
	}

	/// Render the form with the site theme.
	pub fn render(&mut self) -> Result<String> {
		self.system.render(&mut self.form)
	}
}

/// Fetch the listing rows, one map per registrant.
pub async fn registrants(db: &MySqlService) -> Vec<IndexMap<String, SqlValue>> {
	db.select(REGISTRATION_TABLE, &LISTING_COLUMNS, &[]).await
}

/// Export every registrant as CSV with capitalized column headers.
pub async fn export_csv(db: &MySqlService) -> Result<String> {
	let headers: Vec<String> = REGISTRATION_COLUMNS.iter().map(|c| field_label(c)).collect();
	let mut exporter = CsvExporter::new(headers);
	for row in db.select(REGISTRATION_TABLE, &REGISTRATION_COLUMNS, &[]).await {
		exporter.add_record(
			row.iter()
				.map(|(column, value)| (field_label(column), value.as_text()))
				.collect(),
		);
	}
	exporter.to_csv_string()
}

/// Human-facing label for a column: first letter capitalized, with the
/// dietary-needs column spelled out.
fn field_label(column: &str) -> String {
	if column == "dietary_needs" {
		return "Dietary needs".to_string();
	}
	let mut chars = column.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Insert `<br />` markup before each newline, keeping the newline.
fn nl2br(text: &str) -> String {
	text.replace("\r\n", "\n").replace('\n', "<br />\n")
}

#[cfg(test)]
mod tests {
	use super::*;
	use perseus_conf::Settings;
	use perseus_core::Severity;
	use perseus_theme::Theme;

	fn post() -> RequestData {
		RequestData::with_post(&[
			("check_submit", "1"),
			("name", "Ada B. Lovelace"),
			("affiliation", "Analytical Engines Ltd"),
			("address", "15013 Denver West Parkway"),
			("city", "Golden"),
			("state", "CO"),
			("country", "US"),
			("zip", "80401"),
			("phone", "(303) 384-6233"),
			("mail", "ada@example.com"),
			("meal", "1"),
			("dietary_needs", "gluten free\nno peanuts"),
		])
	}

	fn system() -> System {
		let mut settings = Settings::default();
		settings.site.name = "Characterization Workshop".to_string();
		settings.mail.from = "registration@example.com".to_string();
		System::from_parts("/tmp/site", settings, Theme::empty())
	}

	fn bound_app(system: &System) -> RegistrationApp<'_> {
		let mut app = RegistrationApp::new(system);
		app.form.process_request(&post());
		app.form.validate();
		app
	}

	#[test]
	fn record_follows_the_column_order() {
		let system = system();
		let app = bound_app(&system);
		let record = app.record();
		let columns: Vec<&str> = record.keys().map(String::as_str).collect();
		assert_eq!(columns, REGISTRATION_COLUMNS);
	}

	#[test]
	fn record_converts_meal_and_dietary_needs() {
		let system = system();
		let record = bound_app(&system).record();
		assert_eq!(record["meal"], SqlValue::Int(1));
		assert_eq!(
			record["dietary_needs"],
			SqlValue::Text("gluten free<br />\nno peanuts".to_string())
		);
		assert_eq!(record["city"], SqlValue::Text("Golden".to_string()));
	}

	#[test]
	fn confirmation_mail_summarizes_the_submission() {
		let system = system();
		let app = bound_app(&system);
		let mail = app.confirmation_mail();

		assert_eq!(mail.to, vec!["registration@example.com".to_string()]);
		assert_eq!(mail.from, "ada@example.com");
		assert_eq!(mail.reply_to.as_deref(), Some("ada@example.com"));
		assert_eq!(
			mail.subject,
			"Characterization Workshop registration: Ada B. Lovelace"
		);
		assert!(mail.body.contains("Name: Ada B. Lovelace<br />"));
		assert!(mail.body.contains("Meal: Yes<br />"));
		assert!(mail.body.contains("Dietary needs: gluten free"));
	}

	#[tokio::test]
	async fn incomplete_submission_is_not_handled() {
		let system = system();
		let backend = perseus_mail::MemoryBackend::new();
		let mut app = RegistrationApp::new(&system);

		let handled = app
			.handle(&RequestData::with_post(&[("check_submit", "1")]), &backend)
			.await;
		assert!(!handled);
		assert!(backend.sent().is_empty());
		// The required-field errors and the form-level error are queued.
		assert!(!system.messages().peek(Severity::Error).is_empty());
	}

	#[test]
	fn field_labels_capitalize() {
		assert_eq!(field_label("name"), "Name");
		assert_eq!(field_label("dietary_needs"), "Dietary needs");
	}
}
