//! End-to-end rendering of the registration form through the default
//! theme shipped in `theme/templates`.

use perseus::core::{MessageQueue, Severity};
use perseus::forms::RequestData;
use perseus::theme::Theme;
use perseus_registration::RegistrationForm;
use std::path::PathBuf;

fn default_theme() -> Theme {
	let templates = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("theme/templates");
	Theme::new(&[templates]).expect("default theme loads")
}

#[test]
fn registration_form_renders_with_the_default_theme() {
	let theme = default_theme();
	let mut form = RegistrationForm::build(MessageQueue::shared());

	let html = theme.render(&mut form).expect("form renders");

	assert!(html.starts_with(
		r#"<form method="POST" action="index.php" enctype="multipart/form-data" name="registration" id="registration">"#
	));
	assert!(html.contains(
		r#"<label for="name">First, Middle Initial & Last:<span class="required">*</span></label>"#
	));
	assert!(html.contains(r#"<input type="hidden" name="check_submit" value="1" />"#));
	assert!(html.contains(r#"<option value="CO">Colorado</option>"#));
	assert!(html.contains(r#"<option value="QC">Quebec</option>"#));
	assert!(html.contains(r#"value="1" id="meal-1""#));
	assert!(html.contains("<strong>Provisions:</strong>"));
	assert!(html.contains(r#"<textarea name="dietary_needs""#));
	assert!(html.contains(r#"<input type="submit" name="submit" value="Submit" />"#));
}

#[test]
fn fields_render_in_roster_order() {
	let theme = default_theme();
	let mut form = RegistrationForm::build(MessageQueue::shared());
	let html = theme.render(&mut form).expect("form renders");

	let name = html.find(r#"name="name""#).unwrap();
	let affiliation = html.find(r#"name="affiliation""#).unwrap();
	let mail = html.find(r#"name="mail""#).unwrap();
	let submit = html.find(r#"name="submit""#).unwrap();
	assert!(name < affiliation && affiliation < mail && mail < submit);
}

#[test]
fn submitted_values_round_trip_into_the_markup() {
	let theme = default_theme();
	let messages = MessageQueue::shared();
	let mut form = RegistrationForm::build(messages.clone());

	form.process_request(&RequestData::with_post(&[
		("check_submit", "1"),
		("name", "Ada B. Lovelace"),
		("affiliation", "Analytical Engines Ltd"),
		("state", "CO"),
		("phone", "(303) 384-6233"),
		("mail", "ada@example.com"),
		("meal", "1"),
		("dietary_needs", "none"),
	]));
	assert!(form.validate());
	assert!(form.submit());

	let html = theme.render(&mut form).expect("form renders");
	assert!(html.contains(r#"value="Ada B. Lovelace""#));
	assert!(html.contains(r#"<option value="CO" selected="selected">Colorado</option>"#));
	assert!(html.contains(r#"value="1" id="meal-1" checked="checked""#));
	assert!(html.contains("<textarea"));
	assert!(messages.is_empty());
}

#[test]
fn invalid_submission_flags_fields_and_queues_errors() {
	let theme = default_theme();
	let messages = MessageQueue::shared();
	let mut form = RegistrationForm::build(messages.clone());

	form.process_request(&RequestData::with_post(&[
		("check_submit", "1"),
		("name", "Ada"),
		("mail", "not-an-address"),
	]));
	assert!(!form.validate());

	let html = theme.render(&mut form).expect("form renders");
	assert!(html.contains(r#"class="form-item mail email error""#));

	let errors = messages.take(Severity::Error);
	assert!(errors.contains(&"Field 'E-mail' is not a valid email address.".to_string()));
	assert!(errors.contains(&"Field 'Affiliation:' is required.".to_string()));
}
