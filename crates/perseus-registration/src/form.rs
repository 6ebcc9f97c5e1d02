//! The conference registration form definition.

use crate::data::{countries, state_options};
use perseus_core::MessageQueue;
use perseus_forms::{Form, FormItem, FormSettings, Validator};
use std::sync::Arc;

const PROVISIONS: &str = "<strong>Provisions:</strong> Continental breakfast, lunch, and \
afternoon breaks will be provided for each day. Please indicate if you will require a \
vegetarian meal for lunch or if you have any other special dietary requests.";

const CONTACT: &str = "<strong>Please submit this registration form no later than the \
published deadline.</strong><br /><br />Questions go to the registration desk listed on \
the conference page.";

/// Build the registration form.
///
/// The field roster is fixed: contact inputs, state and country
/// selects, an email input, meal-preference radios, a dietary-needs
/// textarea, static instruction blocks, the hidden `check_submit`
/// marker, and the submit button. Required fields are name,
/// affiliation, state, phone, email, meal, and dietary needs.
pub struct RegistrationForm;

impl RegistrationForm {
	pub fn build(messages: Arc<MessageQueue>) -> Form {
		Self::with_settings(FormSettings::new("registration", "index.php"), messages)
	}

	pub fn with_settings(settings: FormSettings, messages: Arc<MessageQueue>) -> Form {
		let mut form = Form::new(settings, messages);

		form.add_item(
			FormItem::text("name")
				.with_label("First, Middle Initial & Last:")
				.with_attribute("maxlength", 128)
				.with_attribute("size", 39)
				.required()
				.with_validator(Validator::PlainText)
				// Leave room for items weighted in front of the name.
				.with_weight(10.0),
		);
		form.add_item(FormItem::hidden("check_submit", "1"));
		form.add_item(
			FormItem::text("affiliation")
				.with_label("Affiliation:")
				.with_attribute("maxlength", 128)
				.with_attribute("size", 39)
				.required()
				.with_validator(Validator::PlainText),
		);
		form.add_item(
			FormItem::text("address")
				.with_label("Address:")
				.with_attribute("maxlength", 128)
				.with_attribute("size", 39)
				.with_validator(Validator::PlainText),
		);
		form.add_item(
			FormItem::text("city")
				.with_label("City:")
				.with_attribute("maxlength", 128)
				.with_attribute("size", 39)
				.with_validator(Validator::PlainText),
		);
		form.add_item(
			FormItem::select("state", state_options())
				.with_label("State/Province:")
				.required(),
		);
		form.add_item(FormItem::select("country", countries()).with_label("Country:"));
		form.add_item(
			FormItem::text("zip")
				.with_label("Zip/Postal Code:")
				.with_attribute("maxlength", 10)
				.with_attribute("size", 39)
				.with_validator(Validator::PlainText),
		);
		form.add_item(
			FormItem::text("phone")
				.with_label("Phone:")
				.with_attribute("maxlength", 20)
				.with_attribute("size", 39)
				.required()
				.with_validator(Validator::Phone),
		);
		form.add_item(
			FormItem::text("fax")
				.with_label("Fax:")
				.with_attribute("maxlength", 20)
				.with_attribute("size", 39)
				.with_validator(Validator::PlainText),
		);
		form.add_item(
			FormItem::email("mail")
				.with_label("E-mail")
				.with_attribute("maxlength", 255)
				.with_attribute("size", 39)
				.required(),
		);
		form.add_item(FormItem::markup("provisions", PROVISIONS));
		form.add_item(
			FormItem::radios(
				"meal",
				vec![
					("0".to_string(), "No".to_string()),
					("1".to_string(), "Yes".to_string()),
				],
			)
			.with_label("I will require a Vegetarian meal:")
			.with_default("0")
			.required(),
		);
		form.add_item(
			FormItem::textarea("dietary_needs")
				.with_label("Other special dietary needs:")
				.with_attribute("maxlength", 255)
				.with_attribute("cols", 39)
				.with_attribute("rows", 5)
				.required(),
		);
		form.add_item(FormItem::markup("contact", CONTACT));
		form.add_item(FormItem::submit("submit", "Submit"));

		form
	}
}
