//! The form: named items, validation state machine, rendering.

use crate::element::build_element;
use crate::item::{FormItem, ItemDescription, ItemLabel};
use crate::request::RequestData;
use perseus_core::{MessageQueue, Result, Severity};
use perseus_theme::{HtmlElement, RenderNode, Renderable};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// HTTP method a form submits with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
	Get,
	#[default]
	Post,
}

impl Method {
	pub fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}

/// Validation state of a form.
///
/// `Unsubmitted -> Incomplete` when submitted data is detected;
/// `Incomplete -> Valid | Invalid` on [`Form::validate`]. Only `Valid`
/// lets [`Form::submit`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
	#[default]
	Unsubmitted,
	Unvalidated,
	Incomplete,
	Invalid,
	Valid,
}

/// Settings for constructing a form.
#[derive(Debug, Clone)]
pub struct FormSettings {
	pub name: String,
	pub action: String,
	pub method: Method,
	pub enctype: String,
}

impl FormSettings {
	pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			action: action.into(),
			method: Method::Post,
			enctype: "multipart/form-data".to_string(),
		}
	}

	pub fn with_method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}
}

/// A renderable form owning its items in insertion order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use perseus_core::MessageQueue;
/// use perseus_forms::{Form, FormItem, FormSettings, FormState, RequestData};
///
/// let messages = Arc::new(MessageQueue::new());
/// let mut form = Form::new(FormSettings::new("contact", "/contact"), messages);
/// form.add_item(FormItem::text("name").with_label("Name").required());
///
/// form.process_request(&RequestData::with_post(&[("name", "Ada")]));
/// assert_eq!(form.state(), FormState::Incomplete);
/// assert!(form.validate());
/// assert!(form.submit());
/// ```
pub struct Form {
	node: RenderNode,
	pub name: String,
	pub action: String,
	pub method: Method,
	pub enctype: String,
	items: Vec<FormItem>,
	data: HashMap<String, String>,
	state: FormState,
	next_weight: f64,
	messages: Arc<MessageQueue>,
}

impl Form {
	pub fn new(settings: FormSettings, messages: Arc<MessageQueue>) -> Self {
		Self {
			node: RenderNode::new("form/form"),
			name: settings.name,
			action: settings.action,
			method: settings.method,
			enctype: settings.enctype,
			items: Vec::new(),
			data: HashMap::new(),
			state: FormState::Unsubmitted,
			next_weight: 0.0,
			messages,
		}
	}

	/// Read submitted data matching the form's method. Non-empty data
	/// moves the form from `Unsubmitted` to `Incomplete` and seeds each
	/// item's posted value.
	pub fn process_request(&mut self, request: &RequestData) {
		let source = match self.method {
			Method::Get => &request.get,
			Method::Post => &request.post,
		};
		if source.is_empty() {
			return;
		}
		self.data = source.clone();
		self.state = FormState::Incomplete;
		for item in &mut self.items {
			item.posted_value = self.data.get(&item.name).cloned();
		}
		tracing::debug!(form = %self.name, fields = self.data.len(), "form data detected");
	}

	/// Add an item. Items added after data was processed pick up their
	/// posted value immediately; unweighted items get the next slot.
	pub fn add_item(&mut self, mut item: FormItem) {
		if let Some(value) = self.data.get(&item.name) {
			item.posted_value = Some(value.clone());
		}
		match item.weight {
			Some(weight) => {
				// Later unweighted items slot in after an explicit weight.
				self.next_weight = self.next_weight.max(weight + 1.0);
			}
			None => {
				item.weight = Some(self.next_weight);
				self.next_weight += 1.0;
			}
		}
		self.items.push(item);
	}

	pub fn state(&self) -> FormState {
		self.state
	}

	pub fn items(&self) -> &[FormItem] {
		&self.items
	}

	pub fn item(&self, name: &str) -> Option<&FormItem> {
		self.items.iter().find(|i| i.name == name)
	}

	pub fn item_mut(&mut self, name: &str) -> Option<&mut FormItem> {
		self.items.iter_mut().find(|i| i.name == name)
	}

	/// Submitted value for a field, if any.
	pub fn value(&self, name: &str) -> Option<&str> {
		self.data.get(name).map(String::as_str)
	}

	pub fn messages(&self) -> &Arc<MessageQueue> {
		&self.messages
	}

	/// Validate every item.
	///
	/// Returns false without touching the state when no data was
	/// submitted. Otherwise all items are validated in insertion order;
	/// one failure does not stop the loop, and the form becomes `Valid`
	/// only when every item passed.
	pub fn validate(&mut self) -> bool {
		if self.data.is_empty() {
			return false;
		}

		let mut valid = true;
		for item in &mut self.items {
			if !item.validate(&self.messages) {
				valid = false;
			}
		}

		self.state = if valid {
			FormState::Valid
		} else {
			FormState::Invalid
		};
		valid
	}

	/// Gate for submission handling.
	///
	/// Returns true only when the form is `Valid`; the other states
	/// queue a user-facing message (except `Unsubmitted`, which is
	/// silent) and return false.
	pub fn submit(&mut self) -> bool {
		match self.state {
			FormState::Valid => true,
			FormState::Unsubmitted => false,
			FormState::Unvalidated | FormState::Incomplete => {
				self.messages
					.add(Severity::Error, "Form has not been validated.");
				false
			}
			FormState::Invalid => {
				self.messages.add(
					Severity::Error,
					"There are errors in the form that need to be corrected.",
				);
				false
			}
		}
	}
}

impl Renderable for Form {
	fn node(&self) -> &RenderNode {
		&self.node
	}

	fn node_mut(&mut self) -> &mut RenderNode {
		&mut self.node
	}

	/// Build the form's attributes and one child per item: wrapped items
	/// render inside a `div.form-item` wrapper with label, element, and
	/// description ordered by weight; bare items contribute just their
	/// element.
	fn prepare(&mut self) -> Result<()> {
		self.node.add_build_data(
			"attributes",
			json!({
				"method": self.method.as_str(),
				"action": self.action,
				"enctype": self.enctype,
				"name": self.name,
				"id": self.name,
			}),
			false,
		);

		for item in &self.items {
			let weight = item.weight.unwrap_or_default();
			if item.wrap {
				let mut wrapper = HtmlElement::new("div");
				wrapper.attributes.add_class("form-item");
				wrapper.attributes.add_class(&item.name);
				wrapper.attributes.add_class(item.item_type.as_str());
				if item.validity() == crate::item::Validity::Invalid {
					wrapper.attributes.add_class("error");
				}
				{
					let node = wrapper.node_mut();
					node.remove_template("element");
					node.add_template("form/form-item");
					node.add_template(format!("form/form-item-{}", item.item_type.as_str()));
					node.add_build_data("required", json!(item.required), false);
					node.weight = weight;
				}

				if let Some(label) = &item.label {
					let mut label = ItemLabel::new(label, &item.name, item.required);
					label.node_mut().weight = 0.0;
					wrapper.add_child("label", Box::new(label));
				}

				let mut element = build_element(item);
				element.node_mut().weight = 1.0;
				wrapper.add_child("element", element);

				if let Some(desc) = &item.description {
					let mut desc = ItemDescription::new(desc);
					desc.node_mut().weight = 2.0;
					wrapper.add_child("desc", Box::new(desc));
				}

				self.node.add_child(item.name.clone(), Box::new(wrapper));
			} else {
				let mut element = build_element(item);
				element.node_mut().weight = weight;
				self.node
					.add_child(format!("{}-element", item.name), element);
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use perseus_theme::Theme;

	fn form_with(items: Vec<FormItem>) -> Form {
		let mut form = Form::new(
			FormSettings::new("test", "/submit"),
			Arc::new(MessageQueue::new()),
		);
		for item in items {
			form.add_item(item);
		}
		form
	}

	#[test]
	fn unsubmitted_form_never_validates() {
		let mut form = form_with(vec![FormItem::text("name")]);
		assert!(!form.validate());
		assert_eq!(form.state(), FormState::Unsubmitted);
	}

	#[test]
	fn data_detection_moves_to_incomplete() {
		let mut form = form_with(vec![FormItem::text("name")]);
		form.process_request(&RequestData::with_post(&[("name", "Ada")]));
		assert_eq!(form.state(), FormState::Incomplete);
		assert_eq!(form.item("name").unwrap().posted_value.as_deref(), Some("Ada"));
	}

	#[test]
	fn get_form_ignores_post_data() {
		let mut form = Form::new(
			FormSettings::new("search", "/search").with_method(Method::Get),
			Arc::new(MessageQueue::new()),
		);
		form.add_item(FormItem::text("q"));
		form.process_request(&RequestData::with_post(&[("q", "x")]));
		assert_eq!(form.state(), FormState::Unsubmitted);
	}

	#[test]
	fn required_empty_field_makes_form_invalid() {
		let mut form = form_with(vec![
			FormItem::text("name").with_label("Name").required(),
			FormItem::hidden("check_submit", "1"),
		]);
		form.process_request(&RequestData::with_post(&[("check_submit", "1")]));

		assert!(!form.validate());
		assert_eq!(form.state(), FormState::Invalid);
		assert_eq!(
			form.messages().take(Severity::Error),
			vec!["Field 'Name' is required.".to_string()]
		);
	}

	#[test]
	fn missing_required_email_queues_labeled_message() {
		let mut form = form_with(vec![
			FormItem::email("mail").with_label("E-Mail Address").required(),
			FormItem::hidden("check_submit", "1"),
		]);
		form.process_request(&RequestData::with_post(&[("check_submit", "1")]));

		assert!(!form.validate());
		assert_eq!(
			form.messages().take(Severity::Error),
			vec!["Field 'E-Mail Address' is required.".to_string()]
		);
	}

	#[test]
	fn one_failure_does_not_stop_validation() {
		let mut form = form_with(vec![
			FormItem::text("first").with_label("First").required(),
			FormItem::text("second").with_label("Second").required(),
		]);
		form.process_request(&RequestData::with_post(&[("other", "x")]));

		assert!(!form.validate());
		// Both items reported, not just the first.
		assert_eq!(
			form.messages().take(Severity::Error),
			vec![
				"Field 'First' is required.".to_string(),
				"Field 'Second' is required.".to_string(),
			]
		);
	}

	#[test]
	fn all_valid_items_make_the_form_valid() {
		let mut form = form_with(vec![
			FormItem::text("name").required(),
			FormItem::email("mail").required(),
		]);
		form.process_request(&RequestData::with_post(&[
			("name", "Ada"),
			("mail", "ada@example.com"),
		]));

		assert!(form.validate());
		assert_eq!(form.state(), FormState::Valid);
	}

	#[test]
	fn submit_refuses_unvalidated_form() {
		let mut form = form_with(vec![FormItem::text("name")]);
		form.process_request(&RequestData::with_post(&[("name", "Ada")]));

		assert!(!form.submit());
		assert_eq!(
			form.messages().take(Severity::Error),
			vec!["Form has not been validated.".to_string()]
		);
	}

	#[test]
	fn submit_refuses_invalid_form() {
		let mut form = form_with(vec![FormItem::text("name").required()]);
		form.process_request(&RequestData::with_post(&[("other", "1")]));
		form.validate();
		form.messages().take_all();

		assert!(!form.submit());
		assert_eq!(
			form.messages().take(Severity::Error),
			vec!["There are errors in the form that need to be corrected.".to_string()]
		);
	}

	#[test]
	fn submit_on_unsubmitted_form_is_silent() {
		let mut form = form_with(vec![FormItem::text("name")]);
		assert!(!form.submit());
		assert!(form.messages().is_empty());
	}

	#[test]
	fn submit_runs_after_successful_validation() {
		let mut form = form_with(vec![FormItem::text("name").required()]);
		form.process_request(&RequestData::with_post(&[("name", "Ada")]));
		assert!(form.validate());
		assert!(form.submit());
	}

	fn test_theme() -> Theme {
		let mut theme = Theme::empty();
		theme
			.add_raw_template(
				"element",
				"<{{ element }}{{ html_attributes(attrs=attributes) }}{% if self_closing %} />{% else %}>{{ content }}</{{ element }}>{% endif %}",
			)
			.unwrap();
		theme
			.add_raw_template(
				"form/form",
				"<form{{ html_attributes(attrs=attributes) }}>{{ content }}</form>",
			)
			.unwrap();
		theme
			.add_raw_template(
				"form/form-item",
				"<div{{ html_attributes(attrs=attributes) }}>{{ content }}</div>",
			)
			.unwrap();
		theme
			.add_raw_template(
				"form/item-label",
				"<label{{ html_attributes(attrs=attributes) }}>{{ content }}{% if required %}<span class=\"required\">*</span>{% endif %}</label>",
			)
			.unwrap();
		theme
			.add_raw_template(
				"form/item-description",
				"<div{{ html_attributes(attrs=attributes) }}>{{ content }}</div>",
			)
			.unwrap();
		theme.add_raw_template("markup", "{{ content }}").unwrap();
		theme
	}

	#[test]
	fn renders_wrapped_item_with_label_and_description() {
		let theme = test_theme();
		let mut form = form_with(vec![
			FormItem::text("city")
				.with_label("City:")
				.with_description("Your home town."),
		]);

		let out = theme.render(&mut form).unwrap();
		assert!(out.starts_with(
			r#"<form method="POST" action="/submit" enctype="multipart/form-data" name="test" id="test">"#
		));
		assert!(out.contains(r#"<div class="form-item city text">"#));
		assert!(out.contains(r#"<label for="city">City:</label>"#));
		assert!(out.contains(r#"<input type="text" name="city" />"#));
		assert!(out.contains(r#"<div class="description">Your home town.</div>"#));
	}

	#[test]
	fn required_label_gets_a_marker() {
		let theme = test_theme();
		let mut form = form_with(vec![FormItem::text("name").with_label("Name").required()]);
		let out = theme.render(&mut form).unwrap();
		assert!(out.contains(r#"<label for="name">Name<span class="required">*</span></label>"#));
	}

	#[test]
	fn bare_items_render_without_wrapper() {
		let theme = test_theme();
		let mut form = form_with(vec![FormItem::hidden("check_submit", "1")]);
		let out = theme.render(&mut form).unwrap();
		assert!(out.contains(r#"<input type="hidden" name="check_submit" value="1" />"#));
		assert!(!out.contains("form-item"));
	}

	#[test]
	fn items_render_in_insertion_order() {
		let theme = test_theme();
		let mut form = form_with(vec![
			FormItem::text("first"),
			FormItem::text("second"),
			FormItem::submit("go", "Register"),
		]);
		let out = theme.render(&mut form).unwrap();
		let first = out.find(r#"name="first""#).unwrap();
		let second = out.find(r#"name="second""#).unwrap();
		let go = out.find(r#"name="go""#).unwrap();
		assert!(first < second && second < go);
	}

	#[test]
	fn invalid_item_wrapper_is_flagged() {
		let theme = test_theme();
		let mut form = form_with(vec![FormItem::text("name").with_label("Name").required()]);
		form.process_request(&RequestData::with_post(&[("other", "1")]));
		form.validate();

		let out = theme.render(&mut form).unwrap();
		assert!(out.contains(r#"<div class="form-item name text error">"#));
	}

	#[test]
	fn rendering_twice_yields_identical_output() {
		let theme = test_theme();
		let mut form = form_with(vec![
			FormItem::text("name").with_label("Name"),
			FormItem::submit("go", "Send"),
		]);
		let first = theme.render(&mut form).unwrap();
		let second = theme.render(&mut form).unwrap();
		assert_eq!(first, second);
	}
}
