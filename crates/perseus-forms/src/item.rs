//! Form items: one logical field with its label and description.

use crate::validators::Validator;
use perseus_core::{MessageQueue, Severity};
use perseus_theme::{Attributes, RenderNode, Renderable};
use serde_json::json;

/// The kind of input a [`FormItem`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
	Text,
	Email,
	Hidden,
	Textarea,
	Select,
	Radios,
	Submit,
	/// Static markup with no input element.
	Markup,
}

impl ItemType {
	pub fn as_str(self) -> &'static str {
		match self {
			ItemType::Text => "text",
			ItemType::Email => "email",
			ItemType::Hidden => "hidden",
			ItemType::Textarea => "textarea",
			ItemType::Select => "select",
			ItemType::Radios => "radios",
			ItemType::Submit => "submit",
			ItemType::Markup => "markup",
		}
	}

	/// Whether items of this type render inside a `div.form-item` wrapper.
	pub fn wraps(self) -> bool {
		!matches!(self, ItemType::Hidden | ItemType::Submit | ItemType::Markup)
	}
}

/// Validation status of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
	#[default]
	Unchecked,
	Valid,
	Invalid,
}

/// A single logical field in a form.
///
/// Built with the type constructors plus builder methods:
///
/// ```
/// use perseus_forms::FormItem;
///
/// let email = FormItem::email("mail")
///     .with_label("E-Mail Address")
///     .required();
/// assert!(email.required);
/// ```
#[derive(Debug, Clone)]
pub struct FormItem {
	pub name: String,
	pub item_type: ItemType,
	pub label: Option<String>,
	pub description: Option<String>,
	pub placeholder: Option<String>,
	pub required: bool,
	pub wrap: bool,
	pub default_value: Option<String>,
	pub posted_value: Option<String>,
	/// `(value, label)` pairs for selects and radio groups.
	pub options: Vec<(String, String)>,
	pub attributes: Attributes,
	/// Explicit weight; unweighted items get one from the form.
	pub weight: Option<f64>,
	validators: Vec<Validator>,
	validity: Validity,
}

impl FormItem {
	fn new(name: impl Into<String>, item_type: ItemType) -> Self {
		Self {
			name: name.into(),
			item_type,
			label: None,
			description: None,
			placeholder: None,
			required: false,
			wrap: item_type.wraps(),
			default_value: None,
			posted_value: None,
			options: Vec::new(),
			attributes: Attributes::new(),
			weight: None,
			validators: Vec::new(),
			validity: Validity::Unchecked,
		}
	}

	pub fn text(name: impl Into<String>) -> Self {
		Self::new(name, ItemType::Text)
	}

	pub fn email(name: impl Into<String>) -> Self {
		Self::new(name, ItemType::Email).with_validator(Validator::Email)
	}

	pub fn hidden(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self::new(name, ItemType::Hidden).with_default(value)
	}

	pub fn textarea(name: impl Into<String>) -> Self {
		Self::new(name, ItemType::Textarea)
	}

	pub fn select(name: impl Into<String>, options: Vec<(String, String)>) -> Self {
		let mut item = Self::new(name, ItemType::Select);
		item.options = options;
		item
	}

	pub fn radios(name: impl Into<String>, options: Vec<(String, String)>) -> Self {
		let mut item = Self::new(name, ItemType::Radios);
		item.options = options;
		item
	}

	pub fn submit(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self::new(name, ItemType::Submit).with_default(value)
	}

	/// A block of static markup rendered among the fields.
	pub fn markup(name: impl Into<String>, html: impl Into<String>) -> Self {
		Self::new(name, ItemType::Markup).with_default(html)
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_default(mut self, value: impl Into<String>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	pub fn with_validator(mut self, validator: Validator) -> Self {
		self.validators.push(validator);
		self
	}

	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.attributes.set(name, value);
		self
	}

	pub fn with_weight(mut self, weight: f64) -> Self {
		self.weight = Some(weight);
		self
	}

	/// The value the element renders: submitted beats default.
	pub fn current_value(&self) -> Option<&str> {
		self.posted_value
			.as_deref()
			.or(self.default_value.as_deref())
	}

	pub fn validity(&self) -> Validity {
		self.validity
	}

	/// Whether the item has been checked and passed.
	pub fn is_valid(&self) -> bool {
		self.validity == Validity::Valid
	}

	/// Clear the error flag so the item may be validated again.
	pub fn reset_validation(&mut self) {
		self.validity = Validity::Unchecked;
	}

	/// Label for user-facing messages, falling back to the name.
	pub fn display_name(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.name)
	}

	/// Validate the submitted value.
	///
	/// The required-field check runs before the item's validators. An
	/// item already marked invalid stays invalid until
	/// [`FormItem::reset_validation`]; first error wins.
	pub fn validate(&mut self, messages: &MessageQueue) -> bool {
		if self.validity == Validity::Invalid {
			return false;
		}

		let value = self.posted_value.clone().unwrap_or_default();
		let mut errors = Vec::new();

		if self.required && value.trim().is_empty() {
			errors.push(format!("Field '{}' is required.", self.display_name()));
		} else if !value.is_empty() {
			for validator in &self.validators {
				if let Err(msg) = validator.check(self.display_name(), &value) {
					errors.push(msg);
				}
			}
		}

		for msg in errors {
			self.set_error(messages, msg);
		}

		if self.validity == Validity::Unchecked {
			self.validity = Validity::Valid;
		}
		self.is_valid()
	}

	/// Report a validation error: queue the message and mark the item
	/// invalid. A no-op once the item is already invalid.
	pub fn set_error(&mut self, messages: &MessageQueue, msg: impl Into<String>) {
		if self.validity == Validity::Invalid {
			return;
		}
		messages.add(Severity::Error, msg);
		self.validity = Validity::Invalid;
	}
}

/// The `<label>` rendered beside an item's element.
pub(crate) struct ItemLabel {
	node: RenderNode,
	text: String,
	for_name: String,
	required: bool,
}

impl ItemLabel {
	pub(crate) fn new(text: &str, for_name: &str, required: bool) -> Self {
		Self {
			node: RenderNode::new("form/item-label"),
			text: text.to_string(),
			for_name: for_name.to_string(),
			required,
		}
	}
}

impl Renderable for ItemLabel {
	fn node(&self) -> &RenderNode {
		&self.node
	}

	fn node_mut(&mut self) -> &mut RenderNode {
		&mut self.node
	}

	fn prepare(&mut self) -> perseus_core::Result<()> {
		self.node.add_build_data("content", json!(self.text), false);
		self.node
			.add_build_data("attributes", json!({"for": self.for_name}), false);
		self.node
			.add_build_data("required", json!(self.required), false);
		Ok(())
	}
}

/// The help text rendered under an item's element.
pub(crate) struct ItemDescription {
	node: RenderNode,
	text: String,
}

impl ItemDescription {
	pub(crate) fn new(text: &str) -> Self {
		Self {
			node: RenderNode::new("form/item-description"),
			text: text.to_string(),
		}
	}
}

impl Renderable for ItemDescription {
	fn node(&self) -> &RenderNode {
		&self.node
	}

	fn node_mut(&mut self) -> &mut RenderNode {
		&mut self.node
	}

	fn prepare(&mut self) -> perseus_core::Result<()> {
		self.node.add_build_data("content", json!(self.text), false);
		self.node
			.add_build_data("attributes", json!({"class": ["description"]}), false);
		Ok(())
	}
}
