//! Renderable HTML elements.

use crate::attributes::Attributes;
use crate::node::{RenderNode, Renderable};
use perseus_core::Result;
use serde_json::json;

/// Elements that close themselves and take no content.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
	"meta", "param", "source", "track", "wbr",
];

/// A single HTML tag in the render tree.
///
/// Renders through the `element` template; nested children render into
/// the element's content.
///
/// # Examples
///
/// ```
/// use perseus_theme::{HtmlElement, Theme};
///
/// let mut theme = Theme::empty();
/// theme
///     .add_raw_template(
///         "element",
///         "<{{ element }}{{ html_attributes(attrs=attributes) }}{% if self_closing %} />{% else %}>{{ content }}</{{ element }}>{% endif %}",
///     )
///     .unwrap();
///
/// let mut div = HtmlElement::new("div");
/// div.attributes.add_class("form-item");
/// div.set_content("Name");
/// assert_eq!(theme.render(&mut div).unwrap(), r#"<div class="form-item">Name</div>"#);
/// ```
pub struct HtmlElement {
	node: RenderNode,
	pub element: String,
	pub attributes: Attributes,
	content: String,
}

impl HtmlElement {
	pub fn new(element: impl Into<String>) -> Self {
		Self {
			node: RenderNode::new("element"),
			element: element.into(),
			attributes: Attributes::new(),
			content: String::new(),
		}
	}

	pub fn with_attributes(element: impl Into<String>, attributes: Attributes) -> Self {
		let mut el = Self::new(element);
		el.attributes = attributes;
		el
	}

	pub fn set_content(&mut self, content: impl Into<String>) {
		self.content = content.into();
	}

	pub fn set_weight(&mut self, weight: f64) {
		self.node.weight = weight;
	}

	/// Nest another renderable inside this element.
	pub fn add_child(&mut self, key: impl Into<String>, child: Box<dyn Renderable>) {
		self.node.add_child(key, child);
	}

	pub fn is_self_closing(&self) -> bool {
		VOID_ELEMENTS.contains(&self.element.as_str())
	}
}

impl Renderable for HtmlElement {
	fn node(&self) -> &RenderNode {
		&self.node
	}

	fn node_mut(&mut self) -> &mut RenderNode {
		&mut self.node
	}

	fn prepare(&mut self) -> Result<()> {
		self.node.content = self.content.clone();
		self.node
			.add_build_data("element", json!(self.element), false);
		self.node
			.add_build_data("self_closing", json!(self.is_self_closing()), false);
		self.node
			.add_build_data("attributes", self.attributes.to_value(), false);
		Ok(())
	}
}
