//! The renderable node tree.

use perseus_core::Result;
use serde_json::{Map, Value};

/// A node in the render tree.
///
/// Holds the candidate templates (most specific last), the build-data
/// map handed to the template engine, weighted children, the node's own
/// static content, and the markup produced by the last render.
#[derive(Default)]
pub struct RenderNode {
	templates: Vec<String>,
	data: Map<String, Value>,
	children: Vec<(String, Box<dyn Renderable>)>,
	/// Sort key among siblings; ties are broken in insertion order.
	pub weight: f64,
	/// The node's own content, placed before rendered children.
	pub content: String,
	/// Markup produced by the last render pass.
	pub rendered: Option<String>,
}

impl RenderNode {
	/// Create a node with one initial template.
	pub fn new(template: impl Into<String>) -> Self {
		let mut node = Self::default();
		node.add_template(template);
		node
	}

	/// Register a candidate template; later additions are more specific.
	/// Duplicates are ignored.
	pub fn add_template(&mut self, template: impl Into<String>) {
		let template = template.into();
		if !self.templates.contains(&template) {
			self.templates.push(template);
		}
	}

	pub fn remove_template(&mut self, template: &str) {
		self.templates.retain(|t| t != template);
	}

	pub fn templates(&self) -> &[String] {
		&self.templates
	}

	/// Set build data for the template.
	///
	/// With `append`, strings concatenate, arrays extend, and maps merge
	/// keeping existing entries; any other combination replaces.
	pub fn add_build_data(&mut self, key: impl Into<String>, value: Value, append: bool) {
		let key = key.into();
		if append && let Some(existing) = self.data.get_mut(&key) {
			match (existing, value) {
				(Value::String(old), Value::String(new)) => old.push_str(&new),
				(Value::Array(old), Value::Array(new)) => old.extend(new),
				(Value::Object(old), Value::Object(new)) => {
					for (k, v) in new {
						old.entry(k).or_insert(v);
					}
				}
				(existing, value) => *existing = value,
			}
			return;
		}
		self.data.insert(key, value);
	}

	pub fn build_data(&self) -> &Map<String, Value> {
		&self.data
	}

	pub fn build_data_mut(&mut self) -> &mut Map<String, Value> {
		&mut self.data
	}

	/// Nest a child renderable under a key. An existing child under the
	/// same key is replaced in place.
	pub fn add_child(&mut self, key: impl Into<String>, child: Box<dyn Renderable>) {
		let key = key.into();
		if let Some(slot) = self.children.iter_mut().find(|(k, _)| *k == key) {
			slot.1 = child;
		} else {
			self.children.push((key, child));
		}
	}

	pub fn remove_child(&mut self, key: &str) {
		self.children.retain(|(k, _)| k != key);
	}

	pub fn child(&self, key: &str) -> Option<&dyn Renderable> {
		self.children
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, c)| c.as_ref())
	}

	pub fn children(&self) -> &[(String, Box<dyn Renderable>)] {
		&self.children
	}

	pub(crate) fn children_mut(&mut self) -> &mut Vec<(String, Box<dyn Renderable>)> {
		&mut self.children
	}

	/// Child keys in render order: ascending weight, with colliding
	/// weights bumped by a tie-break fraction in insertion order.
	pub fn render_order(&self) -> Vec<usize> {
		let mut used: Vec<f64> = Vec::with_capacity(self.children.len());
		let mut keyed: Vec<(f64, usize)> = self
			.children
			.iter()
			.enumerate()
			.map(|(idx, (_, child))| {
				let mut weight = child.node().weight;
				while used.iter().any(|u| (u - weight).abs() < f64::EPSILON) {
					weight += 0.001;
				}
				used.push(weight);
				(weight, idx)
			})
			.collect();
		keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
		keyed.into_iter().map(|(_, idx)| idx).collect()
	}
}

/// A node that can prepare build data and be themed into markup.
///
/// `prepare()` must set (not accumulate) the node's build data so that a
/// prepare-then-render cycle can be repeated with identical output.
pub trait Renderable: Send {
	fn node(&self) -> &RenderNode;
	fn node_mut(&mut self) -> &mut RenderNode;

	/// Populate build data and children ahead of rendering.
	fn prepare(&mut self) -> Result<()>;
}

impl Renderable for RenderNode {
	fn node(&self) -> &RenderNode {
		self
	}

	fn node_mut(&mut self) -> &mut RenderNode {
		self
	}

	fn prepare(&mut self) -> Result<()> {
		Ok(())
	}
}
