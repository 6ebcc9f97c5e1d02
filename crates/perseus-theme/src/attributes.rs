//! HTML attribute maps.

use indexmap::IndexMap;
use serde_json::{Value, json};

/// An ordered HTML attribute map.
///
/// The `class` attribute accumulates into a list; every other attribute
/// is single-valued and overwritten on set. Values are escaped when the
/// map is rendered.
///
/// # Examples
///
/// ```
/// use perseus_theme::Attributes;
///
/// let mut attrs = Attributes::new();
/// attrs.set("name", "email");
/// attrs.add_class("form-item");
/// attrs.add_class("required");
/// assert_eq!(attrs.render(), r#" name="email" class="form-item required""#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Attributes {
	map: IndexMap<String, Value>,
}

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set an attribute. `class` is routed through [`Attributes::add_class`].
	pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		let name = name.into();
		let value = value.into();
		if name == "class" {
			match value {
				Value::String(s) => self.add_class(&s),
				Value::Array(list) => {
					for v in list {
						if let Value::String(s) = v {
							self.add_class(&s);
						}
					}
				}
				_ => {}
			}
		} else {
			self.map.insert(name, value);
		}
	}

	/// Append a CSS class, keeping earlier ones.
	pub fn add_class(&mut self, class: &str) {
		let entry = self
			.map
			.entry("class".to_string())
			.or_insert_with(|| json!([]));
		if let Value::Array(list) = entry {
			list.push(json!(class));
		}
	}

	/// Fill in attributes from `defaults` that are not yet set.
	pub fn merge_defaults(&mut self, defaults: &Attributes) {
		for (name, value) in &defaults.map {
			if !self.map.contains_key(name) {
				self.map.insert(name.clone(), value.clone());
			}
		}
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.map.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.map.contains_key(name)
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}

	/// The map as template build data.
	pub fn to_value(&self) -> Value {
		Value::Object(self.map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	/// Render the attributes as ` key="value"` pairs with escaped values.
	pub fn render(&self) -> String {
		render_value_map(self.map.iter().map(|(k, v)| (k.as_str(), v)))
	}
}

/// Render an attribute map into ` key="value"` pairs.
///
/// Lists (class sets) are joined with spaces; values are HTML-escaped.
/// Shared with the `html_attributes` template function.
pub(crate) fn render_value_map<'a>(
	entries: impl Iterator<Item = (&'a str, &'a Value)>,
) -> String {
	let mut out = String::new();
	for (name, value) in entries {
		let text = match value {
			Value::Array(list) => list
				.iter()
				.map(value_text)
				.collect::<Vec<_>>()
				.join(" "),
			other => value_text(other),
		};
		out.push_str(&format!(" {}=\"{}\"", name, tera::escape_html(&text)));
	}
	out
}

fn value_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classes_accumulate() {
		let mut attrs = Attributes::new();
		attrs.set("class", "first");
		attrs.add_class("second");
		assert_eq!(attrs.render(), r#" class="first second""#);
	}

	#[test]
	fn values_are_escaped() {
		let mut attrs = Attributes::new();
		attrs.set("value", "a \"b\" <c>");
		assert_eq!(attrs.render(), r#" value="a &quot;b&quot; &lt;c&gt;""#);
	}

	#[test]
	fn merge_defaults_fills_unset_only() {
		let mut attrs = Attributes::new();
		attrs.set("size", 20);

		let mut defaults = Attributes::new();
		defaults.set("size", 40);
		defaults.set("maxlength", 128);

		attrs.merge_defaults(&defaults);
		assert_eq!(attrs.get("size"), Some(&json!(20)));
		assert_eq!(attrs.get("maxlength"), Some(&json!(128)));
	}

	#[test]
	fn numeric_values_render_bare() {
		let mut attrs = Attributes::new();
		attrs.set("maxlength", 255);
		assert_eq!(attrs.render(), r#" maxlength="255""#);
	}
}
