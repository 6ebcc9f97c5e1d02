//! The Tera-backed theme engine and recursive tree renderer.

use crate::attributes::render_value_map;
use crate::node::Renderable;
use perseus_core::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

/// A theme: template search path plus the Tera environment built on it.
///
/// Directories earlier in the search path shadow later ones, so the site
/// override theme is listed before the default theme. Template names are
/// paths relative to a directory's root without the `.html` suffix, e.g.
/// `form/form`.
pub struct Theme {
	tera: Tera,
}

impl Theme {
	/// Build a theme from template directories, most specific first.
	///
	/// Missing directories are skipped; a directory that exists but
	/// cannot be read is an error.
	pub fn new(template_dirs: &[PathBuf]) -> Result<Self> {
		let mut tera = Tera::default();
		// Autoescaping is off; templates receive pre-escaped markup and
		// attribute rendering escapes values itself.
		tera.autoescape_on(vec![]);
		register_functions(&mut tera);

		// Least specific first so later directories override.
		for dir in template_dirs.iter().rev() {
			if !dir.exists() {
				tracing::debug!(dir = %dir.display(), "skipping absent theme directory");
				continue;
			}
			let mut files = Vec::new();
			collect_templates(dir, dir, &mut files)?;
			for (path, name) in files {
				tera.add_template_file(&path, Some(&name)).map_err(|e| {
					Error::Template(format!("Failed to load template {}: {e}", path.display()))
				})?;
			}
		}

		Ok(Self { tera })
	}

	/// A theme with no templates on disk. Combine with
	/// [`Theme::add_raw_template`] for tests and inline themes.
	pub fn empty() -> Self {
		let mut tera = Tera::default();
		tera.autoescape_on(vec![]);
		register_functions(&mut tera);
		Self { tera }
	}

	/// Register a template body under a name such as `form/form`.
	pub fn add_raw_template(&mut self, name: &str, body: &str) -> Result<()> {
		self.tera
			.add_raw_template(&format!("{name}.html"), body)
			.map_err(|e| Error::Template(format!("Failed to register template {name}: {e}")))
	}

	pub fn has_template(&self, name: &str) -> bool {
		let file = format!("{name}.html");
		self.tera.get_template_names().any(|n| n == file)
	}

	/// Render a named template with the given build data.
	pub fn theme(&self, template: &str, vars: &Map<String, Value>) -> Result<String> {
		let context = Context::from_serialize(Value::Object(vars.clone()))
			.map_err(|e| Error::Template(format!("Invalid template data: {e}")))?;
		self.tera
			.render(&format!("{template}.html"), &context)
			.map_err(|e| Error::Template(format!("Failed to render {template}: {e}")))
	}

	/// Render a renderable tree to markup.
	///
	/// Calls `prepare()` on the root, then recursively renders children
	/// post-order in ascending weight order, folding each child's markup
	/// into the parent's `content` and `item.<key>` build data before
	/// the parent's own template is applied. The tree is mutated; render
	/// again only after re-preparing.
	pub fn render(&self, item: &mut dyn Renderable) -> Result<String> {
		item.prepare()?;
		self.render_tree(item)?;
		Ok(item.node().rendered.clone().unwrap_or_default())
	}

	fn render_tree(&self, item: &mut dyn Renderable) -> Result<()> {
		// Detach the children so the parent's data can be written while
		// they are rendered.
		let order = item.node().render_order();
		let mut children = std::mem::take(item.node_mut().children_mut());

		let mut combined = item.node().content.clone();
		let mut items = Map::new();
		for idx in order {
			let (key, child) = &mut children[idx];
			child.prepare()?;
			self.render_tree(child.as_mut())?;
			let markup = child.node().rendered.clone().unwrap_or_default();
			items.insert(key.clone(), Value::String(markup.clone()));
			combined.push_str(&markup);
		}

		let node = item.node_mut();
		*node.children_mut() = children;
		node.add_build_data("item", Value::Object(items), false);
		node.add_build_data("content", Value::String(combined), false);

		let template = self.resolve_template(node.templates())?;
		let markup = self.theme(&template, node.build_data())?;
		item.node_mut().rendered = Some(markup);
		Ok(())
	}

	/// Most specific registered template that exists in the theme.
	fn resolve_template(&self, candidates: &[String]) -> Result<String> {
		for candidate in candidates.iter().rev() {
			if self.has_template(candidate) {
				return Ok(candidate.clone());
			}
		}
		Err(Error::Template(format!(
			"No template found among [{}].",
			candidates.join(", ")
		)))
	}
}

fn register_functions(tera: &mut Tera) {
	tera.register_function(
		"html_attributes",
		|args: &HashMap<String, Value>| -> tera::Result<Value> {
			let rendered = match args.get("attrs") {
				Some(Value::Object(map)) => {
					render_value_map(map.iter().map(|(k, v)| (k.as_str(), v)))
				}
				_ => String::new(),
			};
			Ok(Value::String(rendered))
		},
	);
}

fn collect_templates(
	root: &Path,
	dir: &Path,
	out: &mut Vec<(PathBuf, String)>,
) -> Result<()> {
	for entry in std::fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();
		if path.is_dir() {
			collect_templates(root, &path, out)?;
		} else if path.extension().is_some_and(|ext| ext == "html") {
			let rel = path
				.strip_prefix(root)
				.expect("template path is under its root");
			// Template names use forward slashes on every platform.
			let name = rel
				.components()
				.map(|c| c.as_os_str().to_string_lossy())
				.collect::<Vec<_>>()
				.join("/");
			out.push((path.clone(), name));
		}
	}
	Ok(())
}
