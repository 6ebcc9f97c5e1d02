//! Building small XML documents.

use perseus_core::{Error, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;
use std::path::Path;

/// One element in the document tree.
#[derive(Debug, Clone)]
pub struct XmlElement {
	name: String,
	attributes: Vec<(String, String)>,
	text: Option<String>,
	children: Vec<XmlElement>,
}

impl XmlElement {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attributes: Vec::new(),
			text: None,
			children: Vec::new(),
		}
	}

	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push((name.into(), value.into()));
		self
	}

	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	pub fn child(mut self, child: XmlElement) -> Self {
		self.children.push(child);
		self
	}

	pub fn add_child(&mut self, child: XmlElement) {
		self.children.push(child);
	}

	fn write_into(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> Result<()> {
		let mut start = BytesStart::new(self.name.as_str());
		for (name, value) in &self.attributes {
			start.push_attribute((name.as_str(), value.as_str()));
		}

		if self.text.is_none() && self.children.is_empty() {
			writer
				.write_event(Event::Empty(start))
				.map_err(xml_error)?;
			return Ok(());
		}

		writer
			.write_event(Event::Start(start))
			.map_err(xml_error)?;
		if let Some(text) = &self.text {
			writer
				.write_event(Event::Text(BytesText::new(text)))
				.map_err(xml_error)?;
		}
		for child in &self.children {
			child.write_into(writer)?;
		}
		writer
			.write_event(Event::End(BytesEnd::new(self.name.as_str())))
			.map_err(xml_error)?;
		Ok(())
	}
}

/// An XML document with one root element, `data` unless configured.
///
/// # Examples
///
/// ```
/// use perseus_services::{XmlDocument, XmlElement};
///
/// let mut doc = XmlDocument::new();
/// doc.add(XmlElement::new("registrant").attr("id", "1").text("Ada"));
/// let xml = doc.to_string().unwrap();
/// assert!(xml.contains(r#"<registrant id="1">Ada</registrant>"#));
/// ```
#[derive(Debug, Clone)]
pub struct XmlDocument {
	root: XmlElement,
}

impl XmlDocument {
	pub fn new() -> Self {
		Self::with_root("data")
	}

	pub fn with_root(name: impl Into<String>) -> Self {
		Self {
			root: XmlElement::new(name),
		}
	}

	/// Append a child to the root element.
	pub fn add(&mut self, element: XmlElement) {
		self.root.add_child(element);
	}

	pub fn root_mut(&mut self) -> &mut XmlElement {
		&mut self.root
	}

	/// Serialize with an XML declaration and two-space indentation.
	pub fn to_string(&self) -> Result<String> {
		let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
		writer
			.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
			.map_err(xml_error)?;
		self.root.write_into(&mut writer)?;
		String::from_utf8(writer.into_inner().into_inner())
			.map_err(|e| Error::Io(format!("XML write failed: {e}")))
	}

	pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
		std::fs::write(path.as_ref(), self.to_string()?)
			.map_err(|e| Error::Io(format!("Unable to write {}: {e}", path.as_ref().display())))
	}
}

impl Default for XmlDocument {
	fn default() -> Self {
		Self::new()
	}
}

fn xml_error(e: std::io::Error) -> Error {
	Error::Io(format!("XML write failed: {e}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_is_a_self_closed_root() {
		let doc = XmlDocument::new();
		let xml = doc.to_string().unwrap();
		assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
		assert!(xml.contains("<data/>"));
	}

	#[test]
	fn nested_elements_and_attributes() {
		let mut doc = XmlDocument::with_root("registrants");
		doc.add(
			XmlElement::new("registrant")
				.attr("id", "1")
				.child(XmlElement::new("name").text("Ada"))
				.child(XmlElement::new("city").text("Golden")),
		);
		let xml = doc.to_string().unwrap();
		assert!(xml.contains(r#"<registrant id="1">"#));
		assert!(xml.contains("<name>Ada</name>"));
		assert!(xml.contains("<city>Golden</city>"));
		assert!(xml.contains("</registrants>"));
	}

	#[test]
	fn text_is_escaped() {
		let mut doc = XmlDocument::new();
		doc.add(XmlElement::new("note").text("a < b & c"));
		let xml = doc.to_string().unwrap();
		assert!(xml.contains("a &lt; b &amp; c"));
	}

	#[test]
	fn writes_to_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("export.xml");
		let mut doc = XmlDocument::new();
		doc.add(XmlElement::new("row").text("x"));
		doc.write_to_file(&path).unwrap();
		assert!(std::fs::read_to_string(&path).unwrap().contains("<row>x</row>"));
	}
}
