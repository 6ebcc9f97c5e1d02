//! Building the concrete input element for a form item.

use crate::item::{FormItem, ItemType};
use perseus_theme::{Attributes, HtmlElement, RenderNode, Renderable};

/// Build the renderable input element for an item.
///
/// The element carries the item's name, type, and current value;
/// selects and radio groups nest their options as sub-elements. Item
/// attributes merge in as defaults without overriding what the element
/// itself sets.
pub fn build_element(item: &FormItem) -> Box<dyn Renderable> {
	match item.item_type {
		ItemType::Text | ItemType::Email | ItemType::Hidden | ItemType::Submit => {
			Box::new(build_input(item))
		}
		ItemType::Textarea => Box::new(build_textarea(item)),
		ItemType::Select => Box::new(build_select(item)),
		ItemType::Radios => Box::new(build_radios(item)),
		ItemType::Markup => {
			let mut node = RenderNode::new("markup");
			node.content = item.default_value.clone().unwrap_or_default();
			Box::new(node)
		}
	}
}

fn base_attributes(item: &FormItem) -> Attributes {
	let mut attrs = Attributes::new();
	attrs.set("name", item.name.as_str());
	if let Some(placeholder) = &item.placeholder {
		attrs.set("placeholder", placeholder.as_str());
	}
	attrs.merge_defaults(&item.attributes);
	attrs
}

fn build_input(item: &FormItem) -> HtmlElement {
	let mut attrs = Attributes::new();
	attrs.set("type", item.item_type.as_str());
	attrs.merge_defaults(&base_attributes(item));
	if let Some(value) = item.current_value() {
		attrs.set("value", value);
	}
	HtmlElement::with_attributes("input", attrs)
}

fn build_textarea(item: &FormItem) -> HtmlElement {
	let mut el = HtmlElement::with_attributes("textarea", base_attributes(item));
	if let Some(value) = item.current_value() {
		el.set_content(value);
	}
	el
}

fn build_select(item: &FormItem) -> HtmlElement {
	let mut select = HtmlElement::with_attributes("select", base_attributes(item));
	for (idx, (value, label)) in item.options.iter().enumerate() {
		let mut option = HtmlElement::new("option");
		option.attributes.set("value", value.as_str());
		if item.current_value() == Some(value.as_str()) {
			option.attributes.set("selected", "selected");
		}
		option.set_content(label.as_str());
		option.set_weight(idx as f64);
		select.add_child(format!("option-{idx}"), Box::new(option));
	}
	select
}

fn build_radios(item: &FormItem) -> HtmlElement {
	let mut group = HtmlElement::new("div");
	group.attributes.add_class("radios");
	group.attributes.add_class(&item.name);

	for (idx, (value, label)) in item.options.iter().enumerate() {
		let option_id = format!("{}-{}", item.name, value);

		let mut radio = HtmlElement::new("input");
		radio.attributes.set("type", "radio");
		radio.attributes.set("name", item.name.as_str());
		radio.attributes.set("value", value.as_str());
		radio.attributes.set("id", option_id.as_str());
		if item.current_value() == Some(value.as_str()) {
			radio.attributes.set("checked", "checked");
		}
		radio.set_weight(0.0);

		let mut text = HtmlElement::new("label");
		text.attributes.set("for", option_id.as_str());
		text.set_content(label.as_str());
		text.set_weight(1.0);

		let mut wrapper = HtmlElement::new("div");
		wrapper.attributes.add_class("form-radio");
		wrapper.set_weight(idx as f64);
		wrapper.add_child("radio", Box::new(radio));
		wrapper.add_child("label", Box::new(text));

		group.add_child(format!("option-{idx}"), Box::new(wrapper));
	}
	group
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::item::FormItem;
	use perseus_theme::Theme;

	const ELEMENT_TEMPLATE: &str = "<{{ element }}{{ html_attributes(attrs=attributes) }}{% if self_closing %} />{% else %}>{{ content }}</{{ element }}>{% endif %}";

	fn theme() -> Theme {
		let mut theme = Theme::empty();
		theme.add_raw_template("element", ELEMENT_TEMPLATE).unwrap();
		theme.add_raw_template("markup", "{{ content }}").unwrap();
		theme
	}

	#[test]
	fn text_input_renders_name_type_and_value() {
		let mut item = FormItem::text("city").with_attribute("size", 39);
		item.posted_value = Some("Golden".to_string());

		let mut el = build_element(&item);
		assert_eq!(
			theme().render(el.as_mut()).unwrap(),
			r#"<input type="text" name="city" size="39" value="Golden" />"#
		);
	}

	#[test]
	fn hidden_input_uses_default_value() {
		let item = FormItem::hidden("check_submit", "1");
		let mut el = build_element(&item);
		assert_eq!(
			theme().render(el.as_mut()).unwrap(),
			r#"<input type="hidden" name="check_submit" value="1" />"#
		);
	}

	#[test]
	fn textarea_renders_value_as_content() {
		let mut item = FormItem::textarea("dietary_needs");
		item.posted_value = Some("none".to_string());

		let mut el = build_element(&item);
		assert_eq!(
			theme().render(el.as_mut()).unwrap(),
			r#"<textarea name="dietary_needs">none</textarea>"#
		);
	}

	#[test]
	fn select_marks_the_current_option_selected() {
		let mut item = FormItem::select(
			"state",
			vec![
				("CO".to_string(), "Colorado".to_string()),
				("WY".to_string(), "Wyoming".to_string()),
			],
		);
		item.posted_value = Some("WY".to_string());

		let mut el = build_element(&item);
		let out = theme().render(el.as_mut()).unwrap();
		assert!(out.starts_with(r#"<select name="state">"#));
		assert!(out.contains(r#"<option value="CO">Colorado</option>"#));
		assert!(out.contains(r#"<option value="WY" selected="selected">Wyoming</option>"#));
	}

	#[test]
	fn radios_render_one_wrapper_per_option() {
		let mut item = FormItem::radios(
			"meal",
			vec![
				("standard".to_string(), "Standard".to_string()),
				("vegetarian".to_string(), "Vegetarian".to_string()),
			],
		);
		item.posted_value = Some("vegetarian".to_string());

		let mut el = build_element(&item);
		let out = theme().render(el.as_mut()).unwrap();
		assert!(out.contains(r#"type="radio""#));
		assert!(out.contains(r#"value="vegetarian" id="meal-vegetarian" checked="checked""#));
		assert!(out.contains(r#"<label for="meal-standard">Standard</label>"#));
	}

	#[test]
	fn markup_item_renders_raw_html() {
		let item = FormItem::markup("provisions", "<strong>Provisions:</strong> lunch");
		let mut el = build_element(&item);
		assert_eq!(
			theme().render(el.as_mut()).unwrap(),
			"<strong>Provisions:</strong> lunch"
		);
	}

	#[test]
	fn item_attributes_do_not_override_element_basics() {
		let item = FormItem::text("name").with_attribute("type", "evil");
		let mut el = build_element(&item);
		let out = theme().render(el.as_mut()).unwrap();
		assert!(out.contains(r#"type="text""#));
	}
}
