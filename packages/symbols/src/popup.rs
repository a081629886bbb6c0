//! Popup HTML for rendered markers.

use std::fmt::Write as _;

use geojson::JsonObject;
use prop_map_symbols_models::PopupTemplate;

use crate::value::display_value;

/// Builds the popup for a proportionally scaled feature: its display name
/// and its value for the selected `attribute`.
#[must_use]
pub fn attribute_popup(template: &PopupTemplate, properties: &JsonObject, attribute: &str) -> String {
    let name = properties
        .get(&template.identifier_field)
        .map(display_value)
        .unwrap_or_default();
    let value = properties
        .get(attribute)
        .map(display_value)
        .unwrap_or_default();
    let unit = if value.is_empty() { "" } else { template.unit.as_str() };

    format!(
        "<p><b>{}:</b> {}</p><p><b>{} in {}:</b> {}{}</p>",
        escape_html(&template.identifier_label),
        escape_html(&name),
        escape_html(&template.value_label),
        escape_html(attribute),
        escape_html(&value),
        escape_html(unit),
    )
}

/// Builds a popup listing every property as `key: value`, in declaration
/// order.
#[must_use]
pub fn property_listing_popup(properties: &JsonObject) -> String {
    properties
        .iter()
        .fold(String::new(), |mut html, (key, value)| {
            let _ = write!(
                html,
                "<p>{}: {}</p>",
                escape_html(key),
                escape_html(&display_value(value))
            );
            html
        })
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
