//! Reading attribute values out of feature properties.
//!
//! Values may arrive as JSON numbers or as numeric strings; anything else
//! (missing keys, `null`, free text) counts as absent.

use geojson::JsonObject;
use serde_json::Value;

/// Returns the numeric value of `name`, or `None` if it is missing or not
/// a finite number.
#[must_use]
pub fn attribute_value(properties: &JsonObject, name: &str) -> Option<f64> {
    let value = match properties.get(name)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Formats a property for display. Strings are shown without quotes and
/// `null` as an empty string.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn reads_numbers_and_numeric_strings() {
        let p = props(json!({ "2014": 12.5, "2015": " 40 ", "2016": 7 }));
        assert_eq!(attribute_value(&p, "2014"), Some(12.5));
        assert_eq!(attribute_value(&p, "2015"), Some(40.0));
        assert_eq!(attribute_value(&p, "2016"), Some(7.0));
    }

    #[test]
    fn treats_missing_and_non_numeric_as_absent() {
        let p = props(json!({ "2014": null, "2015": "n/a", "2016": true }));
        assert_eq!(attribute_value(&p, "2014"), None);
        assert_eq!(attribute_value(&p, "2015"), None);
        assert_eq!(attribute_value(&p, "2016"), None);
        assert_eq!(attribute_value(&p, "2017"), None);
    }

    #[test]
    fn displays_strings_without_quotes() {
        assert_eq!(display_value(&json!("Chile")), "Chile");
        assert_eq!(display_value(&json!(21.7)), "21.7");
        assert_eq!(display_value(&Value::Null), "");
    }
}
