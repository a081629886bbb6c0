//! Scalable attribute discovery.

use geojson::FeatureCollection;
use prop_map_symbols_models::{AttributeList, IdentifyingFields};

/// Builds the [`AttributeList`] from the property keys of the first
/// feature, skipping identifying fields.
///
/// Returns an empty list when the collection has no features or the first
/// feature has no properties. All features are assumed to share the first
/// feature's attribute set.
#[must_use]
pub fn extract_attributes(
    collection: &FeatureCollection,
    identifying: &IdentifyingFields,
) -> AttributeList {
    let Some(properties) = collection
        .features
        .first()
        .and_then(|feature| feature.properties.as_ref())
    else {
        log::warn!("Cannot derive attributes from a collection without feature properties");
        return AttributeList::default();
    };

    properties
        .keys()
        .filter(|key| !identifying.matches(key))
        .cloned()
        .collect::<Vec<_>>()
        .into()
}
