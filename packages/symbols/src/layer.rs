//! Marker layers built from a `FeatureCollection`.
//!
//! Only point geometries become markers. Other geometry types and
//! features without geometry are skipped.

use geojson::{Feature, FeatureCollection, JsonObject};
use prop_map_symbols_models::{
    DEFAULT_POINT_RADIUS, LatLng, MarkerDescriptor, MarkerId, MarkerStyle, PopupTemplate,
};

use crate::popup::{attribute_popup, property_listing_popup};
use crate::render::SymbolRenderer;
use crate::scale::ProportionalScaler;
use crate::value::attribute_value;

/// A marker drawn for a feature, plus the properties it was drawn from.
#[derive(Debug, Clone)]
pub struct RenderedSymbol {
    pub marker: MarkerId,
    pub properties: JsonObject,
}

/// Circle markers whose radius follows the selected attribute.
#[derive(Debug, Clone, Default)]
pub struct ProportionalLayer {
    symbols: Vec<RenderedSymbol>,
}

impl ProportionalLayer {
    /// Draws one marker per point feature, sized by its `attribute` value.
    ///
    /// Features without a numeric value for `attribute` get a zero-radius
    /// marker, so a later attribute that has a value can size them.
    pub fn create(
        collection: &FeatureCollection,
        attribute: &str,
        scaler: &ProportionalScaler,
        style: &MarkerStyle,
        template: &PopupTemplate,
        renderer: &mut impl SymbolRenderer,
    ) -> Self {
        let mut symbols = Vec::with_capacity(collection.features.len());

        for feature in &collection.features {
            let Some(position) = point_position(feature) else {
                log::debug!("Skipping non-point feature {:?}", feature.id);
                continue;
            };
            let Some(properties) = feature.properties.as_ref() else {
                continue;
            };
            let radius = attribute_value(properties, attribute).map_or_else(
                || {
                    log::warn!(
                        "Feature {} has no value for {attribute}, drawing it hidden",
                        feature_label(feature, template)
                    );
                    0.0
                },
                |value| scaler.radius(value),
            );

            let marker = renderer.add_marker(MarkerDescriptor {
                position,
                radius,
                style: style.clone(),
                popup: attribute_popup(template, properties, attribute),
            });

            symbols.push(RenderedSymbol {
                marker,
                properties: properties.clone(),
            });
        }

        log::info!(
            "Drew {} proportional symbols for {attribute} ({} features)",
            symbols.len(),
            collection.features.len()
        );

        Self { symbols }
    }

    #[must_use]
    pub fn symbols(&self) -> &[RenderedSymbol] {
        &self.symbols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Fixed-radius markers with a popup listing every property.
#[derive(Debug, Clone, Default)]
pub struct PlainLayer {
    markers: Vec<MarkerId>,
}

impl PlainLayer {
    pub fn create(
        collection: &FeatureCollection,
        style: &MarkerStyle,
        renderer: &mut impl SymbolRenderer,
    ) -> Self {
        let markers: Vec<MarkerId> = collection
            .features
            .iter()
            .filter_map(|feature| {
                let position = point_position(feature)?;
                let popup = feature
                    .properties
                    .as_ref()
                    .map(property_listing_popup)
                    .unwrap_or_default();
                Some(renderer.add_marker(MarkerDescriptor {
                    position,
                    radius: DEFAULT_POINT_RADIUS,
                    style: style.clone(),
                    popup,
                }))
            })
            .collect();

        log::info!("Drew {} point markers", markers.len());

        Self { markers }
    }

    #[must_use]
    pub fn markers(&self) -> &[MarkerId] {
        &self.markers
    }
}

/// Reads a `GeoJSON` point's `[lng, lat]` coordinates.
#[must_use]
pub fn point_position(feature: &Feature) -> Option<LatLng> {
    match &feature.geometry.as_ref()?.value {
        geojson::Value::Point(coords) if coords.len() >= 2 => {
            Some(LatLng::new(coords[1], coords[0]))
        }
        _ => None,
    }
}

fn feature_label(feature: &Feature, template: &PopupTemplate) -> String {
    feature
        .properties
        .as_ref()
        .and_then(|props| props.get(&template.identifier_field))
        .map_or_else(|| "<unnamed>".to_string(), crate::value::display_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prop_map_symbols_models::ScaleBaseline;
    use serde_json::json;

    use crate::render::test_support::VecRenderer;

    fn dataset() -> FeatureCollection {
        serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-70.6, -33.4] },
                    "properties": { "country": "Chile", "2014": 10, "2015": 20 }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [36.8, -1.3] },
                    "properties": { "country": "Kenya", "2014": null, "2015": 15 }
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[0.0, 0.0], [1.0, 1.0]]
                    },
                    "properties": { "country": "Line", "2014": 30, "2015": 30 }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn proportional_layer_draws_every_point() {
        let scaler = ProportionalScaler::from(ScaleBaseline::new(5.0).unwrap());
        let mut renderer = VecRenderer::default();

        let layer = ProportionalLayer::create(
            &dataset(),
            "2014",
            &scaler,
            &MarkerStyle::default(),
            &PopupTemplate::default(),
            &mut renderer,
        );

        assert_eq!(layer.len(), 2);
        assert_eq!(renderer.markers.len(), 2);
        let marker = &renderer.markers[0];
        assert_eq!(marker.position, LatLng::new(-33.4, -70.6));
        assert!((marker.radius - scaler.radius(10.0)).abs() < f64::EPSILON);
        assert!(marker.popup.contains("Chile"));
        assert!(marker.popup.contains("in 2014:</b> 10"));

        let hidden = &renderer.markers[1];
        assert!(hidden.radius.abs() < f64::EPSILON);
        assert!(hidden.popup.contains("Kenya"));
    }

    #[test]
    fn plain_layer_draws_every_point() {
        let mut renderer = VecRenderer::default();
        let layer = PlainLayer::create(&dataset(), &MarkerStyle::default(), &mut renderer);

        assert_eq!(layer.markers().len(), 2);
        assert!(
            renderer
                .markers
                .iter()
                .all(|m| (m.radius - DEFAULT_POINT_RADIUS).abs() < f64::EPSILON)
        );
        assert!(renderer.markers[1].popup.starts_with("<p>country: Kenya</p>"));
    }
}
