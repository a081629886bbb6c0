//! A [`SymbolRenderer`] that keeps markers in memory and exports them as
//! styled `GeoJSON` for a web map frontend.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use prop_map_symbols::render::SymbolRenderer;
use prop_map_symbols_models::{MarkerDescriptor, MarkerId};
use serde_json::json;

/// In-memory marker store.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonRenderer {
    markers: Vec<MarkerDescriptor>,
}

impl GeoJsonRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub fn markers(&self) -> &[MarkerDescriptor] {
        &self.markers
    }

    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<&MarkerDescriptor> {
        self.markers.get(id.0)
    }

    /// Exports every marker as a point feature whose properties carry the
    /// radius, style, and popup.
    #[must_use]
    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.markers.iter().map(marker_feature).collect(),
            foreign_members: None,
        }
    }

    fn marker_mut(&mut self, id: MarkerId) -> Option<&mut MarkerDescriptor> {
        let marker = self.markers.get_mut(id.0);
        if marker.is_none() {
            log::warn!("Ignoring update for unknown marker {}", id.0);
        }
        marker
    }
}

impl SymbolRenderer for GeoJsonRenderer {
    fn add_marker(&mut self, marker: MarkerDescriptor) -> MarkerId {
        self.markers.push(marker);
        MarkerId(self.markers.len() - 1)
    }

    fn set_radius(&mut self, id: MarkerId, radius: f64) {
        if let Some(marker) = self.marker_mut(id) {
            marker.radius = radius;
        }
    }

    fn set_popup(&mut self, id: MarkerId, html: String) {
        if let Some(marker) = self.marker_mut(id) {
            marker.popup = html;
        }
    }
}

fn marker_feature(marker: &MarkerDescriptor) -> Feature {
    let (offset_x, offset_y) = marker.popup_offset();
    let properties: JsonObject = json!({
        "radius": marker.radius,
        "fillColor": marker.style.fill_color,
        "color": marker.style.color,
        "weight": marker.style.weight,
        "fillOpacity": marker.style.fill_opacity,
        "popup": marker.popup,
        "popupOffset": [offset_x, offset_y],
    })
    .as_object()
    .cloned()
    .unwrap_or_default();

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::Point(vec![
            marker.position.lng,
            marker.position.lat,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
