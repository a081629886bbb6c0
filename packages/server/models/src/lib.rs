#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the proportional symbol map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the session types to allow independent evolution of the API
//! contract.

use prop_map_session::SequenceState;
use prop_map_session::config::{MapView, TileLayer};
use prop_map_symbols_models::{LatLng, LayerKind};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    pub healthy: bool,
    pub version: String,
}

/// Error body returned with non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error: String,
}

/// Everything a frontend needs to set up the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMapState {
    pub dataset_id: String,
    pub dataset_name: String,
    pub kind: LayerKind,
    pub view: ApiMapView,
    pub tile_layer: ApiTileLayer,
    /// Sequenced attributes, empty for a points-only dataset.
    pub attributes: Vec<String>,
    /// Minimum value the radii are scaled from.
    pub baseline: Option<f64>,
    pub sequence: Option<ApiSequenceState>,
}

/// Initial map center and zoom.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl From<&MapView> for ApiMapView {
    fn from(view: &MapView) -> Self {
        Self {
            center: view.center,
            zoom: view.zoom,
        }
    }
}

/// Basemap tile settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl From<&TileLayer> for ApiTileLayer {
    fn from(tiles: &TileLayer) -> Self {
        Self {
            url_template: tiles.url_template.clone(),
            attribution: tiles.attribution.clone(),
        }
    }
}

/// Sequence position and slider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSequenceState {
    pub index: usize,
    pub attribute: Option<String>,
    pub slider_min: i64,
    pub slider_max: i64,
    pub slider_step: i64,
    pub slider_value: i64,
    /// Symbols changed by the request that produced this state.
    pub updated: usize,
}

impl From<SequenceState> for ApiSequenceState {
    fn from(state: SequenceState) -> Self {
        Self {
            index: state.index,
            attribute: state.attribute,
            slider_min: state.slider.min,
            slider_max: state.slider.max,
            slider_step: state.slider.step,
            slider_value: state.slider.value(),
            updated: state.updated,
        }
    }
}

/// Body of `POST /api/sequence/index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetIndexRequest {
    /// Raw slider value; clamped to the slider range.
    pub index: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prop_map_session::controls::UiControls;

    #[test]
    fn sequence_state_flattens_slider() {
        let mut controls = UiControls::new(10);
        controls.sync_to(3);
        let api = ApiSequenceState::from(SequenceState {
            index: 3,
            attribute: Some("2017".to_string()),
            slider: *controls.slider(),
            updated: 4,
        });

        assert_eq!(api.slider_max, 9);
        assert_eq!(api.slider_value, 3);
        assert_eq!(api.attribute.as_deref(), Some("2017"));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(SetIndexRequest { index: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({ "index": 2 }));

        let state = ApiMapView::from(&MapView::default());
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["center"]["lat"], 0.0);
        assert_eq!(json["zoom"], 2);
    }
}
