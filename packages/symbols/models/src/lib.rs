#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Proportional symbol, marker, and dataset definition types.
//!
//! These types describe what a map shows (datasets, attributes, markers)
//! without any of the logic that derives them. Dataset definitions are
//! deserialized from TOML; marker descriptors are handed to whatever
//! renderer draws the map.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Radius used for markers that are not proportionally scaled.
pub const DEFAULT_POINT_RADIUS: f64 = 8.0;

/// Smallest radius handed to the Flannery formula.
pub const DEFAULT_MIN_RADIUS: f64 = 5.0;

/// Ordered list of scalable attribute names (e.g. `["2014", "2015"]`).
///
/// Derived once from the first feature of a collection. The order matches
/// the property declaration order of that feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeList(Vec<String>);

impl AttributeList {
    #[must_use]
    pub const fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for AttributeList {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

/// The minimum value across every feature and attribute of a dataset.
///
/// Always strictly positive and finite, so it can be used as the divisor
/// of the scaling formula.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ScaleBaseline(f64);

impl ScaleBaseline {
    /// Wraps a baseline value, returning `None` unless it is positive and
    /// finite.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Property keys that identify a feature rather than measure it.
///
/// A key is identifying when it contains any of these names as a
/// case-insensitive substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentifyingFields(Vec<String>);

impl IdentifyingFields {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if `key` should be excluded from the attribute list.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.0
            .iter()
            .any(|name| key.contains(name.to_lowercase().as_str()))
    }
}

impl Default for IdentifyingFields {
    fn default() -> Self {
        Self::new(["country", "lat", "lon"])
    }
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Circle marker styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerStyle {
    /// Fill color as a CSS color string.
    pub fill_color: String,
    /// Stroke color as a CSS color string.
    pub color: String,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Fill opacity from 0 to 1.
    pub fill_opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            fill_color: "#dd0".to_string(),
            color: "#000".to_string(),
            weight: 1.0,
            fill_opacity: 0.5,
        }
    }
}

/// Everything a renderer needs to draw one interactive circle marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub position: LatLng,
    pub radius: f64,
    pub style: MarkerStyle,
    /// Popup HTML.
    pub popup: String,
}

impl MarkerDescriptor {
    /// Vertical popup offset so the popup opens above the circle edge.
    #[must_use]
    pub fn popup_offset(&self) -> (f64, f64) {
        (0.0, -self.radius)
    }
}

/// Handle to a marker owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub usize);

/// How popup text is built for a proportionally scaled feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupTemplate {
    /// Property holding the feature's display name.
    pub identifier_field: String,
    /// Label shown before the display name.
    pub identifier_label: String,
    /// Label shown before the selected attribute (e.g. "Population").
    pub value_label: String,
    /// Suffix appended to the value (e.g. "%").
    pub unit: String,
}

impl Default for PopupTemplate {
    fn default() -> Self {
        Self {
            identifier_field: "country".to_string(),
            identifier_label: "Country".to_string(),
            value_label: "Value".to_string(),
            unit: String::new(),
        }
    }
}

/// Where a dataset's `GeoJSON` comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataSource {
    /// Local file path.
    File {
        /// Path to a `.geojson` file.
        path: String,
    },
    /// Remote URL returning a `GeoJSON` `FeatureCollection`.
    Url {
        /// Full URL.
        url: String,
    },
}

/// How features of a dataset are drawn.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayerKind {
    /// Circle radius scales with the selected attribute.
    #[default]
    Proportional,
    /// Fixed-radius markers with a popup listing every property.
    Points,
}

/// A dataset definition, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDefinition {
    /// Unique dataset identifier (e.g. `"renewable_generation"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Where to load the `FeatureCollection` from.
    pub source: DataSource,
    #[serde(default)]
    pub kind: LayerKind,
    #[serde(default)]
    pub identifying_fields: IdentifyingFields,
    #[serde(default)]
    pub popup: PopupTemplate,
    #[serde(default)]
    pub style: MarkerStyle,
    /// Radius of a feature whose value equals the baseline, before the
    /// Flannery coefficient.
    pub min_radius: Option<f64>,
}

impl DatasetDefinition {
    #[must_use]
    pub fn min_radius(&self) -> f64 {
        self.min_radius.unwrap_or(DEFAULT_MIN_RADIUS)
    }
}

/// Direction of a step-button press.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StepDirection {
    Forward,
    Reverse,
}
