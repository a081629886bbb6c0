//! Map configuration, read from a TOML file.
//!
//! ```toml
//! [view]
//! center = { lat = 0.0, lng = 0.0 }
//! zoom = 2
//!
//! [tile_layer]
//! url_template = "https://tile.openstreetmap.org/{z}/{x}/{y}.png"
//!
//! [dataset]
//! type = "registry"
//! id = "renewable_generation"
//! ```

use std::path::Path;

use prop_map_loader::registry::find_dataset;
use prop_map_symbols_models::{DatasetDefinition, LatLng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading a map configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Dataset(#[from] prop_map_loader::LoadError),
}

/// Top-level map configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default)]
    pub view: MapView,
    #[serde(default)]
    pub tile_layer: TileLayer,
    pub dataset: DatasetSelection,
}

/// Initial map center and zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LatLng::new(0.0, 0.0),
            zoom: 2,
        }
    }
}

/// Basemap tiles. Passed through to the frontend, never fetched here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayer {
    /// `{z}/{x}/{y}` URL template.
    pub url_template: String,
    /// Attribution HTML.
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
                .to_string(),
        }
    }
}

/// Which dataset to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatasetSelection {
    /// A dataset from the embedded registry.
    Registry {
        /// Registered dataset id.
        id: String,
    },
    /// A dataset defined in the config file itself.
    Inline(DatasetDefinition),
}

impl DatasetSelection {
    /// Resolves the selection to a full definition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Dataset`] if a registry id is unknown.
    pub fn resolve(&self) -> Result<DatasetDefinition, ConfigError> {
        match self {
            Self::Registry { id } => Ok(find_dataset(id)?),
            Self::Inline(definition) => Ok(definition.clone()),
        }
    }
}

impl MapConfig {
    /// Builds a config for a registered dataset with default view and tiles.
    #[must_use]
    pub fn for_dataset(id: &str) -> Self {
        Self {
            view: MapView::default(),
            tile_layer: TileLayer::default(),
            dataset: DatasetSelection::Registry { id: id.to_string() },
        }
    }

    /// Parses a TOML config string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the TOML is malformed.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prop_map_symbols_models::{DataSource, LayerKind};

    #[test]
    fn registry_selection_with_defaults() {
        let config = MapConfig::from_toml(
            r#"
            [dataset]
            type = "registry"
            id = "renewable_generation"
            "#,
        )
        .unwrap();

        assert_eq!(config.view, MapView::default());
        assert!(config.tile_layer.url_template.contains("openstreetmap"));
        let dataset = config.dataset.resolve().unwrap();
        assert_eq!(dataset.id, "renewable_generation");
    }

    #[test]
    fn inline_dataset() {
        let config = MapConfig::from_toml(
            r#"
            [view]
            center = { lat = 39.75, lng = -104.99 }
            zoom = 13

            [dataset]
            type = "inline"
            id = "local"
            name = "Local sample"
            kind = "points"

            [dataset.source]
            type = "url"
            url = "https://example.com/points.geojson"
            "#,
        )
        .unwrap();

        assert_eq!(config.view.zoom, 13);
        let dataset = config.dataset.resolve().unwrap();
        assert_eq!(dataset.kind, LayerKind::Points);
        assert_eq!(
            dataset.source,
            DataSource::Url {
                url: "https://example.com/points.geojson".to_string()
            }
        );
    }

    #[test]
    fn unknown_registry_id_fails_to_resolve() {
        let config = MapConfig::for_dataset("missing");
        assert!(matches!(
            config.dataset.resolve(),
            Err(ConfigError::Dataset(_))
        ));
    }
}
