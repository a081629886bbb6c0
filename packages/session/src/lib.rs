#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map session context.
//!
//! A [`MapSession`] owns everything one displayed map needs: view and tile
//! settings, the loaded dataset, the derived attribute list and scaler,
//! the rendered layer, and the sequence controls. It is built by a single
//! awaited [`MapSession::load`] in a fixed order (load, derive, render at
//! the first attribute, attach controls) and then mutated only through
//! [`MapSession::handle`].

pub mod config;
pub mod controls;
pub mod geojson_renderer;

use geojson::FeatureCollection;
use prop_map_loader::{LoadError, load_collection};
use prop_map_symbols::SymbolError;
use prop_map_symbols::attributes::extract_attributes;
use prop_map_symbols::layer::{PlainLayer, ProportionalLayer};
use prop_map_symbols::render::SymbolRenderer;
use prop_map_symbols::scale::ProportionalScaler;
use prop_map_symbols::sequence::SequenceController;
use prop_map_symbols_models::{
    AttributeList, DatasetDefinition, LayerKind, ScaleBaseline, StepDirection,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, MapConfig, MapView, TileLayer};
use crate::controls::{ControlEvent, Slider, UiControls};

/// Errors that can occur while building or driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// The dataset has no scalable attributes (e.g. no features).
    #[error("Dataset '{dataset}' has no scalable attributes")]
    NoAttributes {
        /// Dataset id.
        dataset: String,
    },

    /// A control event was sent to a map without a sequence.
    #[error("Dataset '{dataset}' is not sequenced")]
    NotSequenced {
        /// Dataset id.
        dataset: String,
    },
}

/// Sequence position reported after every control event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceState {
    pub index: usize,
    pub attribute: Option<String>,
    pub slider: Slider,
    /// Symbols changed by the last update.
    pub updated: usize,
}

/// A proportional layer with its scaler and controls.
#[derive(Debug, Clone)]
pub struct SequencedLayer {
    pub scaler: ProportionalScaler,
    pub layer: ProportionalLayer,
    pub controller: SequenceController,
    pub controls: UiControls,
}

/// What the session has drawn.
#[derive(Debug, Clone)]
pub enum SessionLayer {
    Proportional(SequencedLayer),
    Points(PlainLayer),
}

/// One displayed map and its state.
pub struct MapSession<R: SymbolRenderer> {
    view: MapView,
    tile_layer: TileLayer,
    dataset: DatasetDefinition,
    collection: FeatureCollection,
    layer: SessionLayer,
    renderer: R,
}

impl<R: SymbolRenderer> MapSession<R> {
    /// Resolves the configured dataset, loads it, and builds the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the dataset cannot be resolved or
    /// loaded, or if symbols cannot be derived from it.
    pub async fn load(config: &MapConfig, renderer: R) -> Result<Self, SessionError> {
        let dataset = config.dataset.resolve()?;
        log::info!("Loading dataset '{}' ({})", dataset.id, dataset.name);
        let collection = load_collection(&dataset.source).await?;
        Self::from_collection(config, dataset, collection, renderer)
    }

    /// Builds the session from an already loaded collection.
    ///
    /// Proportional datasets are drawn at the first attribute of their
    /// attribute list.
    ///
    /// # Errors
    ///
    /// * [`SessionError::NoAttributes`] if a proportional dataset has no
    ///   scalable attributes.
    /// * [`SessionError::Symbol`] if the scale baseline is invalid.
    pub fn from_collection(
        config: &MapConfig,
        dataset: DatasetDefinition,
        collection: FeatureCollection,
        mut renderer: R,
    ) -> Result<Self, SessionError> {
        let layer = match dataset.kind {
            LayerKind::Points => SessionLayer::Points(PlainLayer::create(
                &collection,
                &dataset.style,
                &mut renderer,
            )),
            LayerKind::Proportional => SessionLayer::Proportional(Self::build_sequenced(
                &dataset,
                &collection,
                &mut renderer,
            )?),
        };

        Ok(Self {
            view: config.view.clone(),
            tile_layer: config.tile_layer.clone(),
            dataset,
            collection,
            layer,
            renderer,
        })
    }

    fn build_sequenced(
        dataset: &DatasetDefinition,
        collection: &FeatureCollection,
        renderer: &mut R,
    ) -> Result<SequencedLayer, SessionError> {
        let no_attributes = || SessionError::NoAttributes {
            dataset: dataset.id.clone(),
        };

        let attributes = extract_attributes(collection, &dataset.identifying_fields);
        log::info!("Found {} attributes: {:?}", attributes.len(), attributes.as_slice());

        let controller = SequenceController::new(attributes).ok_or_else(no_attributes)?;

        let scaler = ProportionalScaler::from_collection(
            collection,
            controller.attributes(),
            dataset.min_radius(),
        )?;
        log::info!("Scale baseline: {}", scaler.baseline().value());

        let first = controller.current_attribute().ok_or_else(no_attributes)?;

        let layer = ProportionalLayer::create(
            collection,
            first,
            &scaler,
            &dataset.style,
            &dataset.popup,
            renderer,
        );
        let controls = UiControls::new(controller.len());

        Ok(SequencedLayer {
            scaler,
            layer,
            controller,
            controls,
        })
    }

    /// Applies a control event and re-scales the layer.
    ///
    /// Step buttons advance or retreat the sequence and move the slider to
    /// match; slider input sets the index to the clamped slider value.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSequenced`] for a points-only dataset.
    pub fn handle(&mut self, event: ControlEvent) -> Result<SequenceState, SessionError> {
        let SessionLayer::Proportional(seq) = &mut self.layer else {
            return Err(SessionError::NotSequenced {
                dataset: self.dataset.id.clone(),
            });
        };

        match event {
            ControlEvent::Step { direction } => {
                let index = match direction {
                    StepDirection::Forward => seq.controller.advance(),
                    StepDirection::Reverse => seq.controller.retreat(),
                };
                seq.controls.sync_to(index);
            }
            ControlEvent::SliderInput { value } => {
                let index = seq.controls.slider_input(value);
                seq.controller.set_index(index);
            }
        }

        let updated = seq.controller.on_index_changed(
            &seq.layer,
            &seq.scaler,
            &self.dataset.popup,
            &mut self.renderer,
        );

        log::debug!(
            "Sequence moved to {} ({:?})",
            seq.controller.index(),
            seq.controller.current_attribute()
        );

        Ok(sequence_state(seq, updated))
    }

    /// Current sequence position, or `None` for a points-only dataset.
    #[must_use]
    pub fn sequence_state(&self) -> Option<SequenceState> {
        match &self.layer {
            SessionLayer::Proportional(seq) => Some(sequence_state(seq, 0)),
            SessionLayer::Points(_) => None,
        }
    }

    #[must_use]
    pub fn attributes(&self) -> Option<&AttributeList> {
        match &self.layer {
            SessionLayer::Proportional(seq) => Some(seq.controller.attributes()),
            SessionLayer::Points(_) => None,
        }
    }

    #[must_use]
    pub fn baseline(&self) -> Option<ScaleBaseline> {
        match &self.layer {
            SessionLayer::Proportional(seq) => Some(seq.scaler.baseline()),
            SessionLayer::Points(_) => None,
        }
    }

    #[must_use]
    pub const fn layer(&self) -> &SessionLayer {
        &self.layer
    }

    #[must_use]
    pub const fn view(&self) -> &MapView {
        &self.view
    }

    #[must_use]
    pub const fn tile_layer(&self) -> &TileLayer {
        &self.tile_layer
    }

    #[must_use]
    pub const fn dataset(&self) -> &DatasetDefinition {
        &self.dataset
    }

    #[must_use]
    pub const fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }
}

fn sequence_state(seq: &SequencedLayer, updated: usize) -> SequenceState {
    SequenceState {
        index: seq.controller.index(),
        attribute: seq.controller.current_attribute().map(str::to_string),
        slider: *seq.controls.slider(),
        updated,
    }
}
