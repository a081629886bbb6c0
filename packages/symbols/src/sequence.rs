//! Attribute sequencing.
//!
//! [`SequenceController`] owns the index of the selected attribute and
//! re-scales every rendered symbol when it changes.

use prop_map_symbols_models::{AttributeList, PopupTemplate};

use crate::layer::ProportionalLayer;
use crate::popup::attribute_popup;
use crate::render::SymbolRenderer;
use crate::scale::ProportionalScaler;
use crate::value::attribute_value;

/// Index into an [`AttributeList`] with wraparound stepping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceController {
    attributes: AttributeList,
    index: usize,
}

impl SequenceController {
    /// Starts at index 0. Returns `None` for an empty list, which has
    /// nothing to sequence.
    #[must_use]
    pub fn new(attributes: AttributeList) -> Option<Self> {
        if attributes.is_empty() {
            return None;
        }
        Some(Self {
            attributes,
            index: 0,
        })
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[must_use]
    pub const fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    /// The selected attribute, or `None` if the index was set out of range.
    #[must_use]
    pub fn current_attribute(&self) -> Option<&str> {
        self.attributes.get(self.index)
    }

    /// Moves to the next attribute, wrapping from the last to the first.
    pub fn advance(&mut self) -> usize {
        let len = self.len();
        self.index = (self.index % len + 1) % len;
        self.index
    }

    /// Moves to the previous attribute, wrapping from the first to the last.
    pub fn retreat(&mut self) -> usize {
        let len = self.len();
        self.index = (self.index % len + len - 1) % len;
        self.index
    }

    /// Sets the index directly. The value is not clamped; range is the
    /// slider's job.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Re-scales and re-labels every symbol for the selected attribute.
    ///
    /// Symbols whose feature has no numeric value for the attribute keep
    /// their previous radius and popup. Returns how many symbols changed.
    pub fn on_index_changed(
        &self,
        layer: &ProportionalLayer,
        scaler: &ProportionalScaler,
        template: &PopupTemplate,
        renderer: &mut impl SymbolRenderer,
    ) -> usize {
        let Some(attribute) = self.current_attribute() else {
            log::warn!(
                "Sequence index {} is outside 0..{}, nothing to update",
                self.index,
                self.len()
            );
            return 0;
        };

        let mut updated = 0;
        for symbol in layer.symbols() {
            let Some(value) = attribute_value(&symbol.properties, attribute) else {
                continue;
            };
            renderer.set_radius(symbol.marker, scaler.radius(value));
            renderer.set_popup(
                symbol.marker,
                attribute_popup(template, &symbol.properties, attribute),
            );
            updated += 1;
        }

        log::debug!(
            "Updated {updated}/{} symbols for attribute {attribute}",
            layer.len()
        );

        updated
    }
}
