//! The seam between symbol logic and whatever draws the map.

use prop_map_symbols_models::{MarkerDescriptor, MarkerId};

/// A map surface that displays interactive circle markers.
///
/// Implementations own the markers; callers keep the returned
/// [`MarkerId`]s and mutate markers in place through them.
pub trait SymbolRenderer {
    /// Displays a new marker and returns its handle.
    fn add_marker(&mut self, marker: MarkerDescriptor) -> MarkerId;

    /// Changes the radius of an existing marker.
    fn set_radius(&mut self, id: MarkerId, radius: f64);

    /// Replaces the popup HTML of an existing marker.
    fn set_popup(&mut self, id: MarkerId, html: String);
}
