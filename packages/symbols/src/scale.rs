//! Flannery proportional symbol scaling.
//!
//! Mathematically proportional circles look too small to the human eye as
//! values grow. Flannery's compensation raises the value ratio to
//! `0.5715` instead of `0.5` and applies a small constant factor.

use geojson::FeatureCollection;
use prop_map_symbols_models::{AttributeList, DEFAULT_MIN_RADIUS, ScaleBaseline};

use crate::SymbolError;
use crate::value::attribute_value;

/// Constant factor of Flannery's formula.
pub const FLANNERY_COEFFICIENT: f64 = 1.0083;

/// Exponent of Flannery's formula.
pub const FLANNERY_EXPONENT: f64 = 0.5715;

/// Computes the minimum value across every feature and every attribute.
///
/// Features lacking a numeric value for an attribute are ignored for that
/// attribute.
///
/// # Errors
///
/// * [`SymbolError::NoValues`] if no numeric value was found at all.
/// * [`SymbolError::NonPositiveBaseline`] if the minimum is zero or
///   negative.
pub fn compute_baseline(
    collection: &FeatureCollection,
    attributes: &AttributeList,
) -> Result<ScaleBaseline, SymbolError> {
    let min = collection
        .features
        .iter()
        .filter_map(|feature| feature.properties.as_ref())
        .flat_map(|props| {
            attributes
                .iter()
                .filter_map(move |attr| attribute_value(props, attr))
        })
        .reduce(f64::min)
        .ok_or(SymbolError::NoValues)?;

    log::debug!(
        "Computed scale baseline {min} over {} features and {} attributes",
        collection.features.len(),
        attributes.len()
    );

    ScaleBaseline::new(min).ok_or(SymbolError::NonPositiveBaseline { value: min })
}

/// Applies Flannery's formula: `1.0083 * (value / baseline)^0.5715 * min_radius`.
///
/// `value` must be a real attribute value; check presence with
/// [`attribute_value`] first.
#[must_use]
pub fn radius_for(value: f64, baseline: ScaleBaseline, min_radius: f64) -> f64 {
    FLANNERY_COEFFICIENT * (value / baseline.value()).powf(FLANNERY_EXPONENT) * min_radius
}

/// A baseline paired with the minimum radius it scales from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalScaler {
    baseline: ScaleBaseline,
    min_radius: f64,
}

impl ProportionalScaler {
    #[must_use]
    pub const fn new(baseline: ScaleBaseline, min_radius: f64) -> Self {
        Self {
            baseline,
            min_radius,
        }
    }

    /// Computes the baseline of `collection` and wraps it with
    /// `min_radius`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`compute_baseline`].
    pub fn from_collection(
        collection: &FeatureCollection,
        attributes: &AttributeList,
        min_radius: f64,
    ) -> Result<Self, SymbolError> {
        Ok(Self::new(compute_baseline(collection, attributes)?, min_radius))
    }

    #[must_use]
    pub const fn baseline(&self) -> ScaleBaseline {
        self.baseline
    }

    #[must_use]
    pub const fn min_radius(&self) -> f64 {
        self.min_radius
    }

    #[must_use]
    pub fn radius(&self, value: f64) -> f64 {
        radius_for(value, self.baseline, self.min_radius)
    }
}

impl From<ScaleBaseline> for ProportionalScaler {
    fn from(baseline: ScaleBaseline) -> Self {
        Self::new(baseline, DEFAULT_MIN_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prop_map_symbols_models::IdentifyingFields;
    use serde_json::json;

    use crate::attributes::extract_attributes;

    fn two_countries() -> FeatureCollection {
        serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [10.0, 20.0] },
                    "properties": { "country": "A", "2014": 10, "2015": 20 }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [30.0, 40.0] },
                    "properties": { "country": "B", "2014": 5, "2015": 15 }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn baseline_is_global_minimum() {
        let fc = two_countries();
        let attrs = extract_attributes(&fc, &IdentifyingFields::default());
        let baseline = compute_baseline(&fc, &attrs).unwrap();
        assert!((baseline.value() - 5.0).abs() < f64::EPSILON);

        for feature in &fc.features {
            let props = feature.properties.as_ref().unwrap();
            for attr in attrs.iter() {
                assert!(baseline.value() <= attribute_value(props, attr).unwrap());
            }
        }
    }

    #[test]
    fn baseline_skips_missing_values() {
        let fc: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": null,
                  "properties": { "country": "A", "2014": 8, "2015": null } },
                { "type": "Feature", "geometry": null,
                  "properties": { "country": "B", "2014": 3 } }
            ]
        }))
        .unwrap();
        let attrs = extract_attributes(&fc, &IdentifyingFields::default());
        let baseline = compute_baseline(&fc, &attrs).unwrap();
        assert!((baseline.value() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_baseline_is_rejected() {
        let fc: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": null,
                  "properties": { "country": "A", "2014": 0, "2015": 4 } }
            ]
        }))
        .unwrap();
        let attrs = extract_attributes(&fc, &IdentifyingFields::default());
        assert!(matches!(
            compute_baseline(&fc, &attrs),
            Err(SymbolError::NonPositiveBaseline { .. })
        ));
    }

    #[test]
    fn no_values_is_an_error() {
        let fc: FeatureCollection =
            serde_json::from_value(json!({ "type": "FeatureCollection", "features": [] }))
                .unwrap();
        assert!(matches!(
            compute_baseline(&fc, &AttributeList::default()),
            Err(SymbolError::NoValues)
        ));
    }

    #[test]
    fn baseline_value_maps_to_coefficient_times_min_radius() {
        let baseline = ScaleBaseline::new(5.0).unwrap();
        assert_eq!(radius_for(5.0, baseline, 5.0), 1.0083 * 5.0);
    }

    #[test]
    fn doubling_the_value() {
        let baseline = ScaleBaseline::new(5.0).unwrap();
        let expected = 1.0083 * 2f64.powf(0.5715) * 5.0;
        let radius = radius_for(10.0, baseline, 5.0);
        assert!((radius - expected).abs() < 1e-12);
        assert!((radius - 7.492).abs() < 0.001);
    }

    #[test]
    fn radius_is_monotonic_in_value() {
        let scaler = ProportionalScaler::from(ScaleBaseline::new(0.7).unwrap());
        let mut previous = 0.0;
        for step in 0..200 {
            let value = 0.7 + f64::from(step) * 0.5;
            let radius = scaler.radius(value);
            assert!(radius >= previous, "radius decreased at {value}");
            previous = radius;
        }
    }
}
