//! Sequence controls: a range slider and forward/reverse step buttons.

use prop_map_symbols_models::StepDirection;
use serde::{Deserialize, Serialize};

/// An integer range slider. Values outside `[min, max]` are clamped, the
/// way a browser range input clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slider {
    pub min: i64,
    pub max: i64,
    pub step: i64,
    value: i64,
}

impl Slider {
    /// Creates a slider over `[min, max]` starting at `min`.
    #[must_use]
    pub const fn new(min: i64, max: i64, step: i64) -> Self {
        Self {
            min,
            max,
            step,
            value: min,
        }
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Sets the value, clamped to the slider range. Returns the stored value.
    pub fn set_value(&mut self, value: i64) -> i64 {
        self.value = value.clamp(self.min, self.max);
        self.value
    }
}

/// User input emitted by the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlEvent {
    /// The slider was dragged to a raw value.
    SliderInput {
        /// Raw slider value before clamping.
        value: i64,
    },
    /// A step button was clicked.
    Step {
        /// Which button.
        direction: StepDirection,
    },
}

/// The slider and step buttons for one sequenced attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiControls {
    slider: Slider,
}

impl UiControls {
    /// Creates controls for `len` attributes: a slider over `0..len`, step 1.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let max = i64::try_from(len.saturating_sub(1)).unwrap_or(i64::MAX);
        Self {
            slider: Slider::new(0, max, 1),
        }
    }

    #[must_use]
    pub const fn slider(&self) -> &Slider {
        &self.slider
    }

    /// Moves the slider thumb to `index` after a step button changed the
    /// sequence.
    pub fn sync_to(&mut self, index: usize) {
        self.slider
            .set_value(i64::try_from(index).unwrap_or(self.slider.max));
    }

    /// Applies raw slider input and returns the index it selects.
    pub fn slider_input(&mut self, value: i64) -> usize {
        usize::try_from(self.slider.set_value(value)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_spans_attribute_indices() {
        let controls = UiControls::new(10);
        assert_eq!(controls.slider().min, 0);
        assert_eq!(controls.slider().max, 9);
        assert_eq!(controls.slider().step, 1);
        assert_eq!(controls.slider().value(), 0);
    }

    #[test]
    fn slider_input_is_clamped() {
        let mut controls = UiControls::new(10);
        assert_eq!(controls.slider_input(4), 4);
        assert_eq!(controls.slider_input(42), 9);
        assert_eq!(controls.slider_input(-3), 0);
    }

    #[test]
    fn sync_moves_the_thumb() {
        let mut controls = UiControls::new(3);
        controls.sync_to(2);
        assert_eq!(controls.slider().value(), 2);
    }

    #[test]
    fn control_events_deserialize_from_json() {
        let event: ControlEvent =
            serde_json::from_str(r#"{ "type": "step", "direction": "reverse" }"#).unwrap();
        assert_eq!(
            event,
            ControlEvent::Step {
                direction: StepDirection::Reverse
            }
        );
    }
}
