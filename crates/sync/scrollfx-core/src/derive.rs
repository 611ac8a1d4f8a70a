//! Pure derivations: scroll sample → visibility → bounded rotation.
//!
//! Nothing here touches a host. The synchronizers feed samples in and stage
//! the results into a frame batch.

use serde::{Deserialize, Serialize};

/// Static odd/even tag assigned by position when a synchronizer attaches.
/// Odd elements rotate the other way.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Even,
    Odd,
    #[default]
    None,
}

impl Parity {
    /// Index 0 is even, 1 is odd, and so on.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        if index % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    /// Class name hosts put on the element for this parity.
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Parity::Even => Some("even"),
            Parity::Odd => Some("odd"),
            Parity::None => None,
        }
    }

    #[inline]
    fn sign(self) -> f64 {
        match self {
            Parity::Odd => -1.0,
            Parity::Even | Parity::None => 1.0,
        }
    }
}

/// One element's position relative to the viewport at the time of a scroll event.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollSample {
    /// Element's bounding top relative to the viewport top.
    pub element_top: f64,
    pub viewport_height: f64,
}

impl ScrollSample {
    pub fn new(element_top: f64, viewport_height: f64) -> Self {
        Self {
            element_top,
            viewport_height,
        }
    }

    /// Percentage (0..=100) of the viewport height the element has scrolled
    /// into. `None` while the element's top sits at or below the viewport
    /// bottom, or when the viewport has no height.
    pub fn visible_percent(&self) -> Option<f64> {
        let vh = self.viewport_height;
        // NaN tops compare false and are treated as not visible.
        if !(vh > 0.0 && self.element_top < vh) {
            return None;
        }
        let ratio = ((vh - self.element_top) / vh).clamp(0.0, 1.0);
        Some(ratio * 100.0)
    }
}

/// Rotation written to an element's transform.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    pub degrees: f64,
}

impl RotationState {
    /// CSS transform value for this rotation.
    pub fn to_css(&self) -> String {
        format!("rotate({}deg)", self.degrees)
    }
}

/// Unsigned rotation for a visibility percentage, capped at `max_degrees`.
#[inline]
pub fn rotation_degrees(visible_percent: f64, max_degrees: f64) -> f64 {
    (visible_percent / 100.0 * max_degrees).min(max_degrees)
}

/// Full derivation for one element: visibility, cap, parity sign.
/// Returns `None` when the element is not yet on screen.
pub fn derive_rotation(
    sample: ScrollSample,
    max_degrees: f64,
    parity: Parity,
) -> Option<RotationState> {
    let percent = sample.visible_percent()?;
    Some(RotationState {
        degrees: parity.sign() * rotation_degrees(percent, max_degrees),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_alternates_from_even() {
        let classes: Vec<_> = (0..4).map(Parity::from_index).collect();
        assert_eq!(classes, vec![Parity::Even, Parity::Odd, Parity::Even, Parity::Odd]);
        assert_eq!(Parity::Odd.class_name(), Some("odd"));
        assert_eq!(Parity::None.class_name(), None);
    }

    #[test]
    fn visibility_is_clamped() {
        assert_eq!(ScrollSample::new(400.0, 800.0).visible_percent(), Some(50.0));
        assert_eq!(ScrollSample::new(0.0, 800.0).visible_percent(), Some(100.0));
        // Scrolled far past the top still reads as fully visible.
        assert_eq!(ScrollSample::new(-5000.0, 800.0).visible_percent(), Some(100.0));
    }

    #[test]
    fn elements_below_the_fold_are_skipped() {
        assert_eq!(ScrollSample::new(800.0, 800.0).visible_percent(), None);
        assert_eq!(ScrollSample::new(1200.0, 800.0).visible_percent(), None);
        assert_eq!(ScrollSample::new(f64::NAN, 800.0).visible_percent(), None);
        assert_eq!(ScrollSample::new(10.0, 0.0).visible_percent(), None);
    }

    #[test]
    fn half_visible_items_rotate_half_the_cap() {
        let sample = ScrollSample::new(400.0, 800.0);
        let even = derive_rotation(sample, 30.0, Parity::Even).unwrap();
        let odd = derive_rotation(sample, 30.0, Parity::Odd).unwrap();
        assert_eq!(even.degrees, 15.0);
        assert_eq!(odd.degrees, -15.0);
        assert_eq!(odd.to_css(), "rotate(-15deg)");
    }

    #[test]
    fn rotation_never_exceeds_cap() {
        assert_eq!(rotation_degrees(100.0, 30.0), 30.0);
        assert_eq!(rotation_degrees(250.0, 30.0), 30.0);
        assert_eq!(rotation_degrees(0.0, 30.0), 0.0);
    }
}
