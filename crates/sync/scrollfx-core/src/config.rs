//! Configuration for the parallax and color synchronizers.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Rotation cap in whole degrees.
///
/// Raw input is coerced the way a permissive UI effect expects: numbers are
/// truncated toward zero, strings are read up to the first non-digit, and
/// anything that does not end up as a positive integer falls back to
/// [`MaxRotation::FALLBACK`]. Coercion never fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "u32")]
pub struct MaxRotation(u32);

impl MaxRotation {
    /// Cap used when the caller supplies nothing.
    pub const DEFAULT: MaxRotation = MaxRotation(30);
    /// Cap used when the caller supplies something unusable.
    pub const FALLBACK: MaxRotation = MaxRotation(5);

    pub fn from_f64(raw: f64) -> Self {
        if raw.is_finite() {
            let whole = raw.trunc();
            if whole >= 1.0 {
                return MaxRotation(whole.min(u32::MAX as f64) as u32);
            }
        }
        warn!("max rotation {raw} is not a positive number; using {}", Self::FALLBACK.0);
        Self::FALLBACK
    }

    /// Leading-integer parse: optional whitespace, optional sign, digits.
    /// Trailing garbage is ignored (`"12deg"` → 12).
    pub fn from_str_lossy(raw: &str) -> Self {
        let s = raw.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        match rest[..digits_end].parse::<f64>() {
            Ok(n) => Self::from_f64(if negative { -n } else { n }),
            Err(_) => {
                warn!("max rotation {raw:?} is not numeric; using {}", Self::FALLBACK.0);
                Self::FALLBACK
            }
        }
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for MaxRotation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f64> for MaxRotation {
    fn from(raw: f64) -> Self {
        Self::from_f64(raw)
    }
}

impl From<&str> for MaxRotation {
    fn from(raw: &str) -> Self {
        Self::from_str_lossy(raw)
    }
}

impl From<JsonValue> for MaxRotation {
    fn from(raw: JsonValue) -> Self {
        match raw {
            JsonValue::Number(n) => n.as_f64().map_or(Self::FALLBACK, Self::from_f64),
            JsonValue::String(s) => Self::from_str_lossy(&s),
            other => {
                warn!("max rotation {other} is not numeric; using {}", Self::FALLBACK.0);
                Self::FALLBACK
            }
        }
    }
}

impl From<MaxRotation> for u32 {
    fn from(m: MaxRotation) -> u32 {
        m.0
    }
}

/// Settings for the parallax rotation synchronizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub max_rotation: MaxRotation,
    /// Register the scroll listener as passive (never blocks scrolling).
    pub passive: bool,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            max_rotation: MaxRotation::DEFAULT,
            passive: true,
        }
    }
}

/// Settings for the slider-to-container color synchronizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSyncConfig {
    /// Style variable read from the active slide and written to the container.
    pub variable: String,
}

impl Default for ColorSyncConfig {
    fn default() -> Self {
        Self {
            variable: "--swiper-pagination-color".to_string(),
        }
    }
}
