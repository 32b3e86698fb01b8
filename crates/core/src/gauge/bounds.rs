use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MIN: i32 = 0;
pub const DEFAULT_MAX: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GaugeConfigError {
    #[error("gauge max ({max}) must be greater than min ({min})")]
    InvalidRange { min: i32, max: i32 },
}

/// Validated `[min, max]` range the gauge maps onto `0..=100` percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GaugeBounds {
    min: i32,
    max: i32,
}

impl GaugeBounds {
    /// # Errors
    ///
    /// Returns `GaugeConfigError::InvalidRange` unless `max > min`.
    pub fn new(min: i32, max: i32) -> Result<Self, GaugeConfigError> {
        if max <= min {
            return Err(GaugeConfigError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> i32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Rounded position of `value` within the range, clamped to `0..=100`.
    ///
    /// Values below `min` (possible when `min > 0`, since the counter bottoms
    /// out at zero) report 0 rather than a negative percent. The gauge then
    /// reads as empty: full-length secondary arc, zero-length primary.
    #[must_use]
    pub fn percent_of(&self, value: i32) -> u8 {
        let span = f64::from(self.max) - f64::from(self.min);
        let raw = ((f64::from(value) - f64::from(self.min)) / span * 100.0).round();
        // clamped to 0..=100 so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = raw.clamp(0.0, 100.0) as u8;
        percent
    }
}

impl Default for GaugeBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}
