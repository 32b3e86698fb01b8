use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::bounds::GaugeBounds;
use super::geometry::GaugeGeometry;

/// One tick per second.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Cyclic countdown: starts at `max`, steps down once per tick and jumps back
/// to `max` on the tick after reaching zero. It never halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    bounds: GaugeBounds,
    value: i32,
}

impl Countdown {
    #[must_use]
    pub fn new(bounds: GaugeBounds) -> Self {
        Self {
            bounds,
            value: bounds.max(),
        }
    }

    /// Restores a countdown at an arbitrary value, clamped into `[0, max]`.
    #[must_use]
    pub fn at(bounds: GaugeBounds, value: i32) -> Self {
        Self {
            bounds,
            value: value.clamp(0, bounds.max().max(0)),
        }
    }

    /// Applies one tick and returns the new value.
    pub fn tick(&mut self) -> i32 {
        self.value = if self.value <= 0 {
            self.bounds.max()
        } else {
            self.value - 1
        };
        self.value
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    #[must_use]
    pub fn bounds(&self) -> GaugeBounds {
        self.bounds
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        self.bounds.percent_of(self.value)
    }

    #[must_use]
    pub fn geometry(&self) -> GaugeGeometry {
        GaugeGeometry::derive(self.value, self.bounds)
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(GaugeBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_max() {
        let countdown = Countdown::default();
        assert_eq!(countdown.value(), 10);
        assert_eq!(countdown.percent(), 100);
    }

    #[test]
    fn zero_wraps_to_max_on_next_tick() {
        let mut countdown = Countdown::at(GaugeBounds::default(), 0);
        assert_eq!(countdown.percent(), 0);
        assert_eq!(countdown.tick(), 10);
    }

    #[test]
    fn stays_within_domain_over_many_cycles() {
        let bounds = GaugeBounds::new(0, 7).unwrap();
        let mut countdown = Countdown::new(bounds);
        let mut seen_zero = 0;
        for _ in 0..100 {
            let value = countdown.tick();
            assert!((0..=7).contains(&value), "out of range: {value}");
            assert!(countdown.percent() <= 100);
            if value == 0 {
                seen_zero += 1;
            }
        }
        // 8 values per cycle
        assert_eq!(seen_zero, 100 / 8);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut countdown = Countdown::default();
        let values: Vec<i32> = (0..11).map(|_| countdown.tick()).collect();
        assert_eq!(values, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 10]);
    }

    #[test]
    fn restoring_clamps_into_domain() {
        let bounds = GaugeBounds::default();
        assert_eq!(Countdown::at(bounds, -4).value(), 0);
        assert_eq!(Countdown::at(bounds, 42).value(), 10);
    }
}
