use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::bounds::GaugeBounds;

/// Side of the square SVG canvas (`viewBox="0 0 100 100"`).
pub const CANVAS_SIZE: f64 = 100.0;
pub const CENTER: f64 = CANVAS_SIZE / 2.0;
pub const RADIUS: f64 = 45.0;
pub const STROKE_WIDTH: f64 = 10.0;
/// Visual gap between the two arcs, in percent of the ring.
pub const GAP_PERCENT: f64 = 5.0;
/// How the gap is split between primary (0.0) and secondary (1.0) arc.
pub const OFFSET_FACTOR: f64 = 0.0;
pub const DEG_PER_PERCENT: f64 = 3.6;
/// The secondary arc is only drawn while the primary covers at most this much.
pub const SECONDARY_CEILING: u8 = 90;

#[must_use]
pub fn circumference() -> f64 {
    2.0 * PI * RADIUS
}

fn percent_to_length(percent: f64) -> f64 {
    percent * (circumference() / 100.0)
}

/// Dash pattern and placement for one stroke of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcGeometry {
    /// Visible stroke length along the circle.
    pub dash_length: f64,
    /// Gap after the dash; the full circumference so the dash never repeats.
    pub gap_length: f64,
    /// Clockwise rotation about the canvas center, in degrees.
    pub rotation_deg: f64,
    /// Reflected across the horizontal axis after rotation.
    pub mirrored: bool,
}

/// Everything needed to draw the gauge for one counter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeGeometry {
    pub percent: u8,
    pub label: i32,
    pub circumference: f64,
    pub primary: ArcGeometry,
    pub secondary: Option<ArcGeometry>,
}

impl GaugeGeometry {
    #[must_use]
    pub fn derive(counter: i32, bounds: GaugeBounds) -> Self {
        let percent = bounds.percent_of(counter);
        let circumference = circumference();

        let primary = ArcGeometry {
            dash_length: percent_to_length(f64::from(percent)),
            gap_length: circumference,
            rotation_deg: -90.0 + GAP_PERCENT * OFFSET_FACTOR * DEG_PER_PERCENT,
            mirrored: false,
        };

        let secondary = (percent <= SECONDARY_CEILING).then(|| ArcGeometry {
            dash_length: percent_to_length(f64::from(SECONDARY_CEILING - percent)),
            gap_length: circumference,
            rotation_deg: 360.0 - 90.0 - GAP_PERCENT * DEG_PER_PERCENT * (1.0 - OFFSET_FACTOR),
            mirrored: true,
        });

        Self {
            percent,
            label: counter,
            circumference,
            primary,
            secondary,
        }
    }

    #[must_use]
    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn derive(counter: i32) -> GaugeGeometry {
        GaugeGeometry::derive(counter, GaugeBounds::default())
    }

    #[test]
    fn full_counter_suppresses_secondary() {
        let g = derive(10);
        assert_eq!(g.percent, 100);
        assert_eq!(g.label, 10);
        assert!(approx(g.primary.dash_length, circumference()));
        assert!(g.secondary.is_none());
    }

    #[test]
    fn ninety_percent_keeps_zero_length_secondary() {
        let g = derive(9);
        assert_eq!(g.percent, 90);
        let secondary = g.secondary.expect("secondary drawn at 90%");
        assert!(approx(secondary.dash_length, 0.0));
        assert!(secondary.mirrored);
    }

    #[test]
    fn ninety_one_percent_drops_secondary() {
        let bounds = GaugeBounds::new(0, 100).unwrap();
        let g = GaugeGeometry::derive(91, bounds);
        assert_eq!(g.percent, 91);
        assert!(!g.has_secondary());
    }

    #[test]
    fn counter_below_min_reads_as_empty_gauge() {
        let bounds = GaugeBounds::new(5, 10).unwrap();
        let g = GaugeGeometry::derive(3, bounds);
        assert_eq!(g.percent, 0);
        assert_eq!(g.label, 3);
        assert!(approx(g.primary.dash_length, 0.0));
        let secondary = g.secondary.expect("secondary drawn below min");
        assert!(approx(secondary.dash_length, circumference() * 0.9));
    }

    #[test]
    fn zero_counter_draws_empty_primary_and_long_secondary() {
        let g = derive(0);
        assert_eq!(g.percent, 0);
        assert!(approx(g.primary.dash_length, 0.0));
        let secondary = g.secondary.expect("secondary drawn at 0%");
        assert!(approx(secondary.dash_length, 0.9 * circumference()));
    }

    #[test]
    fn secondary_presence_matches_band_for_every_percent() {
        let bounds = GaugeBounds::new(0, 100).unwrap();
        for counter in 0..=100 {
            let g = GaugeGeometry::derive(counter, bounds);
            assert!(g.percent <= 100);
            assert_eq!(g.has_secondary(), g.percent <= SECONDARY_CEILING, "at {counter}");
            if let Some(secondary) = g.secondary {
                assert!(secondary.dash_length >= 0.0);
            }
        }
    }

    #[test]
    fn arcs_are_rotated_to_start_at_top() {
        let g = derive(5);
        assert!(approx(g.primary.rotation_deg, -90.0));
        let secondary = g.secondary.unwrap();
        assert!(approx(secondary.rotation_deg, 252.0));
        assert!(!g.primary.mirrored);
    }

    #[test]
    fn circumference_uses_fixed_radius() {
        assert!(approx(circumference(), 90.0 * PI));
    }
}
