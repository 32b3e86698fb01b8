//! Countdown gauge domain: bounds, the cyclic counter and the ring geometry
//! derived from it. Everything here is pure; timers and rendering live in the
//! `services` and `ui` crates.

mod bounds;
mod countdown;
mod geometry;

pub use bounds::{DEFAULT_MAX, DEFAULT_MIN, GaugeBounds, GaugeConfigError};
pub use countdown::{Countdown, TICK_PERIOD};
pub use geometry::{
    ArcGeometry, CANVAS_SIZE, CENTER, DEG_PER_PERCENT, GAP_PERCENT, GaugeGeometry, OFFSET_FACTOR,
    RADIUS, SECONDARY_CEILING, STROKE_WIDTH, circumference,
};
