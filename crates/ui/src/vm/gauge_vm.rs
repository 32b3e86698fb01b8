use std::time::Duration;

use clario_core::gauge::{ArcGeometry, CANVAS_SIZE, CENTER, GaugeGeometry, RADIUS, STROKE_WIDTH};

/// Stroke colours for the two arcs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaugePalette {
    pub primary: String,
    pub secondary: String,
}

impl GaugePalette {
    #[must_use]
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

impl Default for GaugePalette {
    fn default() -> Self {
        Self::new("#2563eb", "rgba(37, 99, 235, 0.15)")
    }
}

/// How the host interpolates between two consecutive frames of the gauge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GaugeTransition {
    pub length: Duration,
    pub delay: Duration,
    /// CSS timing function, e.g. `ease`.
    pub easing: &'static str,
}

impl Default for GaugeTransition {
    fn default() -> Self {
        Self {
            length: Duration::from_secs(1),
            delay: Duration::ZERO,
            easing: "ease",
        }
    }
}

impl GaugeTransition {
    /// CSS `transition` value animating the listed properties.
    #[must_use]
    pub fn css(&self, properties: &[&str]) -> String {
        properties
            .iter()
            .map(|prop| {
                format!(
                    "{prop} {}ms {} {}ms",
                    self.length.as_millis(),
                    self.easing,
                    self.delay.as_millis()
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// SVG attribute values for one `<circle>` of the ring.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcVm {
    pub stroke: String,
    pub dasharray: String,
    pub style: String,
}

impl ArcVm {
    fn new(arc: &ArcGeometry, stroke: &str, transition: &GaugeTransition) -> Self {
        let mut transform = format!("rotate({:.1}deg)", arc.rotation_deg);
        if arc.mirrored {
            transform.push_str(" scaleY(-1)");
        }
        let style = format!(
            "transform: {transform}; transform-origin: {CENTER}px {CENTER}px; transition: {};",
            transition.css(&["stroke-dasharray", "transform", "stroke"])
        );
        Self {
            stroke: stroke.to_owned(),
            dasharray: format!("{:.3} {:.3}", arc.dash_length, arc.gap_length),
            style,
        }
    }
}

/// Everything the gauge component renders for one counter value.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeVm {
    pub view_box: String,
    pub center: String,
    pub radius: String,
    pub stroke_width: String,
    pub label: String,
    pub percent: u8,
    pub primary: ArcVm,
    pub secondary: Option<ArcVm>,
}

impl GaugeVm {
    #[must_use]
    pub fn new(geometry: &GaugeGeometry, palette: &GaugePalette) -> Self {
        let transition = GaugeTransition::default();
        Self {
            view_box: format!("0 0 {CANVAS_SIZE} {CANVAS_SIZE}"),
            center: CENTER.to_string(),
            radius: RADIUS.to_string(),
            stroke_width: STROKE_WIDTH.to_string(),
            label: geometry.label.to_string(),
            percent: geometry.percent,
            primary: ArcVm::new(&geometry.primary, &palette.primary, &transition),
            secondary: geometry
                .secondary
                .as_ref()
                .map(|arc| ArcVm::new(arc, &palette.secondary, &transition)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clario_core::gauge::GaugeBounds;

    fn vm(counter: i32) -> GaugeVm {
        GaugeVm::new(
            &GaugeGeometry::derive(counter, GaugeBounds::default()),
            &GaugePalette::new("red", "gray"),
        )
    }

    #[test]
    fn label_is_counter_not_percent() {
        let vm = vm(7);
        assert_eq!(vm.label, "7");
        assert_eq!(vm.percent, 70);
    }

    #[test]
    fn secondary_is_mirrored_and_uses_secondary_colour() {
        let vm = vm(3);
        let secondary = vm.secondary.expect("secondary at 30%");
        assert_eq!(secondary.stroke, "gray");
        assert!(
            secondary.style.starts_with("transform: rotate(252.0deg) scaleY(-1); transform-origin: 50px 50px;"),
            "{}",
            secondary.style
        );
        assert!(vm.primary.style.starts_with("transform: rotate(-90.0deg); "));
        assert!(vm.primary.style.ends_with("transform 1000ms ease 0ms, stroke 1000ms ease 0ms;"));
        assert_eq!(vm.primary.stroke, "red");
    }

    #[test]
    fn full_gauge_has_no_secondary_and_full_dash() {
        let vm = vm(10);
        assert!(vm.secondary.is_none());
        assert_eq!(vm.primary.dasharray, "282.743 282.743");
    }

    #[test]
    fn canvas_attributes_match_fixed_layout() {
        let vm = vm(0);
        assert_eq!(vm.view_box, "0 0 100 100");
        assert_eq!((vm.center.as_str(), vm.radius.as_str()), ("50", "45"));
        assert_eq!(vm.stroke_width, "10");
        assert_eq!(vm.primary.dasharray, "0.000 282.743");
    }

    #[test]
    fn transition_css_lists_each_property() {
        let css = GaugeTransition::default().css(&["stroke-dasharray", "transform"]);
        assert_eq!(css, "stroke-dasharray 1000ms ease 0ms, transform 1000ms ease 0ms");
    }
}
