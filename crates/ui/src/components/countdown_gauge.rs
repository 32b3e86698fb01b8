use std::rc::Rc;

use clario_core::gauge::{DEFAULT_MAX, DEFAULT_MIN, GaugeBounds, TICK_PERIOD};
use dioxus::prelude::*;
use services::{CountdownTimer, TickerRegistry};
use tracing::error;

use crate::vm::{GaugePalette, GaugeVm};

/// Self-animating ring counting down from `max` once per second.
///
/// Bounds are validated here; the ring below is keyed by them, so changing
/// `min`/`max` remounts it with a fresh timer instead of mutating a live one.
#[component]
pub fn CountdownGauge(
    #[props(default = DEFAULT_MIN)] min: i32,
    #[props(default = DEFAULT_MAX)] max: i32,
    #[props(into)] primary_color: String,
    #[props(into)] secondary_color: String,
    #[props(default, into)] class: String,
) -> Element {
    let bounds = match GaugeBounds::new(min, max) {
        Ok(bounds) => bounds,
        Err(err) => {
            error!(min, max, error = %err, "invalid countdown gauge configuration");
            return rsx! {
                div { class: "gauge gauge-error {class}", role: "alert", "{err}" }
            };
        }
    };
    let palette = GaugePalette::new(primary_color, secondary_color);

    rsx! {
        GaugeRing { key: "{min}-{max}", bounds, palette, class }
    }
}

#[component]
fn GaugeRing(bounds: GaugeBounds, palette: GaugePalette, class: String) -> Element {
    let registry = try_use_context::<TickerRegistry>().unwrap_or_default();
    let timer = use_hook(|| Rc::new(CountdownTimer::start(bounds, TICK_PERIOD, &registry)));
    let mut countdown = use_signal(|| timer.current());

    // only the receiver goes into the task, the timer stays owned by the hook
    let ticks = timer.subscribe();
    use_future(move || {
        let mut ticks = ticks.clone();
        async move {
            while ticks.changed().await.is_ok() {
                let next = *ticks.borrow_and_update();
                countdown.set(next);
            }
        }
    });

    let stopper = Rc::clone(&timer);
    use_drop(move || {
        stopper.stop();
    });

    let vm = GaugeVm::new(&countdown.read().geometry(), &palette);

    rsx! {
        div { class: "gauge {class}",
            svg { class: "gauge-ring", view_box: "{vm.view_box}",
                circle {
                    class: "gauge-primary",
                    cx: "{vm.center}",
                    cy: "{vm.center}",
                    r: "{vm.radius}",
                    fill: "none",
                    stroke: "{vm.primary.stroke}",
                    stroke_width: "{vm.stroke_width}",
                    stroke_linecap: "round",
                    stroke_linejoin: "round",
                    stroke_dasharray: "{vm.primary.dasharray}",
                    style: "{vm.primary.style}",
                }
                if let Some(secondary) = vm.secondary.clone() {
                    circle {
                        class: "gauge-secondary",
                        cx: "{vm.center}",
                        cy: "{vm.center}",
                        r: "{vm.radius}",
                        fill: "none",
                        stroke: "{secondary.stroke}",
                        stroke_width: "{vm.stroke_width}",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        stroke_dasharray: "{secondary.dasharray}",
                        style: "{secondary.style}",
                    }
                }
            }
            span { class: "gauge-label", "data-current-value": "{vm.percent}", "{vm.label}" }
        }
    }
}
