//! Mixer strip details in the hero mockup: solo buttons and bouncing
//! level meters.

use std::rc::Rc;

use gloo_timers::callback::Interval;
use web_sys::{Element, HtmlElement};

use super::counter::parse_leading_int;
use super::dom::{self, Listener};
use super::Effect;

const SOLO_SELECTOR: &str = ".m-solo";
const TRACK_SELECTOR: &str = ".m-track";
const ACTIVE_CLASS: &str = "active";
const DIMMED_OPACITY: &str = "0.3";
const FULL_OPACITY: &str = "1";

const METER_SELECTOR: &str = ".m-meter-fill";
const METER_PROPERTY: &str = "--lvl";
const METER_INTERVAL_MS: u32 = 300;
const METER_MIN: f64 = 20.0;
const METER_MAX: f64 = 98.0;

/// Opacity of a track after a solo click. `soloing` is false when the
/// click turned the solo off again.
pub fn solo_opacity(soloing: bool, track_holds_button: bool) -> &'static str {
    if !soloing || track_holds_button {
        FULL_OPACITY
    } else {
        DIMMED_OPACITY
    }
}

/// Next meter level from the current integer level and a `[0, 1)` sample.
pub fn jitter_level(base: i64, sample: f64) -> f64 {
    (base as f64 + (sample * 10.0 - 5.0)).clamp(METER_MIN, METER_MAX)
}

fn on_solo_click(button: &Element, buttons: &[Element], tracks: &[HtmlElement]) {
    let soloing = !dom::has_class(button, ACTIVE_CLASS);
    for other in buttons {
        dom::remove_class(other, ACTIVE_CLASS);
    }
    if soloing {
        dom::add_class(button, ACTIVE_CLASS);
    }
    for track in tracks {
        let holds_button = track.contains(Some(button.as_ref()));
        dom::set_style(track, "opacity", solo_opacity(soloing, holds_button));
    }
}

#[derive(Default)]
pub struct SoloEffect {
    listeners: Vec<Listener>,
}

impl Effect for SoloEffect {
    fn name(&self) -> &'static str {
        "solo"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let buttons: Rc<[Element]> = dom::query_all(&document, SOLO_SELECTOR).into();
        let tracks: Rc<[HtmlElement]> =
            dom::html_elements(dom::query_all(&document, TRACK_SELECTOR)).into();

        for button in buttons.iter() {
            let clicked = button.clone();
            let buttons = buttons.clone();
            let tracks = tracks.clone();
            self.listeners.extend(Listener::new(button, "click", move |_| {
                on_solo_click(&clicked, &buttons, &tracks);
            }));
        }
    }

    fn stop(&mut self) {
        self.listeners.clear();
    }
}

#[derive(Default)]
pub struct MeterJitterEffect {
    interval: Option<Interval>,
}

impl Effect for MeterJitterEffect {
    fn name(&self) -> &'static str {
        "meters"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let fills = dom::html_elements(dom::query_all(&document, METER_SELECTOR));
        if fills.is_empty() {
            dom::missing(self.name(), METER_SELECTOR);
            return;
        }

        self.interval = Some(Interval::new(METER_INTERVAL_MS, move || {
            for fill in &fills {
                let Some(base) = parse_leading_int(&dom::style_value(fill, METER_PROPERTY)) else {
                    continue;
                };
                let level = jitter_level(base, dom::random());
                dom::set_style(fill, METER_PROPERTY, &format!("{}%", level));
            }
        }));
    }

    fn stop(&mut self) {
        self.interval = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solo_dims_every_other_track() {
        assert_eq!(solo_opacity(true, true), "1");
        assert_eq!(solo_opacity(true, false), "0.3");
    }

    #[test]
    fn unsolo_restores_all_tracks() {
        assert_eq!(solo_opacity(false, true), "1");
        assert_eq!(solo_opacity(false, false), "1");
    }

    #[test]
    fn jitter_moves_at_most_five_points() {
        assert_eq!(jitter_level(60, 0.5), 60.0);
        assert_eq!(jitter_level(60, 0.0), 55.0);
        assert!(jitter_level(60, 0.999) < 65.0);
    }

    #[test]
    fn jitter_is_clamped() {
        assert_eq!(jitter_level(18, 0.0), METER_MIN);
        assert_eq!(jitter_level(97, 0.99), METER_MAX);
        assert_eq!(jitter_level(-40, 0.5), METER_MIN);
    }
}
