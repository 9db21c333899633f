//! Spectrum bars: the live analyzer in the hero mockup and the static
//! icon on the matching feature card.

use log::warn;
use web_sys::{Document, Element};

use super::dom;
use super::frame::FrameLoop;
use super::sensor::{RevealOnce, SensorOptions};
use super::Effect;

const SPECTRUM_SELECTOR: &str = "#mock-spectrum";
const BAR_CLASS: &str = "ms-bar";
pub const SPECTRUM_BARS: usize = 24;
const SPECTRUM_REFRESH_MS: f64 = 120.0;
const HEIGHT_PROPERTY: &str = "--h";

const ICON_SELECTOR: &str = ".f-icon-spectrum";
pub const ICON_BARS: usize = 12;

pub fn initial_bar_height(sample: f64) -> f64 {
    20.0 + sample * 60.0
}

/// Bars near 40% of the width run taller, like a real mix's mid range.
pub fn bar_height(index: usize, count: usize, sample: f64) -> f64 {
    let position = index as f64 / count.max(1) as f64;
    let mid_bias = 1.0 - (position - 0.4).abs() * 1.5;
    ((30.0 + sample * 60.0) * mid_bias.max(0.3)).max(10.0)
}

pub fn icon_bar_style(sample: f64) -> String {
    format!(
        "flex:1;height:{}%;border-radius:2px;\
         background:linear-gradient(to top,var(--accent),var(--warm));\
         opacity:0.5;transition:height 0.3s",
        20.0 + sample * 80.0
    )
}

/// Rate limiter for the analyzer repaint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpectrumClock {
    last_update: f64,
}

impl SpectrumClock {
    pub fn should_update(&mut self, now: f64) -> bool {
        if now - self.last_update > SPECTRUM_REFRESH_MS {
            self.last_update = now;
            true
        } else {
            false
        }
    }
}

fn append_bar(document: &Document, container: &Element, class: Option<&str>, style: &str) -> Option<Element> {
    let bar = document.create_element("div").ok()?;
    if let Some(class) = class {
        bar.set_class_name(class);
    }
    let _ = bar.set_attribute("style", style);
    match container.append_child(&bar) {
        Ok(_) => Some(bar),
        Err(e) => {
            warn!("failed to append spectrum bar: {:?}", e);
            None
        }
    }
}

#[derive(Default)]
pub struct SpectrumEffect {
    frames: FrameLoop,
    sensor: Option<RevealOnce>,
}

impl Effect for SpectrumEffect {
    fn name(&self) -> &'static str {
        "spectrum"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(container) = dom::query(&document, SPECTRUM_SELECTOR) else {
            dom::missing(self.name(), SPECTRUM_SELECTOR);
            return;
        };

        if container.child_element_count() == 0 {
            for _ in 0..SPECTRUM_BARS {
                let style = format!("{}: {}%", HEIGHT_PROPERTY, initial_bar_height(dom::random()));
                append_bar(&document, &container, Some(BAR_CLASS), &style);
            }
        }
        let bars = dom::html_elements(dom::query_all_in(&container, &format!(".{}", BAR_CLASS)));

        let frames = self.frames.clone();
        self.sensor = RevealOnce::watching(SensorOptions::default(), &[container], move |_| {
            let bars = bars.clone();
            let mut clock = SpectrumClock::default();
            frames.start(move |now| {
                if clock.should_update(now) {
                    let count = bars.len();
                    for (i, bar) in bars.iter().enumerate() {
                        let height = bar_height(i, count, dom::random());
                        dom::set_style(bar, HEIGHT_PROPERTY, &format!("{}%", height));
                    }
                }
                true
            });
        });
    }

    fn stop(&mut self) {
        self.sensor = None;
        self.frames.clear();
    }
}

/// Fills the feature card icon with static bars once.
#[derive(Default)]
pub struct FeatureSpectrumEffect;

impl Effect for FeatureSpectrumEffect {
    fn name(&self) -> &'static str {
        "feature-spectrum"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(icon) = dom::query(&document, ICON_SELECTOR) else {
            dom::missing(self.name(), ICON_SELECTOR);
            return;
        };
        if icon.child_element_count() > 0 {
            return;
        }
        for _ in 0..ICON_BARS {
            append_bar(&document, &icon, None, &icon_bar_style(dom::random()));
        }
    }

    fn stop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_heights_span_twenty_to_eighty() {
        assert_eq!(initial_bar_height(0.0), 20.0);
        assert!(initial_bar_height(0.999) < 80.0);
    }

    #[test]
    fn mids_are_taller_than_edges() {
        let mid = bar_height(10, SPECTRUM_BARS, 0.5);
        let low = bar_height(0, SPECTRUM_BARS, 0.5);
        let high = bar_height(SPECTRUM_BARS - 1, SPECTRUM_BARS, 0.5);
        assert!(mid > low);
        assert!(mid > high);
    }

    #[test]
    fn bars_never_drop_below_floor() {
        for i in 0..SPECTRUM_BARS {
            for sample in [0.0, 0.25, 0.5, 0.999] {
                let h = bar_height(i, SPECTRUM_BARS, sample);
                assert!(h >= 10.0 && h < 90.0, "bar {} at {} was {}", i, sample, h);
            }
        }
    }

    #[test]
    fn clock_limits_repaints() {
        let mut clock = SpectrumClock::default();
        assert!(clock.should_update(500.0));
        assert!(!clock.should_update(560.0));
        assert!(!clock.should_update(620.0));
        assert!(clock.should_update(621.0));
    }

    #[test]
    fn icon_bar_height_is_inlined() {
        assert!(icon_bar_style(0.0).starts_with("flex:1;height:20%;"));
    }
}
