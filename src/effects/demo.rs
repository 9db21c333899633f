use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use super::dom::{self, Listener};
use super::Effect;

const SLIDER_SELECTOR: &str = "#demo-slider";
const PERCENT_SELECTOR: &str = "#demo-pct";
const BEFORE_SELECTOR: &str = ".demo-before";
const AFTER_SELECTOR: &str = ".demo-after";

/// Opacity of the before and after cards for a slider value in `0..=100`.
pub fn card_opacities(value: f64) -> (f64, f64) {
    let v = value.clamp(0.0, 100.0) / 100.0;
    (0.4 + (1.0 - v) * 0.6, 0.4 + v * 0.6)
}

/// Before/after blend slider under the demo player.
#[derive(Default)]
pub struct DemoSliderEffect {
    input: Option<Listener>,
}

impl Effect for DemoSliderEffect {
    fn name(&self) -> &'static str {
        "demo-slider"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let (Some(slider), Some(percent)) = (
            dom::query(&document, SLIDER_SELECTOR).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()),
            dom::query(&document, PERCENT_SELECTOR),
        ) else {
            dom::missing(self.name(), SLIDER_SELECTOR);
            return;
        };

        let input = slider.clone();
        self.input = Listener::new(&slider, "input", move |_| {
            let raw = input.value();
            percent.set_text_content(Some(&format!("{}%", raw)));
            let Ok(value) = raw.parse::<f64>() else {
                return;
            };
            let (before, after) = card_opacities(value);
            if let Some(card) = dom::query_html(&document, BEFORE_SELECTOR) {
                dom::set_style(&card, "opacity", &before.to_string());
            }
            if let Some(card) = dom::query_html(&document, AFTER_SELECTOR) {
                dom::set_style(&card, "opacity", &after.to_string());
            }
        });
    }

    fn stop(&mut self) {
        self.input = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_of_the_slider_favor_one_card() {
        assert_eq!(card_opacities(0.0), (1.0, 0.4));
        assert_eq!(card_opacities(100.0), (0.4, 1.0));
    }

    #[test]
    fn middle_is_balanced() {
        let (before, after) = card_opacities(50.0);
        assert!((before - after).abs() < 1e-12);
        assert!((before - 0.7).abs() < 1e-12);
    }
}
