use log::warn;
use web_sys::{Document, HtmlElement};

use super::dom;
use super::sensor::{SensorOptions, VisibilitySensor};
use super::Effect;

const PROGRESS_SELECTOR: &str = "#timeline-progress";
const STEP_SELECTOR: &str = ".tl-step";
const ACTIVE_STEP_SELECTOR: &str = ".tl-step.active";
const ACTIVE_CLASS: &str = "active";
const STEP_SENSOR: SensorOptions = SensorOptions::new(0.3);

pub fn progress_width(active: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    active.min(total) as f64 / total as f64 * 100.0
}

fn update_progress(document: &Document, bar: &HtmlElement, total: usize) {
    let active = dom::query_all(document, ACTIVE_STEP_SELECTOR).len();
    dom::set_style(bar, "width", &format!("{}%", progress_width(active, total)));
}

/// Roadmap steps light up as they scroll in and the rail fills to match.
#[derive(Default)]
pub struct TimelineEffect {
    sensor: Option<VisibilitySensor>,
}

impl Effect for TimelineEffect {
    fn name(&self) -> &'static str {
        "timeline"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(bar) = dom::query_html(&document, PROGRESS_SELECTOR) else {
            dom::missing(self.name(), PROGRESS_SELECTOR);
            return;
        };
        let steps = dom::query_all(&document, STEP_SELECTOR);
        if steps.is_empty() {
            return;
        }
        let total = steps.len();

        let sensor = {
            let document = document.clone();
            VisibilitySensor::new(STEP_SENSOR, move |step, visible, _| {
                if visible {
                    dom::add_class(step, ACTIVE_CLASS);
                    update_progress(&document, &bar, total);
                }
            })
        };
        match sensor {
            Ok(sensor) => {
                for step in &steps {
                    sensor.watch(step);
                }
                self.sensor = Some(sensor);
            }
            Err(e) => warn!("timeline: IntersectionObserver unavailable: {:?}", e),
        }
    }

    fn stop(&mut self) {
        self.sensor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_in_equal_steps() {
        assert_eq!(progress_width(0, 4), 0.0);
        assert_eq!(progress_width(1, 4), 25.0);
        assert_eq!(progress_width(4, 4), 100.0);
    }

    #[test]
    fn never_overfills() {
        assert_eq!(progress_width(6, 4), 100.0);
        assert_eq!(progress_width(3, 0), 0.0);
    }
}
