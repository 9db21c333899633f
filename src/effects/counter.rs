//! Count-up numbers in the hero proof strip.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::js_sys;
use web_sys::{Element, HtmlElement};

use super::dom;
use super::frame::FrameLoop;
use super::sensor::{RevealOnce, SensorOptions};
use super::Effect;

pub const COUNTER_DURATION_MS: f64 = 1600.0;
const COUNTER_SENSOR: SensorOptions = SensorOptions::new(0.3);
const CONTAINER_SELECTOR: &str = ".hero-proof";
const TARGET_SELECTOR: &str = "[data-target]";
const COUNTER_LOCALE: &str = "en-US";

pub fn ease_out_cubic(p: f64) -> f64 {
    1.0 - (1.0 - p).powi(3)
}

/// Parses the leading integer of an attribute value the way `parseInt`
/// does: surrounding whitespace and trailing units are ignored.
///
/// Unlike `parseInt`, digits that overflow `i64` give `None`, which leaves
/// that counter unanimated.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// `1200` → `"1,200"`, grouped by the browser's number formatter.
fn grouped_label(value: i64) -> String {
    js_sys::Number::from(value as f64)
        .to_locale_string(COUNTER_LOCALE)
        .into()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountUp {
    target: i64,
    duration_ms: f64,
}

impl CountUp {
    pub fn new(target: i64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
        }
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, elapsed_ms: f64) -> i64 {
        let p = self.progress(elapsed_ms);
        if p >= 1.0 {
            return self.target;
        }
        (self.target as f64 * ease_out_cubic(p)).floor() as i64
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }
}

/// Starts the count-up on `element` unless it has no usable target or has
/// already been animated.
fn animate_counter(element: HtmlElement) -> Option<FrameLoop> {
    let dataset = element.dataset();
    let Some(target) = dataset.get("target").as_deref().and_then(parse_leading_int) else {
        debug!("counter without a numeric data-target, leaving it alone");
        return None;
    };
    if dataset.get("done").is_some() {
        return None;
    }
    let _ = dataset.set("done", "1");

    let count = CountUp::new(target, COUNTER_DURATION_MS);
    let mut started_at: Option<f64> = None;
    let frames = FrameLoop::new();
    frames.start(move |now| {
        let elapsed = now - *started_at.get_or_insert(now);
        element.set_text_content(Some(&grouped_label(count.value_at(elapsed))));
        !count.is_finished(elapsed)
    });
    Some(frames)
}

#[derive(Default)]
pub struct CounterEffect {
    sensor: Option<RevealOnce>,
    running: Rc<RefCell<Vec<FrameLoop>>>,
}

impl Effect for CounterEffect {
    fn name(&self) -> &'static str {
        "counters"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let containers = dom::query_all(&document, CONTAINER_SELECTOR);
        if containers.is_empty() {
            dom::missing(self.name(), CONTAINER_SELECTOR);
            return;
        }

        let running = self.running.clone();
        self.sensor = RevealOnce::watching(COUNTER_SENSOR, &containers, move |container: &Element| {
            let counters = dom::query_all_in(container, TARGET_SELECTOR);
            for counter in counters {
                if let Ok(counter) = counter.dyn_into::<HtmlElement>() {
                    if let Some(frames) = animate_counter(counter) {
                        running.borrow_mut().push(frames);
                    }
                }
            }
        });
    }

    fn stop(&mut self) {
        self.sensor = None;
        for frames in self.running.borrow_mut().drain(..) {
            frames.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_both_ends() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn counts_from_zero_to_exact_target() {
        let count = CountUp::new(1200, COUNTER_DURATION_MS);
        assert_eq!(count.value_at(0.0), 0);
        assert_eq!(count.value_at(1600.0), 1200);
        assert_eq!(count.value_at(5000.0), 1200);
        assert!(count.is_finished(1600.0));
        assert!(!count.is_finished(1599.0));
    }

    #[test]
    fn values_never_decrease() {
        let count = CountUp::new(1200, COUNTER_DURATION_MS);
        let mut last = i64::MIN;
        let mut t = 0.0;
        while t <= 1700.0 {
            let value = count.value_at(t);
            assert!(value >= last, "{} dropped below {} at {}ms", value, last, t);
            last = value;
            t += 16.7;
        }
        assert_eq!(last, 1200);
    }

    #[test]
    fn early_frames_strictly_increase() {
        let count = CountUp::new(1200, COUNTER_DURATION_MS);
        let samples: Vec<i64> = [0.0, 200.0, 400.0, 800.0, 1200.0, 1600.0]
            .iter()
            .map(|t| count.value_at(*t))
            .collect();
        assert!(samples.windows(2).all(|w| w[0] < w[1]), "{:?}", samples);
    }

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_leading_int("1200"), Some(1200));
        assert_eq!(parse_leading_int("  47 sessions"), Some(47));
        assert_eq!(parse_leading_int("72%"), Some(72));
        assert_eq!(parse_leading_int("-5"), Some(-5));
        assert_eq!(parse_leading_int("63.8%"), Some(63));
    }

    #[test]
    fn unparsable_targets_are_rejected() {
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), None);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let count = CountUp::new(10, 0.0);
        assert_eq!(count.value_at(0.0), 10);
    }
}
