//! Viewport visibility built on `IntersectionObserver`.
//!
//! [`VisibilitySensor`] reports every visibility change for the elements it
//! watches. [`RevealOnce`] layers the pattern most of the page uses on top:
//! fire the callback the first time an element is sufficiently visible, then
//! stop watching it.

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Browsers report ratios like 0.0799999 for an element sitting exactly on
/// an 8% threshold.
const RATIO_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl SensorOptions {
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: "0px",
        }
    }

    pub const fn with_root_margin(self, root_margin: &'static str) -> Self {
        Self {
            threshold: self.threshold,
            root_margin,
        }
    }
}

impl Default for SensorOptions {
    fn default() -> Self {
        Self::new(0.0)
    }
}

pub fn is_sufficiently_visible(is_intersecting: bool, ratio: f64, threshold: f64) -> bool {
    is_intersecting && ratio + RATIO_TOLERANCE >= threshold
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct VisibilitySensor {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl VisibilitySensor {
    /// `on_change` gets the target, whether it now counts as visible, and
    /// the observer so it can unsubscribe the target.
    pub fn new<F>(options: SensorOptions, mut on_change: F) -> Result<Self, JsValue>
    where
        F: FnMut(&Element, bool, &IntersectionObserver) + 'static,
    {
        let threshold = options.threshold;
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let visible = is_sufficiently_visible(
                    entry.is_intersecting(),
                    entry.intersection_ratio(),
                    threshold,
                );
                on_change(&entry.target(), visible, &observer);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn watch(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for VisibilitySensor {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Subscribe, fire once, unsubscribe.
pub struct RevealOnce {
    sensor: VisibilitySensor,
}

impl RevealOnce {
    pub fn new<F>(options: SensorOptions, mut on_reveal: F) -> Result<Self, JsValue>
    where
        F: FnMut(&Element) + 'static,
    {
        let sensor = VisibilitySensor::new(options, move |target, visible, observer| {
            if visible {
                on_reveal(target);
                observer.unobserve(target);
            }
        })?;
        Ok(Self { sensor })
    }

    /// Builds the sensor and subscribes every element, logging instead of
    /// failing when the browser refuses the observer.
    pub fn watching<F>(options: SensorOptions, elements: &[Element], on_reveal: F) -> Option<Self>
    where
        F: FnMut(&Element) + 'static,
    {
        match Self::new(options, on_reveal) {
            Ok(reveal) => {
                for element in elements {
                    reveal.watch(element);
                }
                Some(reveal)
            }
            Err(e) => {
                warn!("IntersectionObserver unavailable: {:?}", e);
                None
            }
        }
    }

    pub fn watch(&self, element: &Element) {
        self.sensor.watch(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_does_not_count() {
        assert!(!is_sufficiently_visible(true, 0.07, 0.08));
    }

    #[test]
    fn at_or_above_threshold_counts() {
        assert!(is_sufficiently_visible(true, 0.08, 0.08));
        assert!(is_sufficiently_visible(true, 0.0799999999, 0.08));
        assert!(is_sufficiently_visible(true, 0.5, 0.08));
    }

    #[test]
    fn leaving_the_viewport_never_counts() {
        assert!(!is_sufficiently_visible(false, 1.0, 0.08));
        assert!(!is_sufficiently_visible(false, 0.0, 0.0));
    }

    #[test]
    fn zero_threshold_fires_on_any_intersection() {
        assert!(is_sufficiently_visible(true, 0.0, 0.0));
    }

    #[test]
    fn options_keep_threshold_when_margin_changes() {
        let options = SensorOptions::new(0.08).with_root_margin("0px 0px -30px 0px");
        assert_eq!(options.threshold, 0.08);
        assert_eq!(options.root_margin, "0px 0px -30px 0px");
        assert_eq!(SensorOptions::default().root_margin, "0px");
    }
}
