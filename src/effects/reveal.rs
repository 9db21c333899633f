//! Scroll-triggered reveal: content blocks start hidden and fade in the
//! first time they scroll into view.

use web_sys::Element;

use super::dom;
use super::sensor::{RevealOnce, SensorOptions};
use super::Effect;

pub const PENDING_CLASS: &str = "animate-on-scroll";
pub const REVEALED_CLASS: &str = "visible";
pub const STAGGER_CLASS: &str = "stagger";

pub const REVEAL_SELECTOR: &str = ".f-card, .mem-tier, .memory-compound, .tl-step, .price-card, \
     .section-header, .vision-inner, .cta-inner, .demo-player";
pub const STAGGER_SELECTOR: &str = ".feature-grid, .memory-arch, .pricing-grid, .timeline";

pub const REVEAL_SENSOR: SensorOptions =
    SensorOptions::new(0.08).with_root_margin("0px 0px -30px 0px");

/// One-way visibility state of a watched element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

impl RevealState {
    pub fn of(element: &Element) -> Self {
        if dom::has_class(element, REVEALED_CLASS) {
            RevealState::Revealed
        } else {
            RevealState::Pending
        }
    }

    /// Returns true only for the call that performs the transition.
    pub fn reveal(&mut self) -> bool {
        match self {
            RevealState::Pending => {
                *self = RevealState::Revealed;
                true
            }
            RevealState::Revealed => false,
        }
    }
}

pub fn apply_reveal(element: &Element) -> bool {
    let mut state = RevealState::of(element);
    let changed = state.reveal();
    if changed {
        dom::add_class(element, REVEALED_CLASS);
    }
    changed
}

#[derive(Default)]
pub struct ScrollRevealEffect {
    sensor: Option<RevealOnce>,
}

impl Effect for ScrollRevealEffect {
    fn name(&self) -> &'static str {
        "scroll-reveal"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };

        let watched = dom::query_all(&document, REVEAL_SELECTOR);
        for element in &watched {
            dom::add_class(element, PENDING_CLASS);
        }
        for container in dom::query_all(&document, STAGGER_SELECTOR) {
            dom::add_class(&container, STAGGER_CLASS);
        }

        let pending: Vec<Element> = watched
            .into_iter()
            .filter(|el| RevealState::of(el) == RevealState::Pending)
            .collect();

        self.sensor = RevealOnce::watching(REVEAL_SENSOR, &pending, |target| {
            apply_reveal(target);
        });
    }

    fn stop(&mut self) {
        self.sensor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays visibility events against one element and records each state
    /// it is observed in.
    fn observed_states(events: usize) -> Vec<RevealState> {
        let mut state = RevealState::Pending;
        let mut seen = Vec::new();
        for _ in 0..events {
            if seen.is_empty() {
                seen.push(state);
            }
            if state.reveal() {
                seen.push(state);
            }
        }
        seen
    }

    #[test]
    fn never_visible_has_no_transitions() {
        assert!(observed_states(0).is_empty());
    }

    #[test]
    fn first_event_reveals() {
        assert_eq!(
            observed_states(1),
            vec![RevealState::Pending, RevealState::Revealed]
        );
    }

    #[test]
    fn refiring_is_idempotent() {
        assert_eq!(
            observed_states(5),
            vec![RevealState::Pending, RevealState::Revealed]
        );
    }

    #[test]
    fn revealed_never_goes_back_to_pending() {
        let mut state = RevealState::Revealed;
        assert!(!state.reveal());
        assert_eq!(state, RevealState::Revealed);
    }

    #[test]
    fn reveal_sensor_uses_page_threshold_and_margin() {
        assert_eq!(REVEAL_SENSOR.threshold, 0.08);
        assert_eq!(REVEAL_SENSOR.root_margin, "0px 0px -30px 0px");
    }
}
