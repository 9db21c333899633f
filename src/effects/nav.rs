use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use super::dom::{self, Listener};
use super::frame::FrameLoop;
use super::Effect;

const NAV_SELECTOR: &str = ".nav";
const SCROLLED_CLASS: &str = "scrolled";
const SCROLLED_AFTER_PX: f64 = 40.0;
const CUE_SELECTOR: &str = ".scroll-cue";
const CUE_FADE_PX: f64 = 200.0;

const TOGGLE_SELECTOR: &str = ".nav-toggle";
const LINKS_SELECTOR: &str = ".nav-links";
const OPEN_CLASS: &str = "open";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_AFTER_PX
}

pub fn scroll_cue_opacity(scroll_y: f64) -> f64 {
    (1.0 - scroll_y / CUE_FADE_PX).max(0.0)
}

/// `aria-expanded` after a toggle click.
pub fn toggled_expanded(current: Option<&str>) -> bool {
    current != Some("true")
}

fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

/// Solid nav background once the page moves, and the hero scroll cue
/// fading out over the first 200px.
#[derive(Default)]
pub struct NavScrollEffect {
    frames: FrameLoop,
    scroll: Option<Listener>,
}

impl Effect for NavScrollEffect {
    fn name(&self) -> &'static str {
        "nav-scroll"
    }

    fn start(&mut self) {
        let (Some(document), Some(window)) = (dom::document(), web_sys::window()) else {
            return;
        };
        let nav = dom::query(&document, NAV_SELECTOR);
        let cue = dom::query_html(&document, CUE_SELECTOR);
        if nav.is_none() && cue.is_none() {
            dom::missing(self.name(), NAV_SELECTOR);
            return;
        }

        let frames = self.frames.clone();
        let queued = Rc::new(Cell::new(false));
        self.scroll = Listener::new(&window, "scroll", move |_| {
            if let Some(cue) = &cue {
                dom::set_style(cue, "opacity", &scroll_cue_opacity(scroll_y()).to_string());
            }
            let Some(nav) = nav.clone() else {
                return;
            };
            if queued.replace(true) {
                return;
            }
            let queued = queued.clone();
            frames.start(move |_| {
                let _ = nav.class_list().toggle_with_force(SCROLLED_CLASS, is_scrolled(scroll_y()));
                queued.set(false);
                false
            });
        });
    }

    fn stop(&mut self) {
        self.scroll = None;
        self.frames.clear();
    }
}

/// Burger menu on small screens.
#[derive(Default)]
pub struct MobileMenuEffect {
    listeners: Vec<Listener>,
}

impl Effect for MobileMenuEffect {
    fn name(&self) -> &'static str {
        "mobile-menu"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let (Some(toggle), Some(links)) = (
            dom::query(&document, TOGGLE_SELECTOR),
            dom::query(&document, LINKS_SELECTOR),
        ) else {
            dom::missing(self.name(), TOGGLE_SELECTOR);
            return;
        };

        {
            let toggle_el = toggle.clone();
            let links = links.clone();
            self.listeners.extend(Listener::new(&toggle, "click", move |_| {
                let expanded = toggled_expanded(toggle_el.get_attribute("aria-expanded").as_deref());
                let _ = toggle_el.set_attribute("aria-expanded", &expanded.to_string());
                let _ = links.class_list().toggle(OPEN_CLASS);
            }));
        }

        for link in dom::query_all_in(&links, "a") {
            let toggle = toggle.clone();
            let links = links.clone();
            self.listeners.extend(Listener::new(&link, "click", move |_| {
                let _ = toggle.set_attribute("aria-expanded", "false");
                dom::remove_class(&links, OPEN_CLASS);
            }));
        }
    }

    fn stop(&mut self) {
        self.listeners.clear();
    }
}

fn scroll_to(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

/// In-page anchors glide to their section instead of jumping.
#[derive(Default)]
pub struct SmoothScrollEffect {
    listeners: Vec<Listener>,
}

impl Effect for SmoothScrollEffect {
    fn name(&self) -> &'static str {
        "smooth-scroll"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        for link in dom::query_all(&document, ANCHOR_SELECTOR) {
            let document = document.clone();
            let anchor = link.clone();
            self.listeners.extend(Listener::new(&link, "click", move |event| {
                let Some(href) = anchor.get_attribute("href") else {
                    return;
                };
                // A bare "#" is not a valid selector.
                if let Ok(Some(target)) = document.query_selector(&href) {
                    event.prevent_default();
                    scroll_to(&target);
                }
            }));
        }
    }

    fn stop(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_turns_solid_past_forty_pixels() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(40.0));
        assert!(is_scrolled(40.5));
    }

    #[test]
    fn scroll_cue_fades_out() {
        assert_eq!(scroll_cue_opacity(0.0), 1.0);
        assert_eq!(scroll_cue_opacity(100.0), 0.5);
        assert_eq!(scroll_cue_opacity(200.0), 0.0);
        assert_eq!(scroll_cue_opacity(800.0), 0.0);
    }

    #[test]
    fn toggle_flips_aria_expanded() {
        assert!(!toggled_expanded(Some("true")));
        assert!(toggled_expanded(Some("false")));
        assert!(toggled_expanded(None));
    }
}
