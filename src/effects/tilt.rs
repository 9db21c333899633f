use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use super::dom::{self, Listener};
use super::Effect;
use crate::config;

const MOCKUP_SELECTOR: &str = "#mockup";
const HERO_SELECTOR: &str = "#hero-mockup";
pub const REST_TRANSFORM: &str = "rotateY(-3deg) rotateX(1deg)";

/// Maps a pointer coordinate into `[-0.5, 0.5]` across a box.
pub fn normalized(pointer: f64, origin: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    (pointer - origin) / extent - 0.5
}

pub fn tilt_transform(x: f64, y: f64) -> String {
    format!("rotateY({}deg) rotateX({}deg)", x * 8.0, -y * 5.0)
}

fn is_desktop() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(config::DESKTOP_MEDIA_QUERY).ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Tilts the product mockup toward the pointer.
#[derive(Default)]
pub struct TiltEffect {
    listeners: Vec<Listener>,
}

impl Effect for TiltEffect {
    fn name(&self) -> &'static str {
        "tilt"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let (Some(mockup), Some(hero)) = (
            dom::query_html(&document, MOCKUP_SELECTOR),
            dom::query_html(&document, HERO_SELECTOR),
        ) else {
            dom::missing(self.name(), HERO_SELECTOR);
            return;
        };
        if !is_desktop() {
            return;
        }

        let on_move = {
            let mockup = mockup.clone();
            let hero = hero.clone();
            move |event: web_sys::Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = hero.get_bounding_client_rect();
                let x = normalized(event.client_x() as f64, rect.left(), rect.width());
                let y = normalized(event.client_y() as f64, rect.top(), rect.height());
                dom::set_style(&mockup, "transform", &tilt_transform(x, y));
            }
        };
        let on_leave = move |_: web_sys::Event| dom::set_style(&mockup, "transform", REST_TRANSFORM);

        self.listeners.extend(Listener::new(&hero, "mousemove", on_move));
        self.listeners.extend(Listener::new(&hero, "mouseleave", on_leave));
    }

    fn stop(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_flat() {
        assert_eq!(tilt_transform(0.0, 0.0), "rotateY(0deg) rotateX(-0deg)");
    }

    #[test]
    fn corners_reach_full_tilt() {
        let x = normalized(300.0, 100.0, 200.0);
        let y = normalized(50.0, 50.0, 100.0);
        assert_eq!(x, 0.5);
        assert_eq!(y, -0.5);
        assert_eq!(tilt_transform(x, y), "rotateY(4deg) rotateX(2.5deg)");
    }

    #[test]
    fn empty_box_does_not_divide_by_zero() {
        assert_eq!(normalized(10.0, 0.0, 0.0), 0.0);
    }
}
