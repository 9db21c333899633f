//! The assistant panel in the mockup types out canned mix notes, holds
//! each one, deletes it and moves on to the next.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use super::dom;
use super::Effect;

const MESSAGE_SELECTOR: &str = "#ai-msg";
const START_DELAY_MS: u32 = 1500;
const TYPE_DELAY_MS: u32 = 35;
const DELETE_DELAY_MS: u32 = 15;
const HOLD_TICKS: u32 = 60;
const DELETE_STEP: usize = 2;

pub const MESSAGES: [&str; 8] = [
    "Vocal presence is muddy below 300Hz. Cutting 4dB at 250Hz, boosting 2dB shelf at 8kHz.",
    "Kick and bass are fighting at 80Hz. Side-chaining bass to kick transient.",
    "◈ Memory: You prefer warm vocals with +2dB at 3kHz. Applying your style profile.",
    "Reverb tail on vocals is masking the snare. Reducing decay to 1.2s.",
    "◈ Memory: Similar to \"Late Night Vibes\" (Jan 12). Applying learned compression curve.",
    "Synth pad is wide but hollow. Adding subtle saturation at 2kHz.",
    "◈ Memory: 47 sessions analyzed. Your low-end preference is tight — cutting sub-bass below 35Hz.",
    "Detected genre: Hip-Hop. Cross-referencing with your style profile + genre model.",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    pub text: String,
    pub next_delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    messages: &'static [&'static str],
    message: usize,
    shown: usize,
    held: u32,
    deleting: bool,
}

impl Typewriter {
    pub fn new(messages: &'static [&'static str]) -> Self {
        Self {
            messages,
            message: 0,
            shown: 0,
            held: 0,
            deleting: false,
        }
    }

    fn current(&self) -> &'static str {
        self.messages.get(self.message).copied().unwrap_or("")
    }

    /// Advances one step and returns what the panel should show and how
    /// long to wait before the next step.
    pub fn tick(&mut self) -> Tick {
        let current = self.current();
        let length = current.chars().count();

        if !self.deleting {
            if self.shown < length {
                self.shown += 1;
            } else {
                self.held += 1;
                if self.held >= HOLD_TICKS {
                    self.deleting = true;
                    self.held = 0;
                }
            }
        } else {
            self.shown = self.shown.saturating_sub(DELETE_STEP);
        }

        let text: String = current.chars().take(self.shown).collect();

        if self.deleting && self.shown == 0 {
            self.deleting = false;
            if !self.messages.is_empty() {
                self.message = (self.message + 1) % self.messages.len();
            }
        }

        Tick {
            text,
            next_delay_ms: if self.deleting { DELETE_DELAY_MS } else { TYPE_DELAY_MS },
        }
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(&MESSAGES)
    }
}

#[derive(Default)]
pub struct TypewriterEffect {
    /// Bumped on every start and stop so a sleeping loop from an earlier
    /// run knows to exit.
    generation: Rc<Cell<u64>>,
}

impl Effect for TypewriterEffect {
    fn name(&self) -> &'static str {
        "typewriter"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(panel) = dom::query(&document, MESSAGE_SELECTOR) else {
            dom::missing(self.name(), MESSAGE_SELECTOR);
            return;
        };

        let run = self.generation.get() + 1;
        self.generation.set(run);
        let generation = self.generation.clone();

        spawn_local(async move {
            let mut typewriter = Typewriter::default();
            let mut delay = START_DELAY_MS;
            loop {
                TimeoutFuture::new(delay).await;
                if generation.get() != run {
                    break;
                }
                let tick = typewriter.tick();
                panel.set_text_content(Some(&tick.text));
                delay = tick.next_delay_ms;
            }
        });
    }

    fn stop(&mut self) {
        self.generation.set(self.generation.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SHORT: [&str; 2] = ["ab", "◈x"];

    #[test]
    fn types_one_character_per_tick() {
        let mut tw = Typewriter::new(&SHORT);
        assert_eq!(tw.tick(), Tick { text: "a".into(), next_delay_ms: TYPE_DELAY_MS });
        assert_eq!(tw.tick().text, "ab");
    }

    #[test]
    fn holds_full_message_before_deleting() {
        let mut tw = Typewriter::new(&SHORT);
        tw.tick();
        assert_eq!(tw.tick().text, "ab");
        for _ in 1..HOLD_TICKS {
            assert_eq!(tw.tick(), Tick { text: "ab".into(), next_delay_ms: TYPE_DELAY_MS });
        }
        assert_eq!(tw.tick(), Tick { text: "ab".into(), next_delay_ms: DELETE_DELAY_MS });
        assert_eq!(tw.tick().text, "");
    }

    #[test]
    fn full_text_shows_for_typing_tick_plus_hold() {
        let mut tw = Typewriter::new(&SHORT);
        let mut full = 0;
        for _ in 0..(2 + HOLD_TICKS + 5) {
            if tw.tick().text == "ab" {
                full += 1;
            }
        }
        assert_eq!(full, 1 + HOLD_TICKS);
    }

    #[test]
    fn deletes_two_characters_then_moves_on() {
        let mut tw = Typewriter::new(&SHORT);
        for _ in 0..(2 + HOLD_TICKS) {
            tw.tick();
        }
        let tick = tw.tick();
        assert_eq!(tick.text, "");
        assert_eq!(tick.next_delay_ms, TYPE_DELAY_MS);
        assert_eq!(tw.tick().text, "◈");
    }

    #[test]
    fn slices_on_character_boundaries() {
        let mut tw = Typewriter::new(&SHORT);
        for _ in 0..(2 + HOLD_TICKS + 1) {
            tw.tick();
        }
        assert_eq!(tw.tick().text, "◈");
        assert_eq!(tw.tick().text, "◈x");
    }

    #[test]
    fn cycles_back_to_first_message() {
        let mut tw = Typewriter::default();
        let mut seen: Vec<usize> = Vec::new();
        for _ in 0..20_000 {
            let tick = tw.tick();
            if let Some(i) = MESSAGES.iter().position(|m| *m == tick.text) {
                if seen.last() != Some(&i) {
                    seen.push(i);
                }
            }
        }
        assert_eq!(&seen[..MESSAGES.len() + 1], &[0, 1, 2, 3, 4, 5, 6, 7, 0]);
    }
}
