//! The fake DAW transport in the hero mockup: a playhead that sweeps the
//! tracks, a progress bar and a running clock.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::{Element, HtmlElement};

use super::dom::{self, Listener};
use super::frame::FrameLoop;
use super::Effect;

pub const TRACK_LENGTH_SECS: f64 = 222.0;
const TRACK_LENGTH_LABEL: &str = "3:42";
const PROGRESS_PER_FRAME: f64 = 0.0004;
const AUTOPLAY_DELAY_MS: u32 = 2000;

const PLAYHEAD_SELECTOR: &str = ".m-playhead";
const BAR_SELECTOR: &str = ".transport-bar";
const PLAY_SELECTOR: &str = "#transport-play";
const TIME_SELECTOR: &str = ".transport-time";

const PLAY_LABEL: &str = "▶";
const PAUSE_LABEL: &str = "⏸";

/// `m:ss`, seconds truncated.
pub fn format_time(secs: f64) -> String {
    let whole = secs.max(0.0).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

pub fn transport_time_html(progress: f64) -> String {
    format!(
        "{} <span class=\"transport-dim\">/ {}</span>",
        format_time(progress * TRACK_LENGTH_SECS),
        TRACK_LENGTH_LABEL
    )
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackState {
    playing: bool,
    progress: f64,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[cfg(test)]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Moves the playhead one frame forward, wrapping at the end of the
    /// track. Returns `None` while paused and leaves the position alone.
    pub fn advance(&mut self) -> Option<f64> {
        if !self.playing {
            return None;
        }
        self.progress += PROGRESS_PER_FRAME;
        if self.progress >= 1.0 {
            self.progress = 0.0;
        }
        Some(self.progress)
    }
}

#[derive(Clone)]
struct TransportView {
    playheads: Vec<HtmlElement>,
    bar: Option<HtmlElement>,
    time: Option<Element>,
    button: Option<HtmlElement>,
}

impl TransportView {
    fn render(&self, progress: f64) {
        let percent = format!("{}%", progress * 100.0);
        for playhead in &self.playheads {
            dom::set_style(playhead, "left", &percent);
        }
        if let Some(bar) = &self.bar {
            dom::set_style(bar, "width", &percent);
        }
        if let Some(time) = &self.time {
            time.set_inner_html(&transport_time_html(progress));
        }
    }

    fn show_playing(&self, playing: bool) {
        if let Some(button) = &self.button {
            let _ = button.class_list().toggle_with_force("playing", playing);
            button.set_text_content(Some(if playing { PAUSE_LABEL } else { PLAY_LABEL }));
        }
    }
}

fn run(state: &Rc<RefCell<PlaybackState>>, view: &TransportView, frames: &FrameLoop) {
    let state = state.clone();
    let view = view.clone();
    frames.start(move |_| {
        let Some(progress) = state.borrow_mut().advance() else {
            return false;
        };
        view.render(progress);
        true
    });
}

#[derive(Default)]
pub struct TransportEffect {
    state: Rc<RefCell<PlaybackState>>,
    frames: FrameLoop,
    click: Option<Listener>,
    autoplay: Option<Timeout>,
}

impl Effect for TransportEffect {
    fn name(&self) -> &'static str {
        "transport"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let view = TransportView {
            playheads: dom::html_elements(dom::query_all(&document, PLAYHEAD_SELECTOR)),
            bar: dom::query_html(&document, BAR_SELECTOR),
            time: dom::query(&document, TIME_SELECTOR),
            button: dom::query_html(&document, PLAY_SELECTOR),
        };
        let Some(button) = view.button.clone() else {
            dom::missing(self.name(), PLAY_SELECTOR);
            return;
        };

        {
            let state = self.state.clone();
            let view = view.clone();
            let frames = self.frames.clone();
            self.click = Listener::new(&button, "click", move |_| {
                let playing = state.borrow_mut().toggle();
                view.show_playing(playing);
                if playing {
                    run(&state, &view, &frames);
                } else {
                    frames.cancel();
                }
            });
        }

        let state = self.state.clone();
        let frames = self.frames.clone();
        self.autoplay = Some(Timeout::new(AUTOPLAY_DELAY_MS, move || {
            if state.borrow().is_playing() {
                return;
            }
            state.borrow_mut().play();
            view.show_playing(true);
            run(&state, &view, &frames);
        }));
    }

    fn stop(&mut self) {
        self.autoplay = None;
        self.click = None;
        self.state.borrow_mut().pause();
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.99), "0:09");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(TRACK_LENGTH_SECS), "3:42");
    }

    #[test]
    fn time_label_shows_track_length() {
        assert_eq!(
            transport_time_html(0.5),
            "1:51 <span class=\"transport-dim\">/ 3:42</span>"
        );
    }

    #[test]
    fn paused_playhead_never_moves() {
        let mut state = PlaybackState::default();
        assert_eq!(state.advance(), None);
        state.play();
        state.advance();
        let before = state.progress();
        state.pause();
        for _ in 0..100 {
            assert_eq!(state.advance(), None);
        }
        assert_eq!(state.progress(), before);
    }

    #[test]
    fn playhead_wraps_to_start() {
        let mut state = PlaybackState::default();
        state.play();
        let mut wrapped = false;
        for _ in 0..3000 {
            if state.advance() == Some(0.0) {
                wrapped = true;
                break;
            }
        }
        assert!(wrapped);
        assert!(state.progress() < 1.0);
    }

    #[test]
    fn toggle_flips_play_state() {
        let mut state = PlaybackState::default();
        assert!(state.toggle());
        assert!(!state.toggle());
        assert!(!state.is_playing());
    }
}
