use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Closure<dyn FnMut(f64)>;

#[derive(Default)]
struct FrameState {
    handle: Option<i32>,
    callback: Option<FrameCallback>,
}

/// A `requestAnimationFrame` loop.
///
/// The step receives the frame timestamp in milliseconds and returns whether
/// another frame should be requested. Clones share the same loop, so a click
/// handler can cancel what the effect started.
#[derive(Clone, Default)]
pub struct FrameLoop {
    state: Rc<RefCell<FrameState>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any running step and requests the first frame.
    ///
    /// Must not be called from inside this loop's own step.
    pub fn start<F>(&self, mut step: F)
    where
        F: FnMut(f64) -> bool + 'static,
    {
        self.cancel();
        let weak: Weak<RefCell<FrameState>> = Rc::downgrade(&self.state);
        let callback = Closure::wrap(Box::new(move |now: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.borrow_mut().handle = None;
            if step(now) {
                request(&state);
            }
        }) as Box<dyn FnMut(f64)>);

        self.state.borrow_mut().callback = Some(callback);
        request(&self.state);
    }

    /// Drops the pending frame, if any. The step stays allocated but will
    /// not run again until `start`.
    pub fn cancel(&self) {
        let handle = self.state.borrow_mut().handle.take();
        if let (Some(handle), Some(window)) = (handle, web_sys::window()) {
            let _ = window.cancel_animation_frame(handle);
        }
    }

    /// Cancels and releases the step closure.
    pub fn clear(&self) {
        self.cancel();
        self.state.borrow_mut().callback = None;
    }
}

fn request(state: &Rc<RefCell<FrameState>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let mut state = state.borrow_mut();
    let Some(callback) = state.callback.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(handle) => state.handle = Some(handle),
        Err(e) => warn!("requestAnimationFrame failed: {:?}", e),
    }
}
