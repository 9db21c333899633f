use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::dom::{self, Listener};
use super::frame::FrameLoop;
use super::sensor::{SensorOptions, VisibilitySensor};
use super::Effect;

const CANVAS_SELECTOR: &str = "#waveform-bg";
const STROKE: &str = "#e8a44a";
const LINE_WIDTH: f64 = 1.2;
pub const WAVES: usize = 4;
const SAMPLE_STEP: usize = 4;
const TIME_STEP: f64 = 0.005;
const MAX_PIXEL_RATIO: f64 = 2.0;

pub fn wave_alpha(wave: usize) -> f64 {
    0.12 - wave as f64 * 0.025
}

/// Vertical position of `wave` at horizontal pixel `x`, time `t`, on a
/// canvas `height` CSS pixels tall.
pub fn wave_y(x: f64, wave: usize, t: f64, height: f64) -> f64 {
    let w = wave as f64;
    let carrier = (x * (0.003 + w * 0.0008) + t + w * 0.7).sin();
    let envelope = (x * 0.001 + t * 0.25).sin();
    height / 2.0 + carrier * (height * 0.12 + w * 15.0) * envelope
}

pub fn pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

struct WaveCanvas {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    t: f64,
}

impl WaveCanvas {
    fn resize(&mut self) {
        let dpr = pixel_ratio(web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0));
        self.width = self.canvas.client_width() as f64;
        self.height = self.canvas.client_height() as f64;
        self.canvas.set_width((self.width * dpr) as u32);
        self.canvas.set_height((self.height * dpr) as u32);
        // Resizing resets the transform, so this never compounds.
        if let Err(e) = self.context.scale(dpr, dpr) {
            warn!("waveform: failed to scale canvas: {:?}", e);
        }
    }

    fn draw(&mut self) {
        let ctx = &self.context;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);
        ctx.set_stroke_style_str(STROKE);
        ctx.set_line_width(LINE_WIDTH);
        for wave in 0..WAVES {
            ctx.set_global_alpha(wave_alpha(wave));
            ctx.begin_path();
            let mut x = 0usize;
            while (x as f64) < self.width {
                let y = wave_y(x as f64, wave, self.t, self.height);
                if x == 0 {
                    ctx.move_to(0.0, y);
                } else {
                    ctx.line_to(x as f64, y);
                }
                x += SAMPLE_STEP;
            }
            ctx.stroke();
        }
        self.t += TIME_STEP;
    }
}

/// Animated background lines behind the hero. Only draws while the canvas
/// is on screen.
#[derive(Default)]
pub struct WaveformEffect {
    frames: FrameLoop,
    sensor: Option<VisibilitySensor>,
    resize: Option<Listener>,
}

impl Effect for WaveformEffect {
    fn name(&self) -> &'static str {
        "waveform"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(canvas) = dom::query(&document, CANVAS_SELECTOR)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            dom::missing(self.name(), CANVAS_SELECTOR);
            return;
        };
        let context = match canvas.get_context("2d") {
            Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => return,
            },
            _ => {
                warn!("waveform: 2d context unavailable");
                return;
            }
        };

        let surface = Rc::new(RefCell::new(WaveCanvas {
            canvas: canvas.clone(),
            context,
            width: 0.0,
            height: 0.0,
            t: 0.0,
        }));

        if let Some(window) = web_sys::window() {
            let surface = surface.clone();
            self.resize = Listener::new(&window, "resize", move |_| {
                surface.borrow_mut().resize();
            });
        }

        let frames = self.frames.clone();
        let sensor = VisibilitySensor::new(SensorOptions::default(), move |_, visible, _| {
            if visible {
                surface.borrow_mut().resize();
                let surface = surface.clone();
                frames.start(move |_| {
                    surface.borrow_mut().draw();
                    true
                });
            } else {
                frames.cancel();
            }
        });
        match sensor {
            Ok(sensor) => {
                sensor.watch(&canvas);
                self.sensor = Some(sensor);
            }
            Err(e) => warn!("waveform: IntersectionObserver unavailable: {:?}", e),
        }
    }

    fn stop(&mut self) {
        self.sensor = None;
        self.resize = None;
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_when_envelope_is_zero() {
        for wave in 0..WAVES {
            assert!((wave_y(0.0, wave, 0.0, 400.0) - 200.0).abs() < 1e-9);
        }
    }

    #[test]
    fn amplitude_stays_within_band() {
        let height = 300.0;
        for wave in 0..WAVES {
            let band = height * 0.12 + wave as f64 * 15.0;
            for step in 0..500 {
                let x = step as f64 * 4.0;
                let y = wave_y(x, wave, 3.7, height);
                assert!((y - height / 2.0).abs() <= band + 1e-9);
            }
        }
    }

    #[test]
    fn back_waves_are_fainter() {
        assert!((wave_alpha(0) - 0.12).abs() < 1e-12);
        assert!(wave_alpha(3) < wave_alpha(0));
        assert!(wave_alpha(WAVES - 1) > 0.0);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(pixel_ratio(3.0), 2.0);
        assert_eq!(pixel_ratio(1.5), 1.5);
        assert_eq!(pixel_ratio(0.0), 1.0);
    }
}
