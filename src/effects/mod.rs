//! Page effects and the registry that owns their lifecycle.
//!
//! Every visual behavior on the landing page is an [`Effect`]. The page
//! builds one [`EffectRegistry`] when it mounts, starts it, and stops it
//! again when the route changes, so no frame loop, timer or observer
//! outlives the markup it drives.

use log::{debug, info};

pub mod counter;
pub mod demo;
pub mod dom;
pub mod frame;
pub mod memory;
pub mod mixer;
pub mod nav;
pub mod reveal;
pub mod sensor;
pub mod signup;
pub mod spectrum;
pub mod tilt;
pub mod timeline;
pub mod transport;
pub mod typewriter;
pub mod waveform;

pub trait Effect {
    fn name(&self) -> &'static str;

    /// Looks up the elements it needs and begins animating. Missing
    /// elements make the effect a silent no-op.
    fn start(&mut self);

    /// Cancels pending frames, timers, listeners and observers.
    fn stop(&mut self);
}

#[derive(Default)]
pub struct EffectRegistry {
    effects: Vec<Box<dyn Effect>>,
    running: bool,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every effect the landing page runs, in start order.
    pub fn landing() -> Self {
        Self::new()
            .with(waveform::WaveformEffect::default())
            .with(tilt::TiltEffect::default())
            .with(transport::TransportEffect::default())
            .with(mixer::SoloEffect::default())
            .with(typewriter::TypewriterEffect::default())
            .with(spectrum::SpectrumEffect::default())
            .with(mixer::MeterJitterEffect::default())
            .with(spectrum::FeatureSpectrumEffect::default())
            .with(demo::DemoSliderEffect::default())
            .with(timeline::TimelineEffect::default())
            .with(reveal::ScrollRevealEffect::default())
            .with(counter::CounterEffect::default())
            .with(nav::NavScrollEffect::default())
            .with(nav::MobileMenuEffect::default())
            .with(nav::SmoothScrollEffect::default())
            .with(signup::SignupEffect::default())
            .with(memory::MemoryProfileEffect::default())
    }

    pub fn with(mut self, effect: impl Effect + 'static) -> Self {
        self.register(effect);
        self
    }

    pub fn register(&mut self, effect: impl Effect + 'static) {
        self.effects.push(Box::new(effect));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start_all(&mut self) {
        if self.running {
            return;
        }
        info!("Starting {} page effects", self.effects.len());
        for effect in self.effects.iter_mut() {
            debug!("starting effect {}", effect.name());
            effect.start();
        }
        self.running = true;
    }

    /// Stops in reverse start order.
    pub fn stop_all(&mut self) {
        if !self.running {
            return;
        }
        info!("Stopping {} page effects", self.effects.len());
        for effect in self.effects.iter_mut().rev() {
            debug!("stopping effect {}", effect.name());
            effect.stop();
        }
        self.running = false;
    }
}

impl Drop for EffectRegistry {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recording {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Effect for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn start(&mut self) {
            self.log.borrow_mut().push(format!("start {}", self.name));
        }

        fn stop(&mut self) {
            self.log.borrow_mut().push(format!("stop {}", self.name));
        }
    }

    fn registry(log: &Rc<RefCell<Vec<String>>>) -> EffectRegistry {
        EffectRegistry::new()
            .with(Recording { name: "a", log: log.clone() })
            .with(Recording { name: "b", log: log.clone() })
    }

    #[test]
    fn starts_in_order_and_stops_in_reverse() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut effects = registry(&log);
        effects.start_all();
        effects.stop_all();
        assert_eq!(*log.borrow(), vec!["start a", "start b", "stop b", "stop a"]);
    }

    #[test]
    fn repeated_start_and_stop_are_ignored() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut effects = registry(&log);
        effects.stop_all();
        effects.start_all();
        effects.start_all();
        assert!(effects.is_running());
        effects.stop_all();
        effects.stop_all();
        assert_eq!(log.borrow().len(), 4);
    }

    #[test]
    fn dropping_a_running_registry_stops_everything() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut effects = registry(&log);
            effects.start_all();
        }
        assert_eq!(log.borrow().last().map(String::as_str), Some("stop a"));
    }

    #[test]
    fn landing_registers_every_page_effect() {
        let effects = EffectRegistry::landing();
        assert_eq!(effects.len(), 17);
        assert!(!effects.is_running());
    }
}
