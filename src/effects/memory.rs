use web_sys::HtmlElement;

use super::dom;
use super::sensor::{RevealOnce, SensorOptions};
use super::Effect;

const PROFILE_SELECTOR: &str = ".mem-profile";
const FILL_SELECTOR: &str = ".mp-fill";
const WIDTH_PROPERTY: &str = "--w";
/// `data-target-w`
const STASH_KEY: &str = "targetW";
const COLLAPSED: &str = "0%";
const PROFILE_SENSOR: SensorOptions = SensorOptions::new(0.3);

/// Width to remember for a bar. A bar that was already collapsed by an
/// earlier run keeps the width it stashed then.
pub fn stash_width(stashed: Option<String>, current: String) -> String {
    stashed.unwrap_or(current)
}

/// Style-profile bars grow from zero when the panel scrolls in.
#[derive(Default)]
pub struct MemoryProfileEffect {
    sensor: Option<RevealOnce>,
}

impl Effect for MemoryProfileEffect {
    fn name(&self) -> &'static str {
        "memory-profile"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(profile) = dom::query(&document, PROFILE_SELECTOR) else {
            dom::missing(self.name(), PROFILE_SELECTOR);
            return;
        };

        let fills: Vec<HtmlElement> = dom::html_elements(dom::query_all_in(&profile, FILL_SELECTOR));
        for fill in &fills {
            let dataset = fill.dataset();
            let width = stash_width(dataset.get(STASH_KEY), dom::style_value(fill, WIDTH_PROPERTY));
            let _ = dataset.set(STASH_KEY, &width);
            dom::set_style(fill, WIDTH_PROPERTY, COLLAPSED);
        }

        self.sensor = RevealOnce::watching(PROFILE_SENSOR, &[profile], move |_| {
            for fill in &fills {
                if let Some(width) = fill.dataset().get(STASH_KEY) {
                    dom::set_style(fill, WIDTH_PROPERTY, &width);
                }
            }
        });
    }

    fn stop(&mut self) {
        self.sensor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_stashes_declared_width() {
        assert_eq!(stash_width(None, "72%".into()), "72%");
    }

    #[test]
    fn restart_keeps_original_width() {
        assert_eq!(stash_width(Some("72%".into()), "0%".into()), "72%");
    }
}
