//! Beta waitlist form.
//!
//! There is no signup service yet: with no endpoint configured the submit
//! waits [`MOCK_LATENCY_MS`] and always succeeds. The failure branch is kept
//! so the button states are ready when a real endpoint lands.

use std::collections::BTreeMap;

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use log::warn;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys::{self, Array};
use web_sys::{FormData, HtmlButtonElement, HtmlFormElement};

use super::dom::{self, Listener};
use super::Effect;
use crate::config;

const FORM_SELECTOR: &str = "#signup-form";
const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";
pub const MOCK_LATENCY_MS: u32 = 800;

pub const IDLE_LABEL: &str = "Join the Beta — It's Free →";

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("signup request failed: {0}")]
    Network(String),
    #[error("signup rejected with status {0}")]
    Rejected(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonPhase {
    Idle,
    Submitting,
    Joined,
    Failed,
}

impl ButtonPhase {
    pub fn label(self) -> &'static str {
        match self {
            ButtonPhase::Idle => IDLE_LABEL,
            ButtonPhase::Submitting => "Joining...",
            ButtonPhase::Joined => "✓ You're on the list!",
            ButtonPhase::Failed => "Error — try again",
        }
    }

    /// Empty clears the inline background back to the stylesheet's.
    pub fn background(self) -> &'static str {
        match self {
            ButtonPhase::Joined => "#4ade80",
            ButtonPhase::Failed => "#ef4444",
            ButtonPhase::Idle | ButtonPhase::Submitting => "",
        }
    }

    pub fn disabled(self) -> bool {
        self != ButtonPhase::Idle
    }

    /// How long an outcome stays on the button before it resets.
    pub fn reset_after_ms(self) -> Option<u32> {
        match self {
            ButtonPhase::Joined => Some(3000),
            ButtonPhase::Failed => Some(2500),
            ButtonPhase::Idle | ButtonPhase::Submitting => None,
        }
    }

    pub fn after(result: &Result<(), SignupError>) -> Self {
        match result {
            Ok(()) => ButtonPhase::Joined,
            Err(_) => ButtonPhase::Failed,
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SignupRequest {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl SignupRequest {
    /// Builds the body from `(name, value)` entries. Non-text values (files)
    /// are dropped and a repeated name keeps its last value.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        let fields = entries
            .into_iter()
            .filter_map(|(name, value)| Some((name, value?)))
            .collect();
        Self { fields }
    }

    /// Reads the form the way the browser would submit it, so unchecked
    /// boxes are skipped and selects and textareas are included.
    fn from_form(form: &HtmlFormElement) -> Self {
        let data = match FormData::new_with_form(form) {
            Ok(data) => data,
            Err(e) => {
                warn!("could not read signup form: {:?}", e);
                return Self::default();
            }
        };
        let entries = match js_sys::try_iter(&data) {
            Ok(Some(entries)) => entries,
            _ => return Self::default(),
        };
        Self::from_entries(entries.filter_map(Result::ok).filter_map(|entry| {
            let pair: Array = entry.unchecked_into();
            let name = pair.get(0).as_string()?;
            Some((name, pair.get(1).as_string()))
        }))
    }
}

pub async fn submit_signup(request: &SignupRequest) -> Result<(), SignupError> {
    let Some(url) = config::signup_endpoint() else {
        TimeoutFuture::new(MOCK_LATENCY_MS).await;
        return Ok(());
    };

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| SignupError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| SignupError::Network(e.to_string()))?;

    if response.ok() {
        Ok(())
    } else {
        Err(SignupError::Rejected(response.status()))
    }
}

fn show_phase(button: &HtmlButtonElement, phase: ButtonPhase) {
    button.set_inner_html(&format!("<span>{}</span>", phase.label()));
    dom::set_style(button, "background", phase.background());
    button.set_disabled(phase.disabled());
}

#[derive(Default)]
pub struct SignupEffect {
    submit: Option<Listener>,
}

impl Effect for SignupEffect {
    fn name(&self) -> &'static str {
        "signup"
    }

    fn start(&mut self) {
        let Some(document) = dom::document() else {
            return;
        };
        let Some(form) = dom::query(&document, FORM_SELECTOR)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            dom::missing(self.name(), FORM_SELECTOR);
            return;
        };

        let target = form.clone();
        self.submit = Listener::new(&form, "submit", move |event| {
            event.prevent_default();
            let form = target.clone();
            let Some(button) = form
                .query_selector(SUBMIT_SELECTOR)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            else {
                return;
            };

            let request = SignupRequest::from_form(&form);
            gloo_console::log!("Submitting signup with", request.fields.len(), "fields");
            show_phase(&button, ButtonPhase::Submitting);

            spawn_local(async move {
                let result = submit_signup(&request).await;
                match &result {
                    Ok(()) => form.reset(),
                    Err(e) => warn!("{}", e),
                }
                let phase = ButtonPhase::after(&result);
                show_phase(&button, phase);
                if let Some(delay) = phase.reset_after_ms() {
                    TimeoutFuture::new(delay).await;
                    show_phase(&button, ButtonPhase::Idle);
                }
            });
        });
    }

    fn stop(&mut self) {
        self.submit = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitting_locks_the_button() {
        assert_eq!(ButtonPhase::Submitting.label(), "Joining...");
        assert!(ButtonPhase::Submitting.disabled());
        assert_eq!(ButtonPhase::Submitting.reset_after_ms(), None);
    }

    #[test]
    fn success_turns_green_and_resets_after_three_seconds() {
        let phase = ButtonPhase::after(&Ok(()));
        assert_eq!(phase, ButtonPhase::Joined);
        assert_eq!(phase.background(), "#4ade80");
        assert_eq!(phase.reset_after_ms(), Some(3000));
    }

    #[test]
    fn failure_turns_red_and_resets_sooner() {
        let phase = ButtonPhase::after(&Err(SignupError::Rejected(500)));
        assert_eq!(phase, ButtonPhase::Failed);
        assert_eq!(phase.label(), "Error — try again");
        assert_eq!(phase.background(), "#ef4444");
        assert_eq!(phase.reset_after_ms(), Some(2500));
    }

    #[test]
    fn idle_restores_the_original_button() {
        let phase = ButtonPhase::Idle;
        assert_eq!(phase.label(), IDLE_LABEL);
        assert_eq!(phase.background(), "");
        assert!(!phase.disabled());
    }

    #[test]
    fn request_serializes_fields_flat() {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), "ada@example.com".to_string());
        fields.insert("role".to_string(), "producer".to_string());
        let body = serde_json::to_value(SignupRequest { fields }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "email": "ada@example.com", "role": "producer" })
        );
    }

    #[test]
    fn entries_skip_files_and_keep_last_duplicate() {
        let request = SignupRequest::from_entries(vec![
            ("email".to_string(), Some("ada@example.com".to_string())),
            ("notes".to_string(), Some("first".to_string())),
            ("demo".to_string(), None),
            ("notes".to_string(), Some("mixing vocals".to_string())),
        ]);
        assert_eq!(request.fields.len(), 2);
        assert_eq!(request.fields["notes"], "mixing vocals");
        assert!(!request.fields.contains_key("demo"));
    }

    #[test]
    fn no_entries_sends_an_empty_body() {
        let request = SignupRequest::from_entries(Vec::new());
        assert_eq!(request, SignupRequest::default());
    }

    #[test]
    fn errors_read_well_in_logs() {
        assert_eq!(
            SignupError::Network("offline".into()).to_string(),
            "signup request failed: offline"
        );
        assert_eq!(
            SignupError::Rejected(429).to_string(),
            "signup rejected with status 429"
        );
    }
}
