//! Explanation panel state machine
//!
//! At most one request is in flight. The in-flight id is tracked apart from
//! what the panel shows: hiding the panel (or ending the session) does not
//! settle the request, so the toggle stays ignored until its answer arrives.
//! An answer for a panel that was hidden meanwhile is discarded.

use super::request::{ExplanationError, ExplanationRequest};
use crate::i18n::{Language, TextKey, translate};

/// What the panel shows once loading finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    /// Text returned by the service (may contain emphasis markup)
    Text(String),
    /// Fixed message standing in for a failed request
    Fallback(TextKey),
}

impl Explanation {
    pub fn display(&self, lang: Language) -> &str {
        match self {
            Explanation::Text(text) => text.as_str(),
            Explanation::Fallback(key) => translate(lang, *key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Hidden,
    Loading {
        request_id: u64,
    },
    Shown(Explanation),
}

/// Result of pressing the explain button
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleAction {
    /// Issue this request and report back with `complete(request_id, ..)`
    Request {
        request_id: u64,
        request: ExplanationRequest,
    },
    /// The panel (and the further-reading trigger with it) was hidden
    Hide,
    /// A request is already in flight
    Ignored,
}

#[derive(Debug, Default)]
pub struct ExplanationPanel {
    state: PanelState,
    in_flight: Option<u64>,
    next_request_id: u64,
}

impl ExplanationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// A request has been issued and not yet answered, visible or not
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The panel is open and waiting for its answer
    pub fn shows_loader(&self) -> bool {
        matches!(self.state, PanelState::Loading { .. })
    }

    pub fn is_visible(&self) -> bool {
        self.state != PanelState::Hidden
    }

    /// Text to display, if the panel has finished loading
    pub fn displayed_text(&self, lang: Language) -> Option<&str> {
        match &self.state {
            PanelState::Shown(explanation) => Some(explanation.display(lang)),
            _ => None,
        }
    }

    /// The further-reading trigger only appears next to a real explanation
    pub fn shows_reading_trigger(&self) -> bool {
        matches!(self.state, PanelState::Shown(Explanation::Text(_)))
    }

    pub fn toggle(&mut self, lang: Language) -> ToggleAction {
        if self.in_flight.is_some() {
            return ToggleAction::Ignored;
        }
        match self.state {
            PanelState::Loading { .. } | PanelState::Shown(_) => {
                self.hide();
                ToggleAction::Hide
            }
            PanelState::Hidden => {
                self.next_request_id += 1;
                let request_id = self.next_request_id;
                self.in_flight = Some(request_id);
                self.state = PanelState::Loading { request_id };
                ToggleAction::Request {
                    request_id,
                    request: ExplanationRequest::for_language(lang),
                }
            }
        }
    }

    /// Deliver the outcome of request `request_id`. Returns false if it was stale.
    ///
    /// A stale answer still settles its request, which re-enables the toggle.
    pub fn complete(&mut self, request_id: u64, result: Result<String, ExplanationError>) -> bool {
        if self.in_flight == Some(request_id) {
            self.in_flight = None;
        }
        match self.state {
            PanelState::Loading { request_id: current } if current == request_id => {}
            _ => {
                log::debug!("Discarding stale explanation response {}", request_id);
                return false;
            }
        }

        let explanation = match result {
            Ok(text) if !text.trim().is_empty() => Explanation::Text(text),
            Ok(_) => Explanation::Fallback(ExplanationError::MissingText.fallback_key()),
            Err(e) => {
                log::error!("Error calling explanation API: {}", e);
                Explanation::Fallback(e.fallback_key())
            }
        };
        self.state = PanelState::Shown(explanation);
        true
    }

    /// Close the panel. A pending request keeps running.
    pub fn hide(&mut self) {
        self.state = PanelState::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_id(action: ToggleAction) -> u64 {
        match action {
            ToggleAction::Request { request_id, .. } => request_id,
            other => panic!("expected a request, got {:?}", other),
        }
    }

    #[test]
    fn test_successful_explanation() {
        let mut panel = ExplanationPanel::new();
        let id = request_id(panel.toggle(Language::En));
        assert!(panel.is_loading());
        assert!(panel.is_visible());
        assert_eq!(panel.displayed_text(Language::En), None);

        assert!(panel.complete(id, Ok("Your brain *fills in* a circle.".into())));
        assert!(!panel.is_loading());
        assert_eq!(
            panel.displayed_text(Language::En),
            Some("Your brain *fills in* a circle.")
        );
        assert!(panel.shows_reading_trigger());
    }

    #[test]
    fn test_transport_error_shows_fallback() {
        let mut panel = ExplanationPanel::new();
        let id = request_id(panel.toggle(Language::PtBr));

        panel.complete(id, Err(ExplanationError::Transport("network down".into())));
        assert_eq!(
            panel.displayed_text(Language::PtBr),
            Some(translate(Language::PtBr, TextKey::ExplanationFailed))
        );
        assert!(!panel.shows_reading_trigger());
    }

    #[test]
    fn test_missing_text_shows_unavailable() {
        let mut panel = ExplanationPanel::new();
        let id = request_id(panel.toggle(Language::En));

        panel.complete(id, Err(ExplanationError::MissingText));
        assert_eq!(
            panel.displayed_text(Language::En),
            Some(translate(Language::En, TextKey::ExplanationUnavailable))
        );
        assert!(!panel.shows_reading_trigger());
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut panel = ExplanationPanel::new();
        let id = request_id(panel.toggle(Language::En));
        assert_eq!(panel.toggle(Language::En), ToggleAction::Ignored);
        assert_eq!(panel.state(), &PanelState::Loading { request_id: id });
    }

    #[test]
    fn test_toggle_hides_and_retries_after_failure() {
        let mut panel = ExplanationPanel::new();
        let id = request_id(panel.toggle(Language::En));
        panel.complete(id, Err(ExplanationError::Http(503)));

        assert_eq!(panel.toggle(Language::En), ToggleAction::Hide);
        assert!(!panel.is_visible());

        let retry = request_id(panel.toggle(Language::En));
        assert_ne!(retry, id);
        assert!(panel.complete(retry, Ok("ok".into())));
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut panel = ExplanationPanel::new();
        let old = request_id(panel.toggle(Language::En));

        // Session ended mid-request: the panel closes but the request is still out
        panel.hide();
        assert!(!panel.is_visible());
        assert!(panel.is_loading());
        assert!(!panel.shows_loader());
        assert_eq!(panel.toggle(Language::En), ToggleAction::Ignored);
        assert!(!panel.is_visible());

        // The late answer settles the request without reopening the panel
        assert!(!panel.complete(old, Ok("late".into())));
        assert!(!panel.is_visible());
        assert!(!panel.is_loading());

        // A new request must not accept the old answer either
        let new = request_id(panel.toggle(Language::En));
        assert_ne!(new, old);
        assert!(!panel.complete(old, Ok("late".into())));
        assert!(panel.is_loading());
        assert!(panel.complete(new, Ok("fresh".into())));
        assert_eq!(panel.displayed_text(Language::En), Some("fresh"));
    }

    #[test]
    fn test_hidden_request_keeps_buttons_locked() {
        use crate::sim::AppPhase;
        use crate::ui::ButtonStates;

        let mut panel = ExplanationPanel::new();
        let id = request_id(panel.toggle(Language::En));
        panel.hide();

        // Restarted session while the first answer is still pending
        let states = ButtonStates::derive(AppPhase::Running, panel.is_loading(), false);
        assert!(!states.explain);
        assert!(!states.further_reading);

        panel.complete(id, Err(ExplanationError::Transport("aborted".into())));
        let states = ButtonStates::derive(AppPhase::Running, panel.is_loading(), false);
        assert!(states.explain);
    }

    #[test]
    fn test_fallback_follows_language() {
        let mut panel = ExplanationPanel::new();
        let id = request_id(panel.toggle(Language::PtBr));
        panel.complete(id, Err(ExplanationError::MissingApiKey));

        assert_eq!(
            panel.displayed_text(Language::En),
            Some(translate(Language::En, TextKey::ExplanationFailed))
        );
    }
}
