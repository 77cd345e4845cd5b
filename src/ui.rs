//! Control enablement and page element ids

use crate::sim::AppPhase;

/// DOM element ids the web host looks up
pub mod ids {
    pub const CANVAS: &str = "animacaoCanvas";
    pub const DESCRIPTION: &str = "descricaoFase";
    pub const SPEED_SLIDER: &str = "velocidadeSlider";

    pub const START: &str = "btnIniciar";
    pub const STOP: &str = "btnParar";
    pub const CONTINUE: &str = "btnContinuar";
    pub const END: &str = "btnTerminar";
    pub const EXPLAIN: &str = "btnExplicar";
    pub const FURTHER_READING: &str = "btnPesquisarNerds";

    pub const LANG_PT: &str = "lang-pt";
    pub const LANG_EN: &str = "lang-en";

    pub const EXPLANATION_CONTAINER: &str = "gemini-response-container";
    pub const EXPLANATION_LOADER: &str = "gemini-loader";
    pub const EXPLANATION_TEXT: &str = "gemini-response-text";
    pub const READING_TRIGGER: &str = "nerds-button-container";
    pub const READING_CONTAINER: &str = "nerd-response-container";
    pub const READING_LOADER: &str = "nerd-loader";
    pub const READING_CONTENT: &str = "nerd-content";
}

/// Which buttons accept clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStates {
    pub start: bool,
    pub stop: bool,
    pub resume: bool,
    pub end: bool,
    pub explain: bool,
    pub further_reading: bool,
}

impl ButtonStates {
    pub fn derive(app_phase: AppPhase, explain_loading: bool, reading_loading: bool) -> Self {
        let any_loading = explain_loading || reading_loading;
        Self {
            start: app_phase == AppPhase::Idle,
            stop: app_phase == AppPhase::Running,
            resume: app_phase == AppPhase::Paused,
            end: app_phase != AppPhase::Idle,
            explain: app_phase != AppPhase::Idle && !any_loading,
            further_reading: !any_loading,
        }
    }

    /// (element id, enabled) for every button
    pub fn by_id(&self) -> [(&'static str, bool); 6] {
        [
            (ids::START, self.start),
            (ids::STOP, self.stop),
            (ids::CONTINUE, self.resume),
            (ids::END, self.end),
            (ids::EXPLAIN, self.explain),
            (ids::FURTHER_READING, self.further_reading),
        ]
    }
}
