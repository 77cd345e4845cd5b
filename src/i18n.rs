//! Localized UI strings
//!
//! Every key is defined for every language, so lookups never fail.

use serde::{Deserialize, Serialize};

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::PtBr, Language::En];

    /// Full language tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::PtBr => "pt-BR",
            Language::En => "en",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "pt-br" | "pt" => Some(Language::PtBr),
            "en" | "en-us" | "en-gb" => Some(Language::En),
            _ => None,
        }
    }

    /// Primary subtag for `<html lang>`
    pub fn html_lang(&self) -> &'static str {
        match self {
            Language::PtBr => "pt",
            Language::En => "en",
        }
    }
}

/// Keys of the string table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Title,
    OscillationSpeed,
    Start,
    Stop,
    Continue,
    End,
    ExplainPhenomenon,
    ForNerds,
    ClickToStart,
    AnimationPaused,
    Phase1Description,
    Phase2Description,
    ReviewArticles,
    RecentExperimentalArticles,
    PmcQueries,
    /// Shown when the service answered without usable text
    ExplanationUnavailable,
    /// Shown when the request itself failed
    ExplanationFailed,
    ExplanationSystemPrompt,
    ExplanationQuery,
}

impl TextKey {
    /// Keys that static page elements may reference through `data-i18n`
    pub const LABELS: [TextKey; 15] = [
        TextKey::Title,
        TextKey::OscillationSpeed,
        TextKey::Start,
        TextKey::Stop,
        TextKey::Continue,
        TextKey::End,
        TextKey::ExplainPhenomenon,
        TextKey::ForNerds,
        TextKey::ClickToStart,
        TextKey::AnimationPaused,
        TextKey::Phase1Description,
        TextKey::Phase2Description,
        TextKey::ReviewArticles,
        TextKey::RecentExperimentalArticles,
        TextKey::PmcQueries,
    ];

    /// Name used in `data-i18n` attributes
    pub fn attr_name(&self) -> &'static str {
        match self {
            TextKey::Title => "title",
            TextKey::OscillationSpeed => "oscillationSpeed",
            TextKey::Start => "start",
            TextKey::Stop => "stop",
            TextKey::Continue => "continue",
            TextKey::End => "end",
            TextKey::ExplainPhenomenon => "explainPhenomenon",
            TextKey::ForNerds => "forNerds",
            TextKey::ClickToStart => "clickToStart",
            TextKey::AnimationPaused => "animationPaused",
            TextKey::Phase1Description => "phase1Description",
            TextKey::Phase2Description => "phase2Description",
            TextKey::ReviewArticles => "reviewArticles",
            TextKey::RecentExperimentalArticles => "recentExperimentalArticles",
            TextKey::PmcQueries => "pmcQueries",
            TextKey::ExplanationUnavailable => "explanationUnavailable",
            TextKey::ExplanationFailed => "explanationFailed",
            TextKey::ExplanationSystemPrompt => "explanationSystemPrompt",
            TextKey::ExplanationQuery => "explanationQuery",
        }
    }

    pub fn from_attr(name: &str) -> Option<Self> {
        Self::LABELS.into_iter().find(|key| key.attr_name() == name)
    }
}

/// Look up a string
pub fn translate(lang: Language, key: TextKey) -> &'static str {
    match lang {
        Language::PtBr => pt_br(key),
        Language::En => en(key),
    }
}

fn pt_br(key: TextKey) -> &'static str {
    match key {
        TextKey::Title => "Ilusão de Movimento Circular Interativa",
        TextKey::OscillationSpeed => "Velocidade da Oscilação",
        TextKey::Start => "Iniciar",
        TextKey::Stop => "Parar",
        TextKey::Continue => "Continuar",
        TextKey::End => "Terminar",
        TextKey::ExplainPhenomenon => "✨ Explicar Fenómeno",
        TextKey::ForNerds => "Explicações para Nerds",
        TextKey::ClickToStart => "Clique em 'Iniciar' para começar.",
        TextKey::AnimationPaused => "Animação pausada.",
        TextKey::Phase1Description => "Fase 1: Isto parece uma rotação, mas não é.",
        TextKey::Phase2Description => "Fase 2: Cada ponto move-se apenas em linha reta.",
        TextKey::ReviewArticles => "Artigos de Revisão",
        TextKey::RecentExperimentalArticles => "Artigos Experimentais Recentes",
        TextKey::PmcQueries => "PMC Queries",
        TextKey::ExplanationUnavailable => {
            "Não foi possível obter uma explicação. Tente novamente."
        }
        TextKey::ExplanationFailed => {
            "Ocorreu um erro ao comunicar com a API. Verifique a consola para mais detalhes."
        }
        TextKey::ExplanationSystemPrompt => {
            "Aja como um comunicador de ciência e professor de psicofisiologia e \
             neurofisiologia. As suas explicações devem ser claras, concisas e fascinantes, \
             usando analogias simples para explicar conceitos complexos. Responda em \
             português do Brasil."
        }
        TextKey::ExplanationQuery => {
            "Explique o fenómeno de percepção visual demonstrado nesta animação. Múltiplos \
             pontos brancos estão a mover-se para a frente e para trás em linhas retas \
             (movimento harmónico simples) em diferentes eixos. No entanto, quando vistos em \
             conjunto, nós humanos interpretamos o seu movimento combinado como uma rotação \
             circular. Explique por que esta ilusão de ótica acontece."
        }
    }
}

fn en(key: TextKey) -> &'static str {
    match key {
        TextKey::Title => "Interactive Circular Motion Illusion",
        TextKey::OscillationSpeed => "Oscillation Speed",
        TextKey::Start => "Start",
        TextKey::Stop => "Stop",
        TextKey::Continue => "Continue",
        TextKey::End => "End",
        TextKey::ExplainPhenomenon => "✨ Explain Phenomenon",
        TextKey::ForNerds => "Explanations for Nerds",
        TextKey::ClickToStart => "Click 'Start' to begin.",
        TextKey::AnimationPaused => "Animation paused.",
        TextKey::Phase1Description => "Phase 1: This looks like a rotation, but it's not.",
        TextKey::Phase2Description => "Phase 2: Each dot just moves in a straight line.",
        TextKey::ReviewArticles => "Review Articles",
        TextKey::RecentExperimentalArticles => "Recent Experimental Articles",
        TextKey::PmcQueries => "PMC Queries",
        TextKey::ExplanationUnavailable => "Could not get an explanation. Please try again.",
        TextKey::ExplanationFailed => {
            "An error occurred while contacting the API. Check the console for details."
        }
        TextKey::ExplanationSystemPrompt => {
            "Act as a science communicator and a professor of psychophysiology and \
             neurophysiology. Your explanations should be clear, concise and fascinating, \
             using simple analogies to explain complex concepts. Answer in English."
        }
        TextKey::ExplanationQuery => {
            "Explain the visual perception phenomenon shown in this animation. Several white \
             dots move back and forth along straight lines (simple harmonic motion) on \
             different axes. Yet, seen together, we humans interpret their combined motion \
             as a circular rotation. Explain why this optical illusion happens."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: [TextKey; 19] = [
        TextKey::Title,
        TextKey::OscillationSpeed,
        TextKey::Start,
        TextKey::Stop,
        TextKey::Continue,
        TextKey::End,
        TextKey::ExplainPhenomenon,
        TextKey::ForNerds,
        TextKey::ClickToStart,
        TextKey::AnimationPaused,
        TextKey::Phase1Description,
        TextKey::Phase2Description,
        TextKey::ReviewArticles,
        TextKey::RecentExperimentalArticles,
        TextKey::PmcQueries,
        TextKey::ExplanationUnavailable,
        TextKey::ExplanationFailed,
        TextKey::ExplanationSystemPrompt,
        TextKey::ExplanationQuery,
    ];

    #[test]
    fn test_every_key_translated() {
        for lang in Language::ALL {
            for key in ALL_KEYS {
                assert!(!translate(lang, key).is_empty(), "{:?} missing {:?}", lang, key);
            }
        }
    }

    #[test]
    fn test_phase_descriptions() {
        assert_eq!(
            translate(Language::En, TextKey::Phase1Description),
            "Phase 1: This looks like a rotation, but it's not."
        );
        assert_eq!(
            translate(Language::PtBr, TextKey::AnimationPaused),
            "Animação pausada."
        );
    }

    #[test]
    fn test_attr_names_round_trip() {
        for key in TextKey::LABELS {
            assert_eq!(TextKey::from_attr(key.attr_name()), Some(key));
        }
        assert_eq!(TextKey::from_attr("explanationQuery"), None);
        assert_eq!(TextKey::from_attr("nope"), None);
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("pt-BR"), Some(Language::PtBr));
        assert_eq!(Language::from_tag("EN"), Some(Language::En));
        assert_eq!(Language::from_tag("fr"), None);
        assert_eq!(Language::PtBr.html_lang(), "pt");
        assert_eq!(serde_json::to_string(&Language::PtBr).unwrap(), "\"pt-BR\"");
    }
}
