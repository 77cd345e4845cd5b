//! Text-generation request and response shapes

use serde::{Deserialize, Serialize};

use crate::i18n::{Language, TextKey, translate};

/// Endpoint for the generateContent call (the key is appended as a query parameter)
pub const API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

/// Errors that can occur while fetching an explanation
#[derive(thiserror::Error, Debug)]
pub enum ExplanationError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("HTTP error! status: {0}")]
    Http(u16),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no text")]
    MissingText,
}

impl ExplanationError {
    /// Message shown in place of the explanation
    pub fn fallback_key(&self) -> TextKey {
        match self {
            ExplanationError::MissingText => TextKey::ExplanationUnavailable,
            _ => TextKey::ExplanationFailed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

/// Body of a generateContent call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
}

impl ExplanationRequest {
    /// The fixed instruction/query pair, worded for `lang`
    pub fn for_language(lang: Language) -> Self {
        Self {
            system_instruction: Content::text(translate(lang, TextKey::ExplanationSystemPrompt)),
            contents: vec![Content::text(translate(lang, TextKey::ExplanationQuery))],
        }
    }

    pub fn to_json(&self) -> Result<String, ExplanationError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Pull `candidates[0].content.parts[0].text` out of a response body
pub fn extract_text(body: &str) -> Result<String, ExplanationError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(ExplanationError::MissingText)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = ExplanationRequest::for_language(Language::En);
        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();

        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            translate(Language::En, TextKey::ExplanationSystemPrompt)
        );
        assert_eq!(
            value["contents"][0]["parts"][0]["text"],
            translate(Language::En, TextKey::ExplanationQuery)
        );
        assert_eq!(value["contents"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_extract_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"It is **apparent** motion."}],"role":"model"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "It is **apparent** motion.");
    }

    #[test]
    fn test_extract_text_missing() {
        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#,
        ] {
            assert!(
                matches!(extract_text(body), Err(ExplanationError::MissingText)),
                "body {} should have no text",
                body
            );
        }
    }

    #[test]
    fn test_extract_text_malformed() {
        let err = extract_text("<html>502</html>").unwrap_err();
        assert!(matches!(err, ExplanationError::Decode(_)));
        assert_eq!(err.fallback_key(), TextKey::ExplanationFailed);
    }

    #[test]
    fn test_fallback_keys() {
        assert_eq!(
            ExplanationError::MissingText.fallback_key(),
            TextKey::ExplanationUnavailable
        );
        assert_eq!(
            ExplanationError::Http(500).fallback_key(),
            TextKey::ExplanationFailed
        );
        assert_eq!(ExplanationError::Http(429).to_string(), "HTTP error! status: 429");
    }
}
