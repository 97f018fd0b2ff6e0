//! Gemini-backed `ConciergeProvider` over the generative language REST API.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::concierge::prompts::build_chat_prompt;
use crate::concierge::{ChatMessage, ConciergeProvider};
use crate::error::ConciergeError;
use crate::persona::model::PersonaProfile;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Concierge provider backed by Google's Gemini API.
pub struct GeminiConcierge {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
}

impl GeminiConcierge {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl ConciergeProvider for GeminiConcierge {
    async fn generate_reply(
        &self,
        message: &str,
        profile: &PersonaProfile,
        history: &[ChatMessage],
    ) -> Result<String, ConciergeError> {
        let prompt = build_chat_prompt(profile, history, message);
        let url = format!("{API_BASE}/{}:generateContent", self.model);

        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ConciergeError::RequestFailed {
                provider: "gemini".to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ConciergeError::AuthFailed {
                provider: "gemini".to_string(),
            });
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ConciergeError::RequestFailed {
                provider: "gemini".to_string(),
                reason: format!("HTTP {status}: {detail}"),
            });
        }

        let parsed: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| ConciergeError::InvalidResponse {
                    provider: "gemini".to_string(),
                    reason: e.to_string(),
                })?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConciergeError::InvalidResponse {
                provider: "gemini".to_string(),
                reason: "No candidate text in response".to_string(),
            })?;

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
