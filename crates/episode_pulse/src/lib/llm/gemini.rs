use reqwest::Client;
use serde::Deserialize;

use crate::{Analyzer, Error, RawAnalysis};

/// Thin client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Gemini API quota exceeded")]
    QuotaExceeded,
    #[error("No content in response")]
    NoContent,
}

impl From<GeminiError> for Error {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::QuotaExceeded => Error::QuotaExceeded,
            other => Error::AnalysisFailed(other.to_string()),
        }
    }
}

impl GeminiClient {
    const ANALYSIS_PROMPT: &str = include_str!("./prompts/analysis_0.txt");

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_generate_request(
        &self,
        model_name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let model_name: String = model_name.into();
        let prompt: String = prompt.into();

        let body = serde_json::json!({
            "contents": [
                {
                    "parts": [{ "text": prompt }]
                }
            ]
        });

        let resp = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, model_name
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            if is_quota_error(status, &message) {
                return Err(GeminiError::QuotaExceeded);
            }
            return Err(GeminiError::Api { status, message });
        }

        Ok(resp.json::<GenerateContentResponse>().await?)
    }
}

/// Quota exhaustion arrives either as HTTP 429 or as a `RESOURCE_EXHAUSTED`
/// status in the error payload.
fn is_quota_error(status: u16, body: &str) -> bool {
    status == 429 || body.contains("RESOURCE_EXHAUSTED")
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<Part>>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, if any.
    pub fn text(&self) -> Option<String> {
        let parts = self
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl Analyzer for GeminiClient {
    const ANALYZER_MODEL: &'static str = "gemini-2.5-flash";

    #[tracing::instrument(skip_all)]
    async fn analyze(&self, transcript: &str) -> Result<RawAnalysis, Error> {
        let prompt = format!(
            "{}\nTranscript:\n{}",
            Self::ANALYSIS_PROMPT.trim_end(),
            transcript
        );

        let response = self
            .send_generate_request(Self::ANALYZER_MODEL, prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to analyze transcript"))?;

        let text = response.text().ok_or(GeminiError::NoContent)?;
        tracing::info!(chars = text.len(), "Received analysis from Gemini");

        Ok(RawAnalysis { text })
    }
}
