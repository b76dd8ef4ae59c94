use crate::config::{
    CoreSettings, GEMINI_MAX_OUTPUT_TOKENS, GEMINI_RESPONSE_MIME_TYPE, GEMINI_SAFETY_CATEGORIES,
    GEMINI_SAFETY_THRESHOLD, GEMINI_TEMPERATURE, GEMINI_TOP_K, GEMINI_TOP_P,
};
use crate::llm::http_utils::{create_http_client, extract_text_content, send_json_request};
use crate::llm::{CompletionProvider, LlmError};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{json, Value};
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Completion provider backed by Google Gemini `generateContent`
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    model_id: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    #[must_use]
    pub fn new(api_key: String, model_id: String) -> Self {
        Self {
            http_client: create_http_client(),
            api_key,
            model_id,
        }
    }

    /// Create a provider from core settings
    ///
    /// # Errors
    ///
    /// Returns `LlmError::MissingConfig` if no Gemini API key is configured.
    pub fn from_settings(settings: &CoreSettings) -> Result<Self, LlmError> {
        let api_key = settings
            .gemini_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| LlmError::MissingConfig("gemini".to_string()))?;
        Ok(Self::new(api_key, settings.gemini_model.clone()))
    }

    /// Model this provider sends requests to
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Request body for a single-prompt completion with the fixed sampling and
/// safety parameters.
pub(crate) fn request_body(prompt: &str) -> Value {
    let safety_settings: Vec<Value> = GEMINI_SAFETY_CATEGORIES
        .iter()
        .map(|category| json!({"category": category, "threshold": GEMINI_SAFETY_THRESHOLD}))
        .collect();

    json!({
        "contents": [{
            "role": "user",
            "parts": [{"text": prompt}]
        }],
        "generationConfig": {
            "temperature": GEMINI_TEMPERATURE,
            "topP": GEMINI_TOP_P,
            "topK": GEMINI_TOP_K,
            "maxOutputTokens": GEMINI_MAX_OUTPUT_TOKENS,
            "responseMimeType": GEMINI_RESPONSE_MIME_TYPE
        },
        "safetySettings": safety_settings
    })
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{GEMINI_API_BASE}/{}:generateContent?key={}",
            self.model_id, self.api_key
        );

        debug!(
            "Gemini: sending {} chars to {}",
            prompt.chars().count(),
            self.model_id
        );

        let body = request_body(prompt);
        let res_json = send_json_request(&self.http_client, &url, &body).await?;
        extract_text_content(
            &res_json,
            &["candidates", "0", "content", "parts", "0", "text"],
        )
    }
}
