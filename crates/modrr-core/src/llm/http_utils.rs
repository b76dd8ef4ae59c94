//! HTTP utilities for LLM providers

use crate::config::get_llm_http_timeout_secs;
use crate::llm::LlmError;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::time::Duration;

/// Creates an HTTP client configured with the standard LLM timeout.
///
/// Uses `LLM_HTTP_TIMEOUT_SECS` environment variable or the 60s default.
#[must_use]
pub fn create_http_client() -> HttpClient {
    let timeout = Duration::from_secs(get_llm_http_timeout_secs());
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| HttpClient::new())
}

/// Sends an HTTP POST request with JSON body and returns parsed JSON response.
///
/// # Errors
///
/// Returns `LlmError::NetworkError` on connectivity issues, `LlmError::ApiError` on non-success status codes,
/// or `LlmError::JsonError` if parsing fails.
pub async fn send_json_request(
    client: &HttpClient,
    url: &str,
    body: &Value,
) -> Result<Value, LlmError> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        // reqwest errors embed the URL, which carries the API key
        .map_err(|e| LlmError::NetworkError(e.without_url().to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(LlmError::ApiError(format_api_error(status.as_u16(), &error_text)));
    }

    response
        .json()
        .await
        .map_err(|e| LlmError::JsonError(e.without_url().to_string()))
}

fn format_api_error(status: u16, error_text: &str) -> String {
    let trimmed = error_text.trim_start();
    let is_html = trimmed.starts_with("<!DOCTYPE")
        || trimmed.starts_with("<html")
        || trimmed.starts_with("<HTML");

    if is_html {
        return format!("{status} (Server returned HTML error page)");
    }

    if error_text.chars().count() > 500 {
        let truncated: String = error_text.chars().take(500).collect();
        format!("{status} - {truncated}... (truncated)")
    } else {
        format!("{status} - {error_text}")
    }
}

/// Extracts text content from a JSON response by navigating a path.
///
/// Numeric segments index into arrays, others are object keys.
///
/// # Errors
///
/// Returns `LlmError::ApiError` if the path is invalid or the target is not a string.
pub fn extract_text_content(response: &Value, path: &[&str]) -> Result<String, LlmError> {
    let mut current = response;

    for segment in path {
        if let Ok(index) = segment.parse::<usize>() {
            current = current.get(index).ok_or_else(|| {
                LlmError::ApiError(format!("Invalid path: missing index {index}"))
            })?;
        } else {
            current = current.get(*segment).ok_or_else(|| {
                LlmError::ApiError(format!("Invalid path: missing key {segment}"))
            })?;
        }
    }

    current
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| LlmError::ApiError(format!("Expected string at path, got: {current:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_nested_text() {
        let response = json!({
            "candidates": [{"content": {"parts": [{"text": "hello"}]}}]
        });
        let text = extract_text_content(
            &response,
            &["candidates", "0", "content", "parts", "0", "text"],
        );
        assert_eq!(text.ok(), Some("hello".to_string()));
    }

    #[test]
    fn test_extract_missing_candidates() {
        // Blocked prompts come back with promptFeedback and no candidates
        let response = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = extract_text_content(&response, &["candidates", "0"]);
        assert!(matches!(err, Err(LlmError::ApiError(msg)) if msg.contains("candidates")));
    }

    #[test]
    fn test_format_api_error_hides_html() {
        let msg = format_api_error(502, "<html><body>Bad gateway</body></html>");
        assert_eq!(msg, "502 (Server returned HTML error page)");
    }

    #[test]
    fn test_format_api_error_truncates() {
        let long = "x".repeat(800);
        let msg = format_api_error(400, &long);
        assert!(msg.ends_with("... (truncated)"));
        assert!(msg.len() < 600);
    }
}
