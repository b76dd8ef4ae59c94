//! Configuration and settings management
//!
//! Loads settings from config files and environment variables and defines
//! the fixed generation parameters sent to the completion API.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the regulations text lives.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegulationsBackend {
    /// Flat JSON document on local disk, survives restarts.
    #[default]
    File,
    /// Process memory only, lost on restart.
    Memory,
}

/// Core settings loaded from environment variables and config files
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoreSettings {
    /// Gemini API key
    pub gemini_api_key: Option<String>,
    /// Gemini model identifier
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    /// Storage backend for the regulations text
    #[serde(default)]
    pub regulations_backend: RegulationsBackend,
    /// Path of the JSON regulations document (file backend)
    #[serde(default = "default_regulations_file")]
    pub regulations_file: PathBuf,
    /// Path of the fixed instruction prefix
    #[serde(default = "default_prompt_file")]
    pub prompt_file: PathBuf,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            regulations_backend: RegulationsBackend::default(),
            regulations_file: default_regulations_file(),
            prompt_file: default_prompt_file(),
        }
    }
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_regulations_file() -> PathBuf {
    PathBuf::from(DEFAULT_REGULATIONS_FILE)
}

fn default_prompt_file() -> PathBuf {
    PathBuf::from(DEFAULT_PROMPT_FILE)
}

/// Build the layered configuration source shared by all settings structs.
///
/// Files under `config/` are optional. Environment variables override them,
/// both with the `APP__` prefix and bare (empty values are treated as unset).
///
/// # Errors
///
/// Returns a `ConfigError` if a present source cannot be parsed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Local overrides, not checked in
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

impl CoreSettings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        let mut settings: Self = build_config()?.try_deserialize()?;

        // The original deployment names the Gemini key plain `API`
        if settings.gemini_api_key.is_none() {
            if let Ok(val) = std::env::var("API") {
                if !val.is_empty() {
                    settings.gemini_api_key = Some(val);
                }
            }
        }

        Ok(settings)
    }
}

/// Default Gemini model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
/// Default regulations document path
pub const DEFAULT_REGULATIONS_FILE: &str = "regulations.json";
/// Default instruction prefix path
pub const DEFAULT_PROMPT_FILE: &str = "prompt.txt";
/// Key under which the single active regulations text is stored
pub const DEFAULT_REGULATIONS_KEY: &str = "default_regulations";

// Generation parameters
/// Sampling temperature
pub const GEMINI_TEMPERATURE: f32 = 1.0;
/// Nucleus sampling cutoff
pub const GEMINI_TOP_P: f32 = 0.95;
/// Top-k sampling cutoff
pub const GEMINI_TOP_K: u32 = 64;
/// Output length cap
pub const GEMINI_MAX_OUTPUT_TOKENS: u32 = 2048;
/// Requested response MIME type
pub const GEMINI_RESPONSE_MIME_TYPE: &str = "text/plain";
/// Harm categories filtered on every request
pub const GEMINI_SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
/// Threshold applied to every harm category
pub const GEMINI_SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Default HTTP timeout for completion requests (seconds)
pub const LLM_HTTP_TIMEOUT_SECS: u64 = 60;

/// Get the completion HTTP timeout from env or default.
///
/// Environment variable: `LLM_HTTP_TIMEOUT_SECS`.
#[must_use]
pub fn get_llm_http_timeout_secs() -> u64 {
    std::env::var("LLM_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LLM_HTTP_TIMEOUT_SECS)
}
