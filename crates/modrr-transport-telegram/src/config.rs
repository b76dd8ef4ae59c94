//! Telegram transport settings.

use config::ConfigError;
use modrr_core::config::CoreSettings;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default public username used in the "add me to a chat" link.
pub const DEFAULT_BOT_USERNAME: &str = "modrr_bot";

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramSettings {
    /// Telegram Bot API token.
    #[serde(default)]
    pub telegram_token: String,
    /// Bot username for the `startgroup` deep link.
    pub bot_username: Option<String>,
    /// Alternative Bot API server, e.g. a local mock.
    pub telegram_api_url: Option<String>,
}

/// Combined settings used by the Telegram transport layer.
#[derive(Clone)]
pub struct BotSettings {
    /// Core settings shared across transport handlers.
    pub core: Arc<CoreSettings>,
    /// Telegram-specific settings.
    pub telegram: Arc<TelegramSettings>,
}

impl BotSettings {
    /// Create a new combined settings bundle.
    #[must_use]
    pub fn new(core: CoreSettings, telegram: TelegramSettings) -> Self {
        Self {
            core: Arc::new(core),
            telegram: Arc::new(telegram),
        }
    }
}

impl TelegramSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails or no token is configured.
    pub fn new() -> Result<Self, ConfigError> {
        let mut settings: Self = modrr_core::config::build_config()?.try_deserialize()?;

        // The original deployment names the token `BOT_API`
        if settings.telegram_token.is_empty() {
            if let Ok(val) = std::env::var("BOT_API") {
                settings.telegram_token = val;
            }
        }

        if settings.telegram_token.is_empty() {
            return Err(ConfigError::NotFound("telegram_token".to_string()));
        }

        Ok(settings)
    }

    /// Username used in deep links, without a leading `@`.
    #[must_use]
    pub fn bot_username(&self) -> &str {
        self.bot_username
            .as_deref()
            .map(|name| name.trim_start_matches('@'))
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_BOT_USERNAME)
    }
}
