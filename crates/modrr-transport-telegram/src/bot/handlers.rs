use crate::bot::state::{State, UploadDialogue};
use crate::bot::views::{
    add_to_chat_keyboard, group_chat_permissions, ADD_TO_CHAT_TEXT, ALREADY_UPLOADED_TEXT,
    GREETING_TEXT, REGLAMENT_USAGE_TEXT, REGULATIONS_NOT_FOUND_TEXT, REGULATIONS_PROMPT_TEXT,
    REGULATIONS_SAVED_TEXT, WELCOME_TEXT,
};
use crate::config::BotSettings;
use anyhow::{anyhow, Result};
use modrr_core::config::RegulationsBackend;
use modrr_core::relay::{RegulationsRelay, RelayReply};
use modrr_core::session::UploadDecision;
use std::sync::Arc;
use teloxide::{prelude::*, types::UserId, utils::command::BotCommands};
use tracing::info;

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Поддерживаемые команды:")]
pub enum Command {
    /// Greeting and "add me to a chat" link
    #[command(description = "Начать работу.")]
    Start,
    /// Upload regulations through a follow-up message (private chats)
    #[command(description = "Загрузить регламент.")]
    UploadRegulations,
    /// Set regulations inline
    #[command(description = "Задать регламент: /reglament <текст>.")]
    Reglament(String),
}

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Plain text that is not a command.
#[must_use]
pub fn plain_text(msg: &Message) -> Option<&str> {
    msg.text().filter(|text| !text.starts_with('/'))
}

/// Group or supergroup chat.
#[must_use]
pub fn is_group_chat(msg: &Message) -> bool {
    msg.chat.is_group() || msg.chat.is_supergroup()
}

/// Service message announcing that the bot itself joined the chat.
#[must_use]
pub fn bot_was_added(msg: &Message, bot_id: UserId) -> bool {
    msg.new_chat_members()
        .is_some_and(|members| members.iter().any(|user| user.id == bot_id))
}

/// Start handler
///
/// # Errors
///
/// Returns an error if the greeting cannot be sent.
pub async fn start(bot: Bot, msg: Message, settings: Arc<BotSettings>) -> Result<()> {
    info!(
        "User {} initiated /start in chat {}.",
        get_user_id_safe(&msg),
        msg.chat.id
    );

    bot.send_message(msg.chat.id, GREETING_TEXT).await?;

    let keyboard = add_to_chat_keyboard(settings.telegram.bot_username())?;
    bot.send_message(msg.chat.id, ADD_TO_CHAT_TEXT)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// `/upload_regulations` handler
///
/// # Errors
///
/// Returns an error if the dialogue state or the reply fails.
pub async fn upload_regulations(bot: Bot, msg: Message, dialogue: UploadDialogue) -> Result<()> {
    let user_id = get_user_id_safe(&msg);
    info!(
        "Received /upload_regulations from user {user_id}, chat kind private={}.",
        msg.chat.is_private()
    );

    // Group chats never get a dialogue entry
    if !msg.chat.is_private() {
        info!("/upload_regulations outside a private chat, ignoring.");
        return Ok(());
    }

    let state: State = dialogue
        .get_or_default()
        .await
        .map_err(|e| anyhow!(e.to_string()))?;
    let (decision, next) = state.begin_upload();

    match decision {
        UploadDecision::AlreadySubmitted => {
            bot.send_message(msg.chat.id, ALREADY_UPLOADED_TEXT).await?;
        }
        UploadDecision::Prompt => {
            dialogue
                .update(next)
                .await
                .map_err(|e| anyhow!(e.to_string()))?;
            bot.send_message(msg.chat.id, REGULATIONS_PROMPT_TEXT)
                .await?;
        }
    }

    Ok(())
}

/// Stores the message that follows `/upload_regulations`.
///
/// # Errors
///
/// Returns an error if the regulations cannot be persisted or the reply fails.
pub async fn save_regulations(
    bot: Bot,
    msg: Message,
    relay: Arc<RegulationsRelay>,
    dialogue: UploadDialogue,
) -> Result<()> {
    let Some(text) = plain_text(&msg) else {
        return Ok(());
    };

    relay.store_regulations(text).await?;
    info!(
        "Regulations uploaded by user {} ({} chars).",
        get_user_id_safe(&msg),
        text.chars().count()
    );

    bot.send_message(msg.chat.id, REGULATIONS_SAVED_TEXT).await?;

    let state = dialogue
        .get_or_default()
        .await
        .map_err(|e| anyhow!(e.to_string()))?;
    dialogue
        .update(state.complete())
        .await
        .map_err(|e| anyhow!(e.to_string()))?;

    Ok(())
}

/// `/reglament <text>` handler
///
/// Only the in-memory backend accepts inline regulations; with the file
/// backend the persisted text changes through `/upload_regulations` alone.
///
/// # Errors
///
/// Returns an error if the regulations cannot be stored or the reply fails.
pub async fn reglament(
    bot: Bot,
    msg: Message,
    text: String,
    relay: Arc<RegulationsRelay>,
    settings: Arc<BotSettings>,
) -> Result<()> {
    info!(
        "Received /reglament from user {} in chat {}.",
        get_user_id_safe(&msg),
        msg.chat.id
    );

    if settings.core.regulations_backend != RegulationsBackend::Memory {
        info!("/reglament is disabled for the file backend, ignoring.");
        return Ok(());
    }

    if text.trim().is_empty() {
        bot.send_message(msg.chat.id, REGLAMENT_USAGE_TEXT).await?;
        return Ok(());
    }

    relay.store_regulations(&text).await?;
    bot.send_message(msg.chat.id, REGULATIONS_SAVED_TEXT).await?;
    Ok(())
}

/// Relays a group-chat question to the completion API.
///
/// # Errors
///
/// Returns an error if storage, the prompt file, the completion call or the
/// reply fails. Nothing is retried.
pub async fn handle_message(bot: Bot, msg: Message, relay: Arc<RegulationsRelay>) -> Result<()> {
    if !is_group_chat(&msg) {
        return Ok(());
    }
    let Some(question) = plain_text(&msg) else {
        return Ok(());
    };

    match relay.answer(question).await? {
        RelayReply::NotConfigured => {
            bot.send_message(msg.chat.id, REGULATIONS_NOT_FOUND_TEXT)
                .await?;
        }
        RelayReply::Answer(answer) => {
            bot.send_message(msg.chat.id, answer).await?;
        }
    }

    Ok(())
}

/// Applies the permission bundle and greets the chat the bot was added to.
///
/// # Errors
///
/// Returns an error if either Telegram call fails.
pub async fn add_to_group(bot: Bot, msg: Message) -> Result<()> {
    info!("Bot added to chat {}, applying permissions.", msg.chat.id);

    bot.set_chat_permissions(msg.chat.id, group_chat_permissions())
        .await?;
    bot.send_message(msg.chat.id, WELCOME_TEXT).await?;
    Ok(())
}
