//! Static texts, keyboards and the chat permission bundle.

use anyhow::Result;
use reqwest::Url;
use teloxide::types::{ChatPermissions, InlineKeyboardButton, InlineKeyboardMarkup};

/// Greeting sent on `/start`.
pub const GREETING_TEXT: &str = "Привет! Я умный бот, который может отвечать на ваши вопросы. \n\n\
Я умею:\n\
- Отвечать на вопросы на различные темы.\n\
- Генерировать креативный текст.\n\
- Переводить текст.\n\
- И многое другое!\n\n\
Чтобы задать мне вопрос, просто напишите его в чат.";

/// Text above the "add me to a chat" button.
pub const ADD_TO_CHAT_TEXT: &str = "Хотите добавить меня в свой чат? Нажмите кнопку ниже:";
/// Caption of the "add me to a chat" button.
pub const ADD_TO_CHAT_BUTTON: &str = "Добавить меня в чат";

/// Prompt for the regulations body.
pub const REGULATIONS_PROMPT_TEXT: &str = "Пожалуйста, отправьте текст регламента:";
/// Reply when the user already uploaded regulations.
pub const ALREADY_UPLOADED_TEXT: &str = "Вы уже загрузили регламент.";
/// Confirmation after storing regulations.
pub const REGULATIONS_SAVED_TEXT: &str = "Регламент успешно загружен!";
/// Reply to `/reglament` without text.
pub const REGLAMENT_USAGE_TEXT: &str =
    "Отправьте текст регламента вместе с командой: /reglament <текст>";
/// Reply to a group question when no regulations are stored.
pub const REGULATIONS_NOT_FOUND_TEXT: &str =
    "Регламент не найден. Пожалуйста, обратитесь к организатору.";
/// Welcome sent after the bot joins a chat.
pub const WELCOME_TEXT: &str = "Теперь я в вашем чате! Задавайте мне вопросы, я готов отвечать!";

/// Deep link that opens the "add bot to group" picker.
///
/// # Errors
///
/// Returns an error if `bot_username` produces an invalid URL.
pub fn add_to_chat_url(bot_username: &str) -> Result<Url> {
    Ok(Url::parse(&format!(
        "https://t.me/{bot_username}?startgroup=AddToGroup"
    ))?)
}

/// Inline keyboard with the single "add me to a chat" button.
///
/// # Errors
///
/// Returns an error if the deep link cannot be built.
pub fn add_to_chat_keyboard(bot_username: &str) -> Result<InlineKeyboardMarkup> {
    let url = add_to_chat_url(bot_username)?;
    Ok(InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::url(ADD_TO_CHAT_BUTTON, url),
    ]]))
}

/// Capabilities applied to a chat when the bot is added to it.
///
/// Pinning stays disabled.
#[must_use]
pub fn group_chat_permissions() -> ChatPermissions {
    ChatPermissions::SEND_MESSAGES
        | ChatPermissions::SEND_MEDIA_MESSAGES
        | ChatPermissions::SEND_POLLS
        | ChatPermissions::SEND_OTHER_MESSAGES
        | ChatPermissions::ADD_WEB_PAGE_PREVIEWS
        | ChatPermissions::INVITE_USERS
}
