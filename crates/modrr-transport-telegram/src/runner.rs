use crate::bot;
use crate::bot::handlers::{bot_was_added, get_user_id_safe, is_group_chat, plain_text, Command};
use crate::bot::state::{State, UploadDialogue};
use crate::config::BotSettings;
use modrr_core::llm::providers::GeminiProvider;
use modrr_core::relay::RegulationsRelay;
use modrr_core::storage::{self, RegulationsStore};
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::Me;
use tracing::{error, info, warn};

/// Run the Telegram transport runtime.
pub async fn run_bot(settings: Arc<BotSettings>) {
    let store = init_storage(&settings).await;
    let relay = init_relay(&settings, store);

    let bot = init_bot(&settings);
    let bot_state = init_bot_state();
    let handler = setup_handler();

    info!("Bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![relay, settings, bot_state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn init_storage(settings: &BotSettings) -> Arc<dyn RegulationsStore> {
    match storage::open_store(settings.core.as_ref()).await {
        Ok(store) => {
            info!(
                "Regulations storage initialized ({:?} backend).",
                settings.core.regulations_backend
            );
            store
        }
        Err(e) => {
            error!("Failed to initialize regulations storage: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_relay(settings: &BotSettings, store: Arc<dyn RegulationsStore>) -> Arc<RegulationsRelay> {
    let provider = match GeminiProvider::from_settings(settings.core.as_ref()) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to initialize Gemini provider: {}", e);
            std::process::exit(1);
        }
    };
    info!("Gemini provider initialized (model: {}).", provider.model_id());

    if !settings.core.prompt_file.exists() {
        warn!(
            "Prompt file {} does not exist yet; group questions will fail until it is created.",
            settings.core.prompt_file.display()
        );
    }

    Arc::new(RegulationsRelay::new(
        store,
        Arc::new(provider),
        settings.core.prompt_file.clone(),
    ))
}

fn init_bot(settings: &BotSettings) -> Bot {
    let bot = Bot::new(settings.telegram.telegram_token.clone());
    match settings.telegram.telegram_api_url.as_deref() {
        Some(url) if !url.is_empty() => match reqwest::Url::parse(url) {
            Ok(url) => {
                info!("Using custom Telegram API URL {}.", url);
                bot.set_api_url(url)
            }
            Err(e) => {
                warn!("Ignoring invalid TELEGRAM_API_URL {}: {}", url, e);
                bot
            }
        },
        _ => bot,
    }
}

fn init_bot_state() -> Arc<InMemStorage<State>> {
    InMemStorage::<State>::new()
}

/// Build the dispatch tree.
///
/// Order matters: the join event, then private chats (commands and the
/// awaited regulations text, with dialogue state), then commands in other
/// chats, then group questions. Only private chats get a dialogue entry.
#[must_use]
pub fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .branch(
            dptree::filter(|msg: Message, me: Me| bot_was_added(&msg, me.id))
                .endpoint(handle_add_to_group),
        )
        .branch(
            dptree::filter(|msg: Message| msg.chat.is_private())
                .enter_dialogue::<Message, InMemStorage<State>, State>()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_private_command),
                )
                .branch(
                    dptree::case![State::AwaitingRegulations]
                        .filter(|msg: Message| plain_text(&msg).is_some())
                        .endpoint(handle_regulations_text),
                ),
        )
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_chat_command),
        )
        .branch(
            dptree::filter(|msg: Message| is_group_chat(&msg) && plain_text(&msg).is_some())
                .endpoint(handle_group_text),
        )
}

async fn handle_private_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    relay: Arc<RegulationsRelay>,
    dialogue: UploadDialogue,
    settings: Arc<BotSettings>,
) -> Result<(), teloxide::RequestError> {
    run_command(bot, msg, cmd, relay, settings, Some(dialogue)).await;
    respond(())
}

async fn handle_chat_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    relay: Arc<RegulationsRelay>,
    settings: Arc<BotSettings>,
) -> Result<(), teloxide::RequestError> {
    run_command(bot, msg, cmd, relay, settings, None).await;
    respond(())
}

async fn run_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    relay: Arc<RegulationsRelay>,
    settings: Arc<BotSettings>,
    dialogue: Option<UploadDialogue>,
) {
    let res = match (cmd, dialogue) {
        (Command::Start, _) => bot::handlers::start(bot, msg, settings).await,
        (Command::UploadRegulations, Some(dialogue)) => {
            bot::handlers::upload_regulations(bot, msg, dialogue).await
        }
        (Command::UploadRegulations, None) => {
            info!(
                "/upload_regulations outside a private chat (chat {}), ignoring.",
                msg.chat.id
            );
            Ok(())
        }
        (Command::Reglament(text), _) => {
            bot::handlers::reglament(bot, msg, text, relay, settings).await
        }
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
}

async fn handle_regulations_text(
    bot: Bot,
    msg: Message,
    relay: Arc<RegulationsRelay>,
    dialogue: UploadDialogue,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::save_regulations(bot, msg, relay, dialogue).await {
        error!("Regulations upload error: {}", e);
    }
    respond(())
}

async fn handle_group_text(
    bot: Bot,
    msg: Message,
    relay: Arc<RegulationsRelay>,
) -> Result<(), teloxide::RequestError> {
    let chat_id = msg.chat.id;
    let user_id = get_user_id_safe(&msg);
    if let Err(e) = bot::handlers::handle_message(bot, msg, relay).await {
        error!(
            "Group message handler error (chat {}, user {}): {}",
            chat_id, user_id, e
        );
    }
    respond(())
}

async fn handle_add_to_group(bot: Bot, msg: Message) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::add_to_group(bot, msg).await {
        error!("Add to group handler error: {}", e);
    }
    respond(())
}
