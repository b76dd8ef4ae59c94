#![deny(missing_docs)]
//! Telegram transport for the modrr regulations bot.

/// Telegram-specific handlers, dialogue state and views.
pub mod bot;
/// Telegram transport configuration.
pub mod config;
/// Telegram runtime entrypoint.
pub mod runner;
