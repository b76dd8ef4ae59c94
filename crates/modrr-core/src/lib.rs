#![deny(missing_docs)]
//! modrr core library.
//!
//! Regulations storage, prompt building, the Gemini completion provider and
//! the relay service shared by the Telegram transport.

/// Configuration management.
pub mod config;
/// LLM providers.
pub mod llm;
/// Prompt prefix loading and prompt assembly.
pub mod prompt;
/// Question relay between chat and completion API.
pub mod relay;
/// Per-user regulations upload state machine.
pub mod session;
/// Regulations storage (JSON file or in-memory).
pub mod storage;

#[cfg(test)]
pub mod testing;
