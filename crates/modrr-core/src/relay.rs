//! Question relay between chat and completion API.
//!
//! Looks up the active regulations, prefixes the question with the fixed
//! instructions and forwards the result verbatim. The reply is returned
//! unmodified.

use crate::llm::{CompletionProvider, LlmError};
use crate::prompt::{build_prompt, load_prompt};
use crate::storage::{RegulationsStore, StorageError};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Errors surfaced while relaying a question
#[derive(Debug, Error)]
pub enum RelayError {
    /// Regulations storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Completion API failed
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    /// The instruction prefix could not be read
    #[error("Prompt file {path} unreadable: {source}")]
    Prompt {
        /// Prefix file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Result of relaying one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayReply {
    /// No regulations have been stored yet
    NotConfigured,
    /// Completion text, unmodified
    Answer(String),
}

/// Relay service shared by all chat handlers
pub struct RegulationsRelay {
    store: Arc<dyn RegulationsStore>,
    provider: Arc<dyn CompletionProvider>,
    prompt_file: PathBuf,
}

impl RegulationsRelay {
    /// Create a relay over an injected store and provider
    #[must_use]
    pub fn new(
        store: Arc<dyn RegulationsStore>,
        provider: Arc<dyn CompletionProvider>,
        prompt_file: PathBuf,
    ) -> Self {
        Self {
            store,
            provider,
            prompt_file,
        }
    }

    /// Answer a group-chat question.
    ///
    /// The prefix file is re-read on every call so edits apply without a
    /// restart.
    ///
    /// # Errors
    ///
    /// Returns an error if storage, the prefix file or the completion call fails.
    #[instrument(skip_all, fields(question_len = question.len()))]
    pub async fn answer(&self, question: &str) -> Result<RelayReply, RelayError> {
        let Some(regulations) = self.store.get_regulations().await? else {
            info!("No regulations stored, answering with notice.");
            return Ok(RelayReply::NotConfigured);
        };

        let prefix = load_prompt(&self.prompt_file)
            .await
            .map_err(|source| RelayError::Prompt {
                path: self.prompt_file.clone(),
                source,
            })?;

        let prompt = build_prompt(&prefix, &regulations, question);
        let answer = self.provider.generate_content(&prompt).await?;
        Ok(RelayReply::Answer(answer))
    }

    /// Replace the active regulations text.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the text.
    pub async fn store_regulations(&self, text: &str) -> Result<(), RelayError> {
        self.store.save_regulations(text.to_string()).await?;
        Ok(())
    }

    /// Current regulations text, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn current_regulations(&self) -> Result<Option<String>, RelayError> {
        Ok(self.store.get_regulations().await?)
    }
}
