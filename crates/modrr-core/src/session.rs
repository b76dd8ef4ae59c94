//! Per-user regulations upload state machine.
//!
//! `Idle -> AwaitingRegulations -> Submitted`. `Submitted` is terminal for
//! the lifetime of the process.

use serde::{Deserialize, Serialize};

/// Upload progress for one user
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadState {
    /// No upload in progress
    #[default]
    Idle,
    /// Prompted for the regulations text, waiting for the next message
    AwaitingRegulations,
    /// Regulations already submitted by this user
    Submitted,
}

/// Outcome of an upload request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadDecision {
    /// Prompt for the text and wait for it
    Prompt,
    /// The user already uploaded regulations
    AlreadySubmitted,
}

impl UploadState {
    /// Decide how to answer an upload request and the state to move to.
    ///
    /// A repeated request while already waiting prompts again.
    #[must_use]
    pub const fn begin_upload(self) -> (UploadDecision, Self) {
        match self {
            Self::Submitted => (UploadDecision::AlreadySubmitted, Self::Submitted),
            Self::Idle | Self::AwaitingRegulations => {
                (UploadDecision::Prompt, Self::AwaitingRegulations)
            }
        }
    }

    /// State after the awaited text has been stored.
    #[must_use]
    pub const fn complete(self) -> Self {
        match self {
            Self::AwaitingRegulations | Self::Submitted => Self::Submitted,
            Self::Idle => Self::Idle,
        }
    }

    /// Whether the next text message is the regulations body
    #[must_use]
    pub const fn is_awaiting(self) -> bool {
        matches!(self, Self::AwaitingRegulations)
    }
}
