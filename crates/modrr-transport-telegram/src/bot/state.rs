use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

pub use modrr_core::session::UploadState as State;

/// Dialogue carrying the upload state, keyed by private chat (= user) id.
pub type UploadDialogue = Dialogue<State, InMemStorage<State>>;
