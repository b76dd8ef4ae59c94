/// Command and message handlers
pub mod handlers;
/// Upload dialogue state
pub mod state;
/// Static texts, keyboards and chat permissions
pub mod views;
