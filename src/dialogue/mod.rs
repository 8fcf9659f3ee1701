//! Dialogue system — the per-session conversation flow.
//!
//! A conversation moves through stages: greeting, name collection, free-form
//! help, and a guided email/phone sub-dialogue entered on demo requests.
//! Sessions advance independently; the engine interprets every message
//! against its session's current stage.

pub mod machine;
pub mod replies;
pub mod session;
pub mod stage;

pub use machine::DialogueEngine;
pub use session::{HistoryEntry, Session, SessionStore};
pub use stage::Stage;
