//! Core client logic for syncnote.
//!
//! This crate reconciles a local note collection and edit buffer with a
//! remote data gateway through query, mutation, and subscription calls.
//! Durability, query execution, authentication, and event fan-out belong
//! to the gateway; this crate is the single source of truth for local
//! state consistency.

pub mod auth;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod session;

pub use auth::{AuthError, AuthRequest, AuthSession, Authenticator, StaticAuthenticator};
pub use gateway::error::{GatewayError, GatewayResult};
pub use gateway::memory::{MemoryGateway, MemoryGatewayStatus};
pub use gateway::spi::{NoteGateway, NoteListQuery, NotePage};
pub use gateway::subscription::Subscription;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteDraft, NoteId};
pub use session::collection::Collection;
pub use session::events::NoteEvent;
pub use session::note_session::{NoteSession, SessionError, SessionResult, SubmitOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
