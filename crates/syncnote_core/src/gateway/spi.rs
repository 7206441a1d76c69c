//! Gateway service-provider interface.
//!
//! # Responsibility
//! - Define the contract between the reconciler session and whatever
//!   managed backend executes queries, mutations and event fan-out.
//!
//! # Invariants
//! - Mutations return the authoritative record as stored by the gateway.
//! - Every successful mutation is broadcast to all subscribers of the
//!   matching event kind, including the mutating client.
//! - Subscriptions stay live until the handle is cancelled or dropped.

use crate::gateway::error::GatewayResult;
use crate::gateway::subscription::Subscription;
use crate::model::note::{Note, NoteId};

/// Query options for the note list operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListQuery {
    /// Optional title substring filter.
    pub filter: Option<String>,
    /// Maximum items per page. `None` returns everything.
    pub limit: Option<u32>,
    /// Opaque continuation token from a previous page.
    pub cursor: Option<String>,
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePage {
    /// Notes in gateway arrival order.
    pub items: Vec<Note>,
    /// Continuation token when more items remain.
    pub next_cursor: Option<String>,
}

/// Contract implemented by the remote data gateway.
///
/// The session is generic over this trait; production deployments plug in
/// a managed-service adapter, tests and the CLI use
/// [`MemoryGateway`](crate::gateway::memory::MemoryGateway).
pub trait NoteGateway {
    /// Fetches one page of the note collection.
    fn list_notes(&self, query: &NoteListQuery) -> GatewayResult<NotePage>;
    /// Creates a note; the gateway assigns id and owner.
    fn create_note(&self, title: &str, description: &str) -> GatewayResult<Note>;
    /// Replaces title and description of an existing note.
    fn update_note(&self, id: NoteId, title: &str, description: &str) -> GatewayResult<Note>;
    /// Deletes a note by id, returning the deleted id.
    fn delete_note(&self, id: NoteId) -> GatewayResult<NoteId>;
    /// Opens the stream of Created events.
    fn subscribe_created(&self) -> GatewayResult<Subscription<Note>>;
    /// Opens the stream of Updated events.
    fn subscribe_updated(&self) -> GatewayResult<Subscription<Note>>;
    /// Opens the stream of Deleted events.
    fn subscribe_deleted(&self) -> GatewayResult<Subscription<NoteId>>;
}
