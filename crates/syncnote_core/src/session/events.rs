//! Remote event payloads.
//!
//! # Responsibility
//! - Name the three event kinds the gateway broadcasts, in the shape the
//!   reconciler applies them.
//!
//! # Invariants
//! - Each event is an independent unit; no batching and no ordering
//!   guarantee across kinds.

use crate::model::note::{Note, NoteId};
use serde::{Deserialize, Serialize};

/// One remote mutation as delivered by a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteEvent {
    /// A note was created (or re-created under an existing id).
    Created(Note),
    /// An existing note's fields changed.
    Updated(Note),
    /// A note was removed; only the id survives.
    Deleted(NoteId),
}

impl NoteEvent {
    /// Id the event targets, regardless of kind.
    pub fn note_id(&self) -> NoteId {
        match self {
            Self::Created(note) | Self::Updated(note) => note.id,
            Self::Deleted(id) => *id,
        }
    }

    /// Stable label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
            Self::Deleted(_) => "deleted",
        }
    }
}
