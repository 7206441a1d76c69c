//! Note record and edit-buffer draft.
//!
//! # Responsibility
//! - Define the `Note` shape returned by gateway queries and events.
//! - Define `NoteDraft`, the single in-progress note being composed or
//!   edited.
//!
//! # Invariants
//! - `Note::id` is assigned by the gateway and never reused.
//! - `Note::owner` is assigned by the gateway from the authenticated
//!   identity; clients never set it.
//! - `NoteDraft::id` is `Some` only while editing an already-created note.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Ids are opaque to clients; only the gateway mints them.
pub type NoteId = Uuid;

/// Canonical note record as held by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Gateway-assigned stable id.
    pub id: NoteId,
    /// Short note title.
    pub title: String,
    /// Free-form note body.
    pub description: String,
    /// Gateway-assigned identifier of the creating user.
    pub owner: String,
}

/// The edit buffer: the one note currently being composed or edited.
///
/// Lifecycle:
/// - starts empty (no id, blank fields);
/// - populated wholesale by [`NoteDraft::from_note`] on select-for-edit,
///   discarding any unsaved edits;
/// - reset by [`NoteDraft::clear`] after a successful submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    /// Present only while editing an existing note.
    pub id: Option<NoteId>,
    pub title: String,
    pub description: String,
}

impl NoteDraft {
    /// Returns an empty draft with no target id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies an existing note's fields into the draft verbatim.
    ///
    /// Any in-progress unsaved edits are discarded; select-for-edit
    /// always replaces the whole buffer.
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: Some(note.id),
            title: note.title.clone(),
            description: note.description.clone(),
        }
    }

    /// Resets the draft to `{id: None, title: "", description: ""}`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns whether the draft currently targets an existing note.
    pub fn target_id(&self) -> Option<NoteId> {
        self.id
    }

    /// Returns whether the draft holds no id and no text.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.title.is_empty() && self.description.is_empty()
    }
}
