//! Note reconciler session.
//!
//! # Responsibility
//! - Reconcile the local collection and edit buffer with the gateway
//!   under three input sources: initial load, user intents, and remote
//!   events.
//! - Route submit intents to create-vs-update and surface stale-state
//!   explicitly.
//!
//! # Invariants
//! - The collection is mutated only by `replace_all` on (re)load and by
//!   remote event application; submits and deletes are never applied
//!   optimistically.
//! - A gateway `NotFound` on update/delete is surfaced as `StaleNote`
//!   and never clears the draft.
//! - Remote events for locally-unknown ids are an expected race: debug
//!   log, no-op.

use crate::gateway::error::GatewayError;
use crate::gateway::spi::{NoteGateway, NoteListQuery};
use crate::gateway::subscription::Subscription;
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::session::collection::Collection;
use crate::session::events::NoteEvent;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Session-level failure surfaced to the view.
#[derive(Debug)]
pub enum SessionError {
    /// Remote call failed for a transport or service reason.
    Gateway(GatewayError),
    /// A locally-known id no longer exists at the gateway; the caller
    /// should refresh and retry.
    StaleNote(NoteId),
    /// Intent referenced an id the local collection does not hold.
    UnknownNote(NoteId),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gateway(err) => write!(f, "{err}"),
            Self::StaleNote(id) => {
                write!(f, "note {id} no longer exists remotely; refresh to re-sync")
            }
            Self::UnknownNote(id) => write!(f, "note not in local collection: {id}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GatewayError> for SessionError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

/// How a submit intent was routed, with the gateway's authoritative echo.
///
/// The returned note is informational; the collection itself changes only
/// when the matching subscription event is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Note),
    Updated(Note),
}

struct RemoteStreams {
    created: Subscription<Note>,
    updated: Subscription<Note>,
    deleted: Subscription<NoteId>,
}

/// Reconciler over a gateway: owns the collection and the edit buffer.
pub struct NoteSession<G: NoteGateway> {
    gateway: G,
    collection: Collection,
    draft: NoteDraft,
    streams: RemoteStreams,
}

impl<G: NoteGateway> NoteSession<G> {
    /// Acquires the three event subscriptions, then loads the first page
    /// of the collection.
    ///
    /// Subscription handles release themselves on drop, so a failing load
    /// cannot leak listeners.
    pub fn start(gateway: G) -> SessionResult<Self> {
        let streams = RemoteStreams {
            created: gateway.subscribe_created()?,
            updated: gateway.subscribe_updated()?,
            deleted: gateway.subscribe_deleted()?,
        };

        let mut session = Self {
            gateway,
            collection: Collection::new(),
            draft: NoteDraft::new(),
            streams,
        };
        session.refresh()?;
        info!(
            "event=session_start module=session status=ok notes={}",
            session.collection.len()
        );
        Ok(session)
    }

    /// Re-fetches the first page and replaces the collection entirely.
    ///
    /// Also the documented recovery after a `StaleNote` error.
    pub fn refresh(&mut self) -> SessionResult<()> {
        let page = self.gateway.list_notes(&NoteListQuery::default())?;
        if let Some(cursor) = page.next_cursor.as_deref() {
            // First page only; further pages are not consumed.
            debug!("event=list_truncated module=session status=ignored next_cursor={cursor}");
        }
        self.collection.replace_all(page.items);
        Ok(())
    }

    /// Input-change intent: replaces the draft title.
    pub fn edit_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    /// Input-change intent: replaces the draft description.
    pub fn edit_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    /// Copies a collection entry into the edit buffer, discarding any
    /// unsaved edits.
    pub fn select_for_edit(&mut self, id: NoteId) -> SessionResult<()> {
        match self.collection.get(id) {
            Some(note) => {
                self.draft = NoteDraft::from_note(note);
                Ok(())
            }
            None => Err(SessionError::UnknownNote(id)),
        }
    }

    /// Submits the edit buffer: update when its id is present and still
    /// locally known, create otherwise.
    ///
    /// On success the draft resets to empty. The collection is not
    /// touched here; the echoed subscription event is the authoritative
    /// mutation and lands on the next [`poll_remote`](Self::poll_remote).
    pub fn submit(&mut self) -> SessionResult<SubmitOutcome> {
        let outcome = match self.draft.target_id() {
            Some(id) if self.collection.contains(id) => {
                let note = self
                    .gateway
                    .update_note(id, &self.draft.title, &self.draft.description)
                    .map_err(|err| stale_on_not_found(err, id))?;
                SubmitOutcome::Updated(note)
            }
            _ => {
                let note = self
                    .gateway
                    .create_note(&self.draft.title, &self.draft.description)?;
                SubmitOutcome::Created(note)
            }
        };

        self.draft.clear();
        Ok(outcome)
    }

    /// Deletes a note by id through the gateway.
    ///
    /// No optimistic removal; the Deleted event performs the local
    /// mutation.
    pub fn delete(&mut self, id: NoteId) -> SessionResult<NoteId> {
        self.gateway
            .delete_note(id)
            .map_err(|err| stale_on_not_found(err, id))
    }

    /// Drains all three subscriptions and applies every pending event.
    ///
    /// Returns the number of events applied. Streams are drained one
    /// kind at a time; no cross-kind ordering is assumed, matching the
    /// gateway's delivery contract.
    pub fn poll_remote(&mut self) -> usize {
        let mut events = Vec::new();
        events.extend(self.streams.created.drain().into_iter().map(NoteEvent::Created));
        events.extend(self.streams.updated.drain().into_iter().map(NoteEvent::Updated));
        events.extend(self.streams.deleted.drain().into_iter().map(NoteEvent::Deleted));

        let applied = events.len();
        for event in events {
            self.apply_remote(event);
        }
        applied
    }

    /// Applies one remote event to the collection.
    pub fn apply_remote(&mut self, event: NoteEvent) {
        debug!(
            "event=remote_apply module=session kind={} id={}",
            event.kind(),
            event.note_id()
        );
        match event {
            NoteEvent::Created(note) => {
                self.collection.upsert(note);
            }
            NoteEvent::Updated(note) => {
                let id = note.id;
                if !self.collection.amend(note) {
                    // Expected race: the entry never arrived or was
                    // already deleted locally.
                    debug!("event=remote_update_ignored module=session status=noop id={id}");
                }
            }
            NoteEvent::Deleted(id) => {
                if self.collection.remove(id).is_none() {
                    debug!("event=remote_delete_ignored module=session status=noop id={id}");
                }
            }
        }
    }

    /// Notes in arrival order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.collection.iter()
    }

    /// Read-only view of the edit buffer.
    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn note_count(&self) -> usize {
        self.collection.len()
    }
}

impl<G: NoteGateway> Drop for NoteSession<G> {
    fn drop(&mut self) {
        // Subscription handles cancel themselves; this line only records
        // the lifecycle boundary.
        debug!("event=session_stop module=session status=ok");
    }
}

fn stale_on_not_found(err: GatewayError, id: NoteId) -> SessionError {
    match err {
        GatewayError::NotFound(_) => {
            warn!("event=stale_note module=session status=stale id={id}");
            SessionError::StaleNote(id)
        }
        other => SessionError::Gateway(other),
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteSession, SessionError};
    use crate::auth::AuthSession;
    use crate::gateway::memory::MemoryGateway;
    use crate::session::events::NoteEvent;
    use uuid::Uuid;

    fn started_session() -> NoteSession<MemoryGateway> {
        let gateway = MemoryGateway::connect(&AuthSession::new("ada"));
        NoteSession::start(gateway).expect("session should start against empty backend")
    }

    #[test]
    fn edit_intents_touch_only_the_draft() {
        let mut session = started_session();
        session.edit_title("a title");
        session.edit_description("a body");

        assert_eq!(session.draft().title, "a title");
        assert_eq!(session.draft().description, "a body");
        assert_eq!(session.note_count(), 0);
    }

    #[test]
    fn select_for_edit_of_unknown_id_is_surfaced() {
        let mut session = started_session();
        let ghost = Uuid::new_v4();
        let err = session
            .select_for_edit(ghost)
            .expect_err("unknown id must be surfaced");
        assert!(matches!(err, SessionError::UnknownNote(id) if id == ghost));
    }

    #[test]
    fn update_for_absent_id_is_ignored_then_delete_for_present_id_lands() {
        let mut session = started_session();
        let present = crate::model::note::Note {
            id: Uuid::new_v4(),
            title: "A".to_string(),
            description: "x".to_string(),
            owner: "ada".to_string(),
        };
        session.apply_remote(NoteEvent::Created(present.clone()));

        let mut absent = present.clone();
        absent.id = Uuid::new_v4();
        session.apply_remote(NoteEvent::Updated(absent));
        assert_eq!(session.note_count(), 1);

        session.apply_remote(NoteEvent::Deleted(present.id));
        assert_eq!(session.note_count(), 0);
    }
}
