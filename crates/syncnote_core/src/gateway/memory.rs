//! In-process reference gateway.
//!
//! # Responsibility
//! - Provide a live `NoteGateway` collaborator for the CLI and the test
//!   suite without any network or storage engine.
//! - Reproduce the managed backend's visible contract: id/owner
//!   assignment, arrival-order listing, and event echo to all subscribers
//!   including the mutating client.
//!
//! # Invariants
//! - Construction requires an authenticated session; unauthenticated
//!   calls are unrepresentable.
//! - Listeners whose receiving side is gone are pruned on the next
//!   broadcast of their event kind.

use crate::auth::AuthSession;
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::spi::{NoteGateway, NoteListQuery, NotePage};
use crate::gateway::subscription::Subscription;
use crate::model::note::{Note, NoteId};
use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

struct Listener<T> {
    token: u64,
    sender: Sender<T>,
}

#[derive(Default)]
struct State {
    notes: HashMap<NoteId, Note>,
    order: Vec<NoteId>,
    created: Vec<Listener<Note>>,
    updated: Vec<Listener<Note>>,
    deleted: Vec<Listener<NoteId>>,
}

struct Shared {
    state: Mutex<State>,
    next_listener_token: AtomicU64,
}

/// Listener counts and store size, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryGatewayStatus {
    pub note_count: usize,
    pub created_listeners: usize,
    pub updated_listeners: usize,
    pub deleted_listeners: usize,
}

/// Shared in-memory backend with one client identity per handle.
///
/// Cloning via [`MemoryGateway::attach`] yields a second client on the
/// same backend, which is how tests simulate concurrent editors.
pub struct MemoryGateway {
    shared: Arc<Shared>,
    owner: String,
}

impl MemoryGateway {
    /// Opens a fresh backend for the given authenticated identity.
    pub fn connect(session: &AuthSession) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                next_listener_token: AtomicU64::new(0),
            }),
            owner: session.username().to_string(),
        }
    }

    /// Attaches another client identity to the same backend.
    pub fn attach(&self, session: &AuthSession) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            owner: session.username().to_string(),
        }
    }

    /// Returns current store size and per-kind listener counts.
    pub fn status(&self) -> GatewayResult<MemoryGatewayStatus> {
        let state = self.lock_state()?;
        Ok(MemoryGatewayStatus {
            note_count: state.notes.len(),
            created_listeners: state.created.len(),
            updated_listeners: state.updated.len(),
            deleted_listeners: state.deleted.len(),
        })
    }

    fn lock_state(&self) -> GatewayResult<MutexGuard<'_, State>> {
        self.shared
            .state
            .lock()
            .map_err(|_| GatewayError::Transport("gateway state lock poisoned".to_string()))
    }

    fn subscribe_with<T: 'static>(
        &self,
        select: fn(&mut State) -> &mut Vec<Listener<T>>,
    ) -> GatewayResult<Subscription<T>> {
        let (sender, receiver) = channel();
        let token = self.shared.next_listener_token.fetch_add(1, Ordering::SeqCst);
        {
            let mut state = self.lock_state()?;
            select(&mut *state).push(Listener { token, sender });
        }

        let shared = Arc::clone(&self.shared);
        Ok(Subscription::new(receiver, move || {
            if let Ok(mut state) = shared.state.lock() {
                select(&mut *state).retain(|listener| listener.token != token);
            }
        }))
    }
}

impl NoteGateway for MemoryGateway {
    fn list_notes(&self, query: &NoteListQuery) -> GatewayResult<NotePage> {
        let state = self.lock_state()?;

        let matching: Vec<Note> = state
            .order
            .iter()
            .filter_map(|id| state.notes.get(id))
            .filter(|note| match query.filter.as_deref() {
                Some(filter) => note.title.contains(filter),
                None => true,
            })
            .cloned()
            .collect();

        let offset = match query.cursor.as_deref() {
            Some(cursor) => cursor.parse::<usize>().map_err(|_| GatewayError::Rejected {
                code: "bad_cursor".to_string(),
                message: format!("unparseable cursor `{cursor}`"),
            })?,
            None => 0,
        };

        let remaining = matching.len().saturating_sub(offset);
        let page_size = match query.limit {
            Some(limit) => (limit as usize).min(remaining),
            None => remaining,
        };
        let items: Vec<Note> = matching.iter().skip(offset).take(page_size).cloned().collect();
        let next_cursor = if offset + page_size < matching.len() {
            Some((offset + page_size).to_string())
        } else {
            None
        };

        Ok(NotePage { items, next_cursor })
    }

    fn create_note(&self, title: &str, description: &str) -> GatewayResult<Note> {
        let note = Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            owner: self.owner.clone(),
        };

        let mut state = self.lock_state()?;
        state.notes.insert(note.id, note.clone());
        state.order.push(note.id);
        broadcast(&mut state.created, note.clone());
        debug!(
            "event=note_created module=gateway status=ok id={} owner={}",
            note.id, note.owner
        );
        Ok(note)
    }

    fn update_note(&self, id: NoteId, title: &str, description: &str) -> GatewayResult<Note> {
        let mut state = self.lock_state()?;
        let updated = match state.notes.get_mut(&id) {
            Some(stored) => {
                stored.title = title.to_string();
                stored.description = description.to_string();
                stored.clone()
            }
            None => return Err(GatewayError::NotFound(id)),
        };
        broadcast(&mut state.updated, updated.clone());
        debug!("event=note_updated module=gateway status=ok id={id}");
        Ok(updated)
    }

    fn delete_note(&self, id: NoteId) -> GatewayResult<NoteId> {
        let mut state = self.lock_state()?;
        if state.notes.remove(&id).is_none() {
            return Err(GatewayError::NotFound(id));
        }
        state.order.retain(|stored| *stored != id);
        broadcast(&mut state.deleted, id);
        debug!("event=note_deleted module=gateway status=ok id={id}");
        Ok(id)
    }

    fn subscribe_created(&self) -> GatewayResult<Subscription<Note>> {
        self.subscribe_with(|state| &mut state.created)
    }

    fn subscribe_updated(&self) -> GatewayResult<Subscription<Note>> {
        self.subscribe_with(|state| &mut state.updated)
    }

    fn subscribe_deleted(&self) -> GatewayResult<Subscription<NoteId>> {
        self.subscribe_with(|state| &mut state.deleted)
    }
}

/// Delivers one event to every live listener, pruning dead ones.
fn broadcast<T: Clone>(listeners: &mut Vec<Listener<T>>, event: T) {
    listeners.retain(|listener| listener.sender.send(event.clone()).is_ok());
}
