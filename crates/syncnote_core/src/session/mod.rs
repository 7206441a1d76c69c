//! Reconciler session: local state kept consistent with the gateway.
//!
//! # Responsibility
//! - Own the note collection and the edit buffer exclusively.
//! - Apply user intents and remote events with last-write-wins-by-arrival
//!   semantics per id.
//!
//! # Invariants
//! - Views mutate state only through intent methods, never directly.
//! - The three event subscriptions live exactly as long as the session.

pub mod collection;
pub mod events;
pub mod note_session;
