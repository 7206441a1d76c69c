//! Note domain model shared by the gateway SPI and the reconciler session.
//!
//! # Responsibility
//! - Define the canonical note record and the edit-buffer draft.
//! - Keep identity semantics explicit: ids exist only after the gateway
//!   assigns them.
//!
//! # Invariants
//! - Every persisted note is identified by a stable `NoteId`.
//! - A draft has no id until its first successful create round-trip.

pub mod note;
