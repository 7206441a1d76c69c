//! Remote data gateway SPI and reference implementation.
//!
//! # Responsibility
//! - Define the query/mutation/subscription contract the reconciler talks
//!   to (`NoteGateway`).
//! - Provide `MemoryGateway`, an in-process reference backend used by the
//!   CLI and the test suite.
//!
//! # Invariants
//! - Durability, query execution and event fan-out belong to the gateway,
//!   never to the session.
//! - Every mutation is echoed to all subscribers, including the caller's
//!   own subscriptions.

pub mod error;
pub mod memory;
pub mod spi;
pub mod subscription;
