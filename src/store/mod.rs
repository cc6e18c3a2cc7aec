//! The persistence capability consumed by the engine.
//!
//! The engine only ever talks to the store through scoped transactions:
//! [`MemoryStore::with_transaction`] for read-then-write operations (all
//! effects applied, or none) and [`MemoryStore::with_view`] for reads.
//! A SQL-backed implementation of the same surface belongs to an external
//! collaborator; this crate ships the in-process reference store.

mod memory;

pub use memory::{MemoryStore, Transaction, View};
