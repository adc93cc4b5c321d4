//! Repository layer for persisted store snapshots.
//!
//! # Responsibility
//! - Define the slot storage contract used by the workspace service.
//! - Isolate SQLite and JSON encoding details from store logic.
//!
//! # Invariants
//! - One slot holds the full state of exactly one store.
//! - No write spans more than one slot.

pub mod slot_repo;
