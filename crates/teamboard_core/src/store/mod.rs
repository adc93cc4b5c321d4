//! In-memory state containers.
//!
//! # Responsibility
//! - Own one entity collection per store and its mutation operations.
//! - Expose read-only derivations (filtered projections) over that data.
//! - Convert to and from the JSON snapshot persisted per store.
//!
//! # Invariants
//! - Store operations never fail. Missing preconditions (no active user,
//!   unknown id) are silent no-ops; id-addressed mutations report whether
//!   anything matched.
//! - Derivations never mutate and keep insertion order.
//! - Stores never reach into each other; deletes do not cascade.

pub mod case_store;
pub mod chat_store;
pub mod project_store;
pub mod seed;
pub mod task_store;
pub mod user_store;

/// Persisted slot key for `UserStore`.
pub const USER_SLOT: &str = "user-storage";
/// Persisted slot key for `ProjectStore`.
pub const PROJECT_SLOT: &str = "project-storage";
/// Persisted slot key for `TaskStore`.
pub const TASK_SLOT: &str = "task-storage";
/// Persisted slot key for `CaseStore`.
pub const CASE_SLOT: &str = "case-storage";
/// Persisted slot key for `ChatStore`.
pub const CHAT_SLOT: &str = "chat-storage";
