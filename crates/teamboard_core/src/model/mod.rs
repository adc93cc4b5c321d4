//! Domain model for the dashboard containers.
//!
//! # Responsibility
//! - Define the entities held by the user/project/task/case/chat stores.
//! - Keep the persisted JSON shape stable (camelCase, original field names).
//!
//! # Invariants
//! - Entities reference each other only through ids and usernames; nothing
//!   here enforces that the referenced entity exists.
//! - Every entity is cloned on the way out of a store; callers never hold a
//!   reference into another container's storage.

pub mod case;
pub mod message;
pub mod project;
pub mod task;
pub mod user;
