//! Workspace services.
//!
//! # Responsibility
//! - Orchestrate stores and slot persistence into use-case level APIs.
//! - Compute cross-store read models for the dashboard and leaderboard.

pub mod insights;
pub mod workspace;
