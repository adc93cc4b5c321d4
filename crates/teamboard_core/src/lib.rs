//! Core domain logic for the Teamboard dashboard.
//! Stores, their persistence and the workspace use-cases live here.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod mention;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use clock::{Clock, IdGenerator, ManualClock, SystemClock};
pub use config::WorkspaceConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use mention::{extract_mentions, segment_mentions, TextSegment};
pub use model::case::{
    Case, CaseId, CasePatch, CasePatchError, CasePriority, CaseStatus, CaseUpdate, NewCase,
    NewCaseUpdate,
};
pub use model::message::{Message, MessageAttachment, MessageId, NewMessage};
pub use model::project::{NewProject, Project, ProjectId};
pub use model::task::{NewTask, Task, TaskId, TaskPriority, TaskStatus};
pub use model::user::{level_for_points, Achievement, User, UserId, UserRole};
pub use repo::slot_repo::{
    load_snapshot, save_snapshot, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use service::insights::{dashboard_stats, rankings, DashboardStats, RankingEntry};
pub use service::workspace::{Workspace, WorkspaceError, WorkspaceResult};
pub use store::case_store::{CaseSnapshot, CaseStore};
pub use store::chat_store::{ChatSnapshot, ChatStore};
pub use store::project_store::{ProjectSnapshot, ProjectStore};
pub use store::task_store::{TaskSnapshot, TaskStore};
pub use store::user_store::{UserSnapshot, UserStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
