//! Task board model.
//!
//! # Invariants
//! - Status transitions are unrestricted; any status may follow any other.
//! - `project_id` is a weak reference and may point at a deleted project.

use crate::model::project::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type TaskId = String;

/// Board column a task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Board columns in display order.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Some(Self::Todo),
            "inprogress" | "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub status: TaskStatus,
    pub project_id: ProjectId,
    /// Username of the creator.
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
}

/// Caller-provided fields for `TaskStore::add_task`.
///
/// Nothing here is validated; blank text must be rejected by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub status: TaskStatus,
    pub project_id: ProjectId,
    pub created_by: String,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<TaskPriority>,
}

impl NewTask {
    /// Required fields only; optional metadata starts unset.
    pub fn new(
        text: impl Into<String>,
        status: TaskStatus,
        project_id: impl Into<ProjectId>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            status,
            project_id: project_id.into(),
            created_by: created_by.into(),
            assigned_to: None,
            due_date: None,
            tags: None,
            priority: None,
        }
    }
}
