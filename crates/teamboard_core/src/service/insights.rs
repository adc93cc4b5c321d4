//! Dashboard read models computed across stores.
//!
//! # Invariants
//! - Inputs are borrowed read-only; nothing here mutates a store.
//! - Ranking order is by score descending; ties keep roster order.

use crate::model::case::{Case, CaseStatus};
use crate::model::task::{Task, TaskStatus};
use crate::model::user::User;
use serde::Serialize;

/// Score bonus per finished task created by the user.
pub const DONE_TASK_BONUS: u32 = 20;

/// Headline counters for the dashboard of one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Tasks not yet done (todo + in progress).
    pub active_tasks: usize,
    /// Percentage of done tasks, `0.0` when the project has none.
    pub completion_rate: f64,
    pub total_projects: usize,
    pub total_cases: usize,
    /// Cases not yet closed (open + in progress).
    pub open_cases: usize,
    pub closed_cases: usize,
}

/// Computes dashboard counters. Task counters only consider tasks of
/// `project_id`; with no project selected they are all zero.
pub fn dashboard_stats(
    project_id: Option<&str>,
    tasks: &[Task],
    cases: &[Case],
    total_projects: usize,
) -> DashboardStats {
    let project_tasks: Vec<&Task> = match project_id {
        Some(id) => tasks.iter().filter(|task| task.project_id == id).collect(),
        None => Vec::new(),
    };
    let total_tasks = project_tasks.len();
    let completed_tasks = project_tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Done)
        .count();
    let closed_cases = cases
        .iter()
        .filter(|case| case.status == CaseStatus::Closed)
        .count();

    DashboardStats {
        total_tasks,
        completed_tasks,
        active_tasks: total_tasks - completed_tasks,
        completion_rate: percentage(completed_tasks, total_tasks),
        total_projects,
        total_cases: cases.len(),
        open_cases: cases.len() - closed_cases,
        closed_cases,
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub username: String,
    pub points: u32,
    pub level: u32,
    /// Done tasks whose creator is this user, across all projects.
    pub completed_tasks: usize,
    /// `points + completed_tasks * 20`.
    pub score: u64,
}

/// Builds the leaderboard for the roster.
pub fn rankings(users: &[User], tasks: &[Task]) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = users
        .iter()
        .map(|user| {
            let completed_tasks = tasks
                .iter()
                .filter(|task| task.created_by == user.username && task.status == TaskStatus::Done)
                .count();
            RankingEntry {
                username: user.username.clone(),
                points: user.points,
                level: user.level,
                completed_tasks,
                score: u64::from(user.points)
                    + completed_tasks as u64 * u64::from(DONE_TASK_BONUS),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}
