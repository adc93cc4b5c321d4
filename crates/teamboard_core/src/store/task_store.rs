//! Task board container.

use crate::clock::IdGenerator;
use crate::model::task::{NewTask, Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Persisted shape of `TaskStore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug)]
pub struct TaskStore {
    ids: Arc<IdGenerator>,
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(ids: Arc<IdGenerator>) -> Self {
        Self::from_snapshot(ids, TaskSnapshot::default())
    }

    pub fn from_snapshot(ids: Arc<IdGenerator>, snapshot: TaskSnapshot) -> Self {
        Self {
            ids,
            tasks: snapshot.tasks,
        }
    }

    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            tasks: self.tasks.clone(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Appends a task with a synthetic id and creation timestamp.
    pub fn add_task(&mut self, new_task: NewTask) -> Task {
        let task = Task {
            id: self.ids.next_id("task"),
            text: new_task.text,
            status: new_task.status,
            project_id: new_task.project_id,
            created_by: new_task.created_by,
            assigned_to: new_task.assigned_to,
            created_at: self.ids.now(),
            due_date: new_task.due_date,
            tags: new_task.tags,
            priority: new_task.priority,
        };
        self.tasks.push(task.clone());
        task
    }

    /// Sets the status of the matching task. Any transition is allowed.
    pub fn move_task(&mut self, task_id: &str, status: TaskStatus) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == task_id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        }
    }

    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != task_id);
        self.tasks.len() != before
    }

    pub fn tasks_by_project(&self, project_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect()
    }

    pub fn tasks_by_status(&self, project_id: &str, status: TaskStatus) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id == project_id && task.status == status)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::clock::{IdGenerator, ManualClock};
    use crate::model::task::{NewTask, TaskStatus};
    use std::sync::Arc;

    fn store() -> TaskStore {
        TaskStore::new(Arc::new(IdGenerator::new(Arc::new(ManualClock::at_epoch_ms(
            1_729_000_000_000,
        )))))
    }

    #[test]
    fn add_task_assigns_id_and_timestamp() {
        let mut store = store();
        let task = store.add_task(NewTask::new("write docs", TaskStatus::Todo, "p1", "ana"));
        assert_eq!(task.id, "task_1729000000000");
        assert_eq!(task.created_at.timestamp_millis(), 1_729_000_000_000);
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn move_task_is_idempotent() {
        let mut store = store();
        let task = store.add_task(NewTask::new("ship", TaskStatus::Done, "p1", "ana"));
        assert!(store.move_task(&task.id, TaskStatus::Done));
        assert_eq!(store.get(&task.id), Some(&task));
    }

    #[test]
    fn move_task_allows_any_transition() {
        let mut store = store();
        let task = store.add_task(NewTask::new("ship", TaskStatus::Done, "p1", "ana"));
        assert!(store.move_task(&task.id, TaskStatus::Todo));
        assert_eq!(store.get(&task.id).unwrap().status, TaskStatus::Todo);
        assert!(!store.move_task("missing", TaskStatus::Done));
    }

    #[test]
    fn derivations_filter_without_reordering() {
        let mut store = store();
        let a = store.add_task(NewTask::new("a", TaskStatus::Todo, "p1", "ana"));
        store.add_task(NewTask::new("b", TaskStatus::Todo, "p2", "ana"));
        let c = store.add_task(NewTask::new("c", TaskStatus::Done, "p1", "ana"));
        let d = store.add_task(NewTask::new("d", TaskStatus::Todo, "p1", "ana"));

        let before = store.snapshot();
        let by_project: Vec<_> = store.tasks_by_project("p1").into_iter().map(|t| t.id).collect();
        assert_eq!(by_project, vec![a.id.clone(), c.id, d.id.clone()]);

        let todo: Vec<_> = store
            .tasks_by_status("p1", TaskStatus::Todo)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(todo, vec![a.id, d.id]);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn delete_task_reports_match() {
        let mut store = store();
        let task = store.add_task(NewTask::new("a", TaskStatus::Todo, "p1", "ana"));
        assert!(store.delete_task(&task.id));
        assert!(!store.delete_task(&task.id));
    }
}
