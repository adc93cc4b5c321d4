//! Project list and current-selection container.
//!
//! # Invariants
//! - At most one project is current, and it is always a listed project.
//! - Creating a project selects it.

use crate::clock::IdGenerator;
use crate::model::project::{NewProject, Project, ProjectId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Persisted shape of `ProjectStore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub current_project_id: Option<ProjectId>,
}

#[derive(Debug)]
pub struct ProjectStore {
    ids: Arc<IdGenerator>,
    projects: Vec<Project>,
    current: Option<ProjectId>,
}

impl ProjectStore {
    pub fn new(ids: Arc<IdGenerator>) -> Self {
        Self {
            ids,
            projects: Vec::new(),
            current: None,
        }
    }

    /// Restores a snapshot; a current id that names no listed project is dropped.
    pub fn from_snapshot(ids: Arc<IdGenerator>, snapshot: ProjectSnapshot) -> Self {
        let current = snapshot
            .current_project_id
            .filter(|id| snapshot.projects.iter().any(|project| &project.id == id));
        Self {
            ids,
            projects: snapshot.projects,
            current,
        }
    }

    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            projects: self.projects.clone(),
            current_project_id: self.current.clone(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == project_id)
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current.as_deref().and_then(|id| self.get(id))
    }

    /// Appends a project and makes it the current one.
    pub fn add_project(&mut self, new_project: NewProject) -> Project {
        let project = Project {
            id: self.ids.next_id("proj"),
            name: new_project.name,
            description: new_project.description,
            color: new_project.color,
            created_at: self.ids.now(),
            created_by: new_project.created_by,
        };
        self.current = Some(project.id.clone());
        self.projects.push(project.clone());
        project
    }

    /// Selects the project with `project_id`, or clears the selection when
    /// no project matches.
    pub fn set_current_project(&mut self, project_id: &str) -> Option<&Project> {
        self.current = self.get(project_id).map(|project| project.id.clone());
        self.current_project()
    }

    /// Removes a project. When it was current, the first remaining project
    /// becomes current (or none when the list is empty).
    pub fn delete_project(&mut self, project_id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|project| project.id != project_id);
        let removed = self.projects.len() != before;

        if self.current.as_deref() == Some(project_id) {
            self.current = self.projects.first().map(|project| project.id.clone());
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectStore;
    use crate::clock::{IdGenerator, ManualClock};
    use crate::model::project::NewProject;
    use std::sync::Arc;

    fn store() -> ProjectStore {
        let ids = Arc::new(IdGenerator::new(Arc::new(ManualClock::at_epoch_ms(10))));
        ProjectStore::new(ids)
    }

    fn new_project(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: None,
            color: "#667eea".to_string(),
            created_by: "admin".to_string(),
        }
    }

    #[test]
    fn add_project_selects_it() {
        let mut store = store();
        let first = store.add_project(new_project("Web"));
        assert_eq!(store.current_project().map(|p| p.id.as_str()), Some(first.id.as_str()));
        let second = store.add_project(new_project("Marketing"));
        assert_eq!(store.current_project().map(|p| p.id.as_str()), Some(second.id.as_str()));
    }

    #[test]
    fn unknown_id_clears_selection() {
        let mut store = store();
        store.add_project(new_project("Web"));
        assert!(store.set_current_project("missing").is_none());
        assert!(store.current_project().is_none());
    }

    #[test]
    fn deleting_current_falls_back_to_first_remaining() {
        let mut store = store();
        let first = store.add_project(new_project("Web"));
        let second = store.add_project(new_project("Marketing"));
        store.set_current_project(&first.id);

        assert!(store.delete_project(&first.id));
        assert_eq!(store.current_project().map(|p| p.id.clone()), Some(second.id.clone()));

        assert!(store.delete_project(&second.id));
        assert!(store.current_project().is_none());
        assert!(store.projects().is_empty());
    }

    #[test]
    fn deleting_other_project_keeps_selection() {
        let mut store = store();
        let first = store.add_project(new_project("Web"));
        let second = store.add_project(new_project("Marketing"));

        assert!(store.delete_project(&first.id));
        assert_eq!(store.current_project().map(|p| p.id.clone()), Some(second.id));
        assert!(!store.delete_project("missing"));
    }
}
