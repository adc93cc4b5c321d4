//! Workspace composition root.
//!
//! # Responsibility
//! - Own the five stores and the slot repository they persist through.
//! - Write the touched store's slot after every mutation.
//! - Provide page-level use-cases that apply the input guards callers
//!   would otherwise repeat (blank text, no active user/project).
//!
//! # Invariants
//! - A mutation changes exactly one store and rewrites exactly one slot.
//! - In-memory state is updated before the slot write; a failed write is
//!   reported but does not roll the store back.
//! - Logs carry ids and counts only, never user-entered text.

use crate::clock::IdGenerator;
use crate::model::case::{
    Case, CasePatch, CasePatchError, CasePriority, CaseStatus, CaseUpdate, NewCase, NewCaseUpdate,
};
use crate::model::message::{Message, NewMessage};
use crate::model::project::{NewProject, Project};
use crate::model::task::{NewTask, Task, TaskStatus};
use crate::model::user::User;
use crate::repo::slot_repo::{load_snapshot, save_snapshot, RepoError, SlotRepository};
use crate::service::insights::{self, DashboardStats, RankingEntry};
use crate::store::case_store::CaseStore;
use crate::store::chat_store::ChatStore;
use crate::store::project_store::ProjectStore;
use crate::store::task_store::TaskStore;
use crate::store::user_store::UserStore;
use crate::store::{seed, CASE_SLOT, CHAT_SLOT, PROJECT_SLOT, TASK_SLOT, USER_SLOT};
use log::{error, info};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// History action recorded by `change_case_status`.
pub const STATUS_CHANGE_ACTION: &str = "Actualización";

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Use-case level error for workspace operations.
#[derive(Debug)]
pub enum WorkspaceError {
    /// Required text input is empty after trimming.
    BlankInput(&'static str),
    NoCurrentUser,
    NoCurrentProject,
    CaseNotFound(String),
    InvalidPatch(CasePatchError),
    Repo(RepoError),
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankInput(field) => write!(f, "`{field}` cannot be blank"),
            Self::NoCurrentUser => write!(f, "no user is signed in"),
            Self::NoCurrentProject => write!(f, "no project is selected"),
            Self::CaseNotFound(id) => write!(f, "case not found: {id}"),
            Self::InvalidPatch(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPatch(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for WorkspaceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<CasePatchError> for WorkspaceError {
    fn from(value: CasePatchError) -> Self {
        Self::InvalidPatch(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Users,
    Projects,
    Tasks,
    Cases,
    Chat,
}

impl Slot {
    fn key(self) -> &'static str {
        match self {
            Self::Users => USER_SLOT,
            Self::Projects => PROJECT_SLOT,
            Self::Tasks => TASK_SLOT,
            Self::Cases => CASE_SLOT,
            Self::Chat => CHAT_SLOT,
        }
    }
}

/// Application state: every store plus its persistence.
pub struct Workspace<R: SlotRepository> {
    repo: R,
    ids: Arc<IdGenerator>,
    users: UserStore,
    projects: ProjectStore,
    tasks: TaskStore,
    cases: CaseStore,
    chat: ChatStore,
}

impl<R: SlotRepository> Workspace<R> {
    /// Loads every store from its slot.
    ///
    /// A slot that was never written starts from demo data when
    /// `seed_missing` is set, or empty otherwise.
    pub fn open(repo: R, ids: Arc<IdGenerator>, seed_missing: bool) -> WorkspaceResult<Self> {
        let users = load_or(&repo, USER_SLOT, seed_missing, seed::users)?;
        let projects = load_or(&repo, PROJECT_SLOT, seed_missing, seed::projects)?;
        let tasks = load_or(&repo, TASK_SLOT, seed_missing, seed::tasks)?;
        let cases = load_or(&repo, CASE_SLOT, seed_missing, seed::cases)?;
        let chat = load_or(&repo, CHAT_SLOT, seed_missing, seed::messages)?;

        let workspace = Self {
            users: UserStore::from_snapshot(users),
            projects: ProjectStore::from_snapshot(ids.clone(), projects),
            tasks: TaskStore::from_snapshot(ids.clone(), tasks),
            cases: CaseStore::from_snapshot(ids.clone(), cases),
            chat: ChatStore::from_snapshot(ids.clone(), chat),
            repo,
            ids,
        };
        info!(
            "event=workspace_open module=workspace status=ok users={} projects={} tasks={} cases={} messages={}",
            workspace.users.users().len(),
            workspace.projects.projects().len(),
            workspace.tasks.tasks().len(),
            workspace.cases.cases().len(),
            workspace.chat.messages().len()
        );
        Ok(workspace)
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn cases(&self) -> &CaseStore {
        &self.cases
    }

    pub fn chat(&self) -> &ChatStore {
        &self.chat
    }

    pub fn ids(&self) -> &Arc<IdGenerator> {
        &self.ids
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    // -- users ---------------------------------------------------------

    pub fn set_current_user(&mut self, user: User) -> WorkspaceResult<()> {
        let user_id = user.id.clone();
        self.users.set_current_user(user);
        self.persist(Slot::Users)?;
        info!("event=user_switch module=workspace status=ok user_id={user_id}");
        Ok(())
    }

    pub fn upsert_user(&mut self, user: User) -> WorkspaceResult<()> {
        self.users.upsert_user(user);
        self.persist(Slot::Users)
    }

    pub fn logout(&mut self) -> WorkspaceResult<()> {
        self.users.logout();
        self.persist(Slot::Users)?;
        info!("event=user_logout module=workspace status=ok");
        Ok(())
    }

    /// Returns the new level, or `None` when nobody is signed in.
    pub fn add_points(&mut self, points: u32) -> WorkspaceResult<Option<u32>> {
        let Some(level) = self.users.add_points(points) else {
            return Ok(None);
        };
        self.persist(Slot::Users)?;
        info!("event=points_add module=workspace status=ok points={points} level={level}");
        Ok(Some(level))
    }

    // -- projects ------------------------------------------------------

    pub fn add_project(&mut self, new_project: NewProject) -> WorkspaceResult<Project> {
        let project = self.projects.add_project(new_project);
        self.persist(Slot::Projects)?;
        info!(
            "event=project_add module=workspace status=ok project_id={}",
            project.id
        );
        Ok(project)
    }

    pub fn set_current_project(&mut self, project_id: &str) -> WorkspaceResult<Option<Project>> {
        let selected = self.projects.set_current_project(project_id).cloned();
        self.persist(Slot::Projects)?;
        Ok(selected)
    }

    /// Removes the project only; its tasks and messages stay behind.
    pub fn delete_project(&mut self, project_id: &str) -> WorkspaceResult<bool> {
        let removed = self.projects.delete_project(project_id);
        if removed {
            self.persist(Slot::Projects)?;
            info!("event=project_delete module=workspace status=ok project_id={project_id}");
        }
        Ok(removed)
    }

    // -- tasks ---------------------------------------------------------

    pub fn add_task(&mut self, new_task: NewTask) -> WorkspaceResult<Task> {
        let task = self.tasks.add_task(new_task);
        self.persist(Slot::Tasks)?;
        info!(
            "event=task_add module=workspace status=ok task_id={} project_id={}",
            task.id, task.project_id
        );
        Ok(task)
    }

    pub fn move_task(&mut self, task_id: &str, status: TaskStatus) -> WorkspaceResult<bool> {
        let moved = self.tasks.move_task(task_id, status);
        if moved {
            self.persist(Slot::Tasks)?;
            info!(
                "event=task_move module=workspace status=ok task_id={task_id} to={}",
                status.as_str()
            );
        }
        Ok(moved)
    }

    pub fn delete_task(&mut self, task_id: &str) -> WorkspaceResult<bool> {
        let removed = self.tasks.delete_task(task_id);
        if removed {
            self.persist(Slot::Tasks)?;
        }
        Ok(removed)
    }

    // -- cases ---------------------------------------------------------

    pub fn add_case(&mut self, new_case: NewCase) -> WorkspaceResult<Case> {
        let case = self.cases.add_case(new_case);
        self.persist(Slot::Cases)?;
        info!("event=case_add module=workspace status=ok case_id={}", case.id);
        Ok(case)
    }

    /// Field update without an audit entry; see `change_case_status` for
    /// the audited status transition.
    pub fn update_case(&mut self, case_id: &str, patch: CasePatch) -> WorkspaceResult<bool> {
        let updated = self.cases.update_case(case_id, patch)?;
        if updated {
            self.persist(Slot::Cases)?;
        }
        Ok(updated)
    }

    pub fn add_case_update(
        &mut self,
        case_id: &str,
        entry: NewCaseUpdate,
    ) -> WorkspaceResult<Option<CaseUpdate>> {
        let appended = self.cases.add_case_update(case_id, entry);
        if appended.is_some() {
            self.persist(Slot::Cases)?;
        }
        Ok(appended)
    }

    pub fn delete_case(&mut self, case_id: &str) -> WorkspaceResult<bool> {
        let removed = self.cases.delete_case(case_id);
        if removed {
            self.persist(Slot::Cases)?;
        }
        Ok(removed)
    }

    // -- chat ----------------------------------------------------------

    pub fn add_message(&mut self, new_message: NewMessage) -> WorkspaceResult<Message> {
        let message = self.chat.add_message(new_message);
        self.persist(Slot::Chat)?;
        info!(
            "event=message_add module=workspace status=ok message_id={} mentions={}",
            message.id,
            message.mentions.len()
        );
        Ok(message)
    }

    pub fn delete_message(&mut self, message_id: &str) -> WorkspaceResult<bool> {
        let removed = self.chat.delete_message(message_id);
        if removed {
            self.persist(Slot::Chat)?;
        }
        Ok(removed)
    }

    // -- page use-cases ------------------------------------------------

    /// Adds a task to the current project on behalf of the current user.
    pub fn create_task(&mut self, text: &str, status: TaskStatus) -> WorkspaceResult<Task> {
        require_text("text", text)?;
        let project_id = self.require_project()?.id.clone();
        let author = self.require_user()?.username.clone();
        self.add_task(NewTask::new(text, status, project_id, author))
    }

    /// Posts to the current project's chat as the current user.
    pub fn send_message(&mut self, text: &str) -> WorkspaceResult<Message> {
        require_text("text", text)?;
        let project_id = self.require_project()?.id.clone();
        let author = self.require_user()?.username.clone();
        self.add_message(NewMessage::new(author, text, Some(project_id)))
    }

    /// Opens a case owned by the current user.
    pub fn open_case(
        &mut self,
        client: &str,
        description: &str,
        priority: CasePriority,
    ) -> WorkspaceResult<Case> {
        require_text("cliente", client)?;
        require_text("descripcion", description)?;
        let owner = self.require_user()?.username.clone();
        self.add_case(NewCase {
            client: client.to_string(),
            description: description.to_string(),
            status: CaseStatus::Open,
            priority,
            owner: Some(owner),
            internal_notes: String::new(),
        })
    }

    /// Moves a case to `status` and records the change in its history.
    ///
    /// Setting the status a case already has writes nothing.
    pub fn change_case_status(&mut self, case_id: &str, status: CaseStatus) -> WorkspaceResult<Case> {
        let author = self.require_user()?.username.clone();
        let current = self
            .cases
            .get(case_id)
            .ok_or_else(|| WorkspaceError::CaseNotFound(case_id.to_string()))?;
        if current.status == status {
            return Ok(current.clone());
        }
        let from = current.status;

        self.cases.update_case(case_id, CasePatch::status(status))?;
        self.cases.add_case_update(
            case_id,
            NewCaseUpdate::new(
                author,
                STATUS_CHANGE_ACTION,
                format!("Cambio de estado a {}", status.label()),
            ),
        );
        self.persist(Slot::Cases)?;
        info!(
            "event=case_status module=workspace status=ok case_id={case_id} from={} to={}",
            from.as_str(),
            status.as_str()
        );

        self.cases
            .get(case_id)
            .cloned()
            .ok_or_else(|| WorkspaceError::CaseNotFound(case_id.to_string()))
    }

    // -- read models ---------------------------------------------------

    /// Tasks of the current project in one board column.
    pub fn board_column(&self, status: TaskStatus) -> Vec<Task> {
        match self.projects.current_project() {
            Some(project) => self.tasks.tasks_by_status(&project.id, status),
            None => Vec::new(),
        }
    }

    /// Chat of the current project.
    pub fn current_chat(&self) -> Vec<Message> {
        match self.projects.current_project() {
            Some(project) => self.chat.messages_by_project(&project.id),
            None => Vec::new(),
        }
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        insights::dashboard_stats(
            self.projects.current_project().map(|project| project.id.as_str()),
            self.tasks.tasks(),
            self.cases.cases(),
            self.projects.projects().len(),
        )
    }

    pub fn rankings(&self) -> Vec<RankingEntry> {
        insights::rankings(self.users.users(), self.tasks.tasks())
    }

    fn require_user(&self) -> WorkspaceResult<&User> {
        self.users.current_user().ok_or(WorkspaceError::NoCurrentUser)
    }

    fn require_project(&self) -> WorkspaceResult<&Project> {
        self.projects
            .current_project()
            .ok_or(WorkspaceError::NoCurrentProject)
    }

    fn persist(&self, slot: Slot) -> WorkspaceResult<()> {
        let key = slot.key();
        let result = match slot {
            Slot::Users => save_snapshot(&self.repo, key, &self.users.snapshot()),
            Slot::Projects => save_snapshot(&self.repo, key, &self.projects.snapshot()),
            Slot::Tasks => save_snapshot(&self.repo, key, &self.tasks.snapshot()),
            Slot::Cases => save_snapshot(&self.repo, key, &self.cases.snapshot()),
            Slot::Chat => save_snapshot(&self.repo, key, &self.chat.snapshot()),
        };
        result.map_err(|err| {
            error!("event=slot_persist module=workspace status=error slot={key} error={err}");
            WorkspaceError::from(err)
        })
    }
}

fn load_or<T, R>(
    repo: &R,
    key: &str,
    seed_missing: bool,
    seed: fn() -> T,
) -> WorkspaceResult<T>
where
    T: DeserializeOwned + Default,
    R: SlotRepository,
{
    match load_snapshot(repo, key)? {
        Some(snapshot) => Ok(snapshot),
        None if seed_missing => Ok(seed()),
        None => Ok(T::default()),
    }
}

fn require_text(field: &'static str, value: &str) -> WorkspaceResult<()> {
    if value.trim().is_empty() {
        return Err(WorkspaceError::BlankInput(field));
    }
    Ok(())
}
