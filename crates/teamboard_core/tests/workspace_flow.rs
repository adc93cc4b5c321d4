use std::sync::Arc;
use teamboard_core::db::{open_db, open_db_in_memory};
use teamboard_core::{
    CasePatch, CasePriority, CaseStatus, IdGenerator, ManualClock, NewCaseUpdate, NewProject,
    SlotRepository, SqliteSlotRepository, TaskStatus, User, UserRole, Workspace, WorkspaceError,
};

fn ids() -> Arc<IdGenerator> {
    Arc::new(IdGenerator::new(Arc::new(ManualClock::at_epoch_ms(
        1_729_000_000_000,
    ))))
}

#[test]
fn seeded_workspace_exposes_demo_board() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let workspace = Workspace::open(repo, ids(), true).unwrap();

    assert_eq!(workspace.users().current_user().unwrap().username, "admin");
    assert_eq!(workspace.projects().current_project().unwrap().id, "1");
    assert_eq!(workspace.board_column(TaskStatus::Todo).len(), 1);
    assert_eq!(workspace.board_column(TaskStatus::InProgress).len(), 1);
    assert_eq!(workspace.board_column(TaskStatus::Done).len(), 1);
    assert_eq!(workspace.current_chat().len(), 2);

    let stats = workspace.dashboard_stats();
    assert_eq!(stats.total_tasks, 3);
    assert_eq!(stats.total_projects, 2);
    assert_eq!(stats.open_cases, 2);
}

#[test]
fn mutations_survive_reopen_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("teamboard.sqlite3");

    let (task_id, message_id) = {
        let conn = open_db(&db_path).unwrap();
        let repo = SqliteSlotRepository::try_new(&conn).unwrap();
        let mut workspace = Workspace::open(repo, ids(), true).unwrap();
        let task = workspace.create_task("Preparar demo", TaskStatus::Todo).unwrap();
        workspace.move_task(&task.id, TaskStatus::InProgress).unwrap();
        let message = workspace.send_message("@admin demo lista").unwrap();
        (task.id, message.id)
    };

    let conn = open_db(&db_path).unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let slots = repo.list_slots().unwrap();
    assert_eq!(slots, vec!["chat-storage".to_string(), "task-storage".to_string()]);

    let workspace = Workspace::open(repo, ids(), true).unwrap();
    let task = workspace.tasks().get(&task_id).unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.created_by, "admin");
    assert_eq!(workspace.tasks().tasks().len(), 4);

    let message = workspace
        .chat()
        .messages()
        .iter()
        .find(|message| message.id == message_id)
        .unwrap();
    assert_eq!(message.mentions, vec!["admin"]);
}

#[test]
fn unseeded_workspace_starts_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let mut workspace = Workspace::open(repo, ids(), false).unwrap();

    assert!(workspace.projects().projects().is_empty());
    assert!(matches!(
        workspace.send_message("hola"),
        Err(WorkspaceError::NoCurrentProject)
    ));

    workspace
        .add_project(NewProject {
            name: "Soporte".to_string(),
            description: None,
            color: "#ff8800".to_string(),
            created_by: "admin".to_string(),
        })
        .unwrap();
    assert!(matches!(
        workspace.send_message("hola"),
        Err(WorkspaceError::NoCurrentUser)
    ));
}

#[test]
fn status_change_use_case_records_audit_entry() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let mut workspace = Workspace::open(repo, ids(), true).unwrap();

    let case = workspace
        .open_case("Empresa Nueva", "No puede iniciar sesión", CasePriority::Urgent)
        .unwrap();
    assert_eq!(case.owner.as_deref(), Some("admin"));
    assert_eq!(case.status, CaseStatus::Open);

    let moved = workspace
        .change_case_status(&case.id, CaseStatus::InProgress)
        .unwrap();
    assert_eq!(moved.status, CaseStatus::InProgress);
    assert_eq!(moved.history.len(), 2);
    assert_eq!(moved.history[1].action, "Actualización");
    assert_eq!(moved.history[1].description, "Cambio de estado a en curso");
    assert_eq!(moved.history[1].case_id, case.id);

    let unchanged = workspace
        .change_case_status(&case.id, CaseStatus::InProgress)
        .unwrap();
    assert_eq!(unchanged.history.len(), 2);

    assert!(matches!(
        workspace.change_case_status("missing", CaseStatus::Closed),
        Err(WorkspaceError::CaseNotFound(_))
    ));
}

#[test]
fn plain_case_update_stays_silent_in_history() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let mut workspace = Workspace::open(repo, ids(), true).unwrap();

    assert!(workspace
        .update_case("1", CasePatch::status(CaseStatus::Closed))
        .unwrap());
    assert_eq!(workspace.cases().get("1").unwrap().history.len(), 1);

    assert!(matches!(
        workspace.update_case("1", CasePatch::default()),
        Err(WorkspaceError::InvalidPatch(_))
    ));

    let entry = workspace
        .add_case_update("1", NewCaseUpdate::new("admin", "Cierre", "Resuelto"))
        .unwrap()
        .unwrap();
    assert_eq!(entry.case_id, "1");
    assert_eq!(workspace.cases().get("1").unwrap().history.len(), 2);
    assert_eq!(workspace.dashboard_stats().closed_cases, 1);
}

#[test]
fn project_delete_leaves_orphans_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let mut workspace = Workspace::open(repo, ids(), true).unwrap();

    assert!(workspace.delete_project("1").unwrap());
    assert_eq!(workspace.projects().current_project().unwrap().id, "2");
    assert_eq!(workspace.tasks().tasks_by_project("1").len(), 3);
    assert_eq!(workspace.chat().messages_by_project("1").len(), 2);
    assert!(workspace.board_column(TaskStatus::Todo).is_empty());
}

#[test]
fn rankings_reflect_awarded_points() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let mut workspace = Workspace::open(repo, ids(), true).unwrap();

    let mut ana = User::new("2", "ana", "ana@example.com", UserRole::Member);
    ana.award_points(200);
    workspace.upsert_user(ana).unwrap();
    assert_eq!(workspace.rankings()[0].username, "ana");

    assert_eq!(workspace.add_points(50).unwrap(), Some(3));
    let board = workspace.rankings();
    assert_eq!(board[0].username, "admin");
    assert_eq!(board[0].score, 200 + 20);

    workspace.logout().unwrap();
    assert_eq!(workspace.add_points(50).unwrap(), None);
    assert_eq!(workspace.users().users().len(), 2);
}
