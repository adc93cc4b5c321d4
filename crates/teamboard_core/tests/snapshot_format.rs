use std::sync::Arc;
use teamboard_core::db::open_db_in_memory;
use teamboard_core::{
    load_snapshot, CaseSnapshot, IdGenerator, ManualClock, NewMessage, ProjectSnapshot,
    SlotRepository, SqliteSlotRepository, TaskSnapshot, Workspace,
};

#[test]
fn task_slot_uses_camel_case_fields() {
    let snapshot = teamboard_core::store::seed::tasks();
    let json = serde_json::to_value(&snapshot).unwrap();
    let first = &json["tasks"][0];
    assert_eq!(first["projectId"], "1");
    assert_eq!(first["createdBy"], "admin");
    assert_eq!(first["status"], "todo");
    assert_eq!(first["priority"], "high");
    assert_eq!(first["createdAt"], "2024-10-15T10:00:00Z");
    assert!(first.get("assignedTo").is_none());
    assert_eq!(json["tasks"][1]["status"], "inprogress");
}

#[test]
fn case_slot_keeps_spanish_field_names() {
    let json = serde_json::to_value(teamboard_core::store::seed::cases()).unwrap();
    let case = &json["cases"][1];
    assert_eq!(case["cliente"], "Cliente XYZ");
    assert_eq!(case["estado"], "en_curso");
    assert_eq!(case["prioridad"], "media");
    assert_eq!(case["responsable"], "admin");
    assert_eq!(case["notasInternas"], "En análisis de viabilidad");
    assert_eq!(case["historial"][1]["accion"], "Actualización");
    assert_eq!(case["historial"][1]["caseId"], "2");
}

#[test]
fn persisted_case_slot_decodes_browser_style_payload() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let payload = serde_json::json!({
        "cases": [{
            "id": "case_1729000000000",
            "cliente": "Tienda Sur",
            "descripcion": "Pedido duplicado",
            "estado": "abierto",
            "prioridad": "urgente",
            "notasInternas": "",
            "historial": [{
                "id": "update_1729000000001",
                "caseId": "",
                "autor": "system",
                "accion": "Creación",
                "descripcion": "Caso creado",
                "timestamp": "2024-10-15T12:00:00Z"
            }],
            "createdAt": "2024-10-15T12:00:00Z",
            "updatedAt": "2024-10-15T12:00:00Z"
        }]
    });
    repo.save_slot("case-storage", &payload.to_string()).unwrap();

    let snapshot: CaseSnapshot = load_snapshot(&repo, "case-storage").unwrap().unwrap();
    assert_eq!(snapshot.cases.len(), 1);
    assert!(snapshot.cases[0].owner.is_none());
    assert!(snapshot.cases[0].history[0].case_id.is_empty());
}

#[test]
fn workspace_writes_only_the_touched_slot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let ids = Arc::new(IdGenerator::new(Arc::new(ManualClock::at_epoch_ms(2_000))));
    let mut workspace = Workspace::open(repo, ids, true).unwrap();

    workspace.set_current_project("2").unwrap();
    assert_eq!(workspace.repo().list_slots().unwrap(), vec!["project-storage"]);

    let projects: ProjectSnapshot = load_snapshot(workspace.repo(), "project-storage")
        .unwrap()
        .unwrap();
    assert_eq!(projects.current_project_id.as_deref(), Some("2"));

    workspace
        .add_message(NewMessage::new("admin", "sin proyecto", None))
        .unwrap();
    let tasks: Option<TaskSnapshot> = load_snapshot(workspace.repo(), "task-storage").unwrap();
    assert!(tasks.is_none());
}

#[test]
fn workspace_opens_project_slot_with_date_only_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    repo.save_slot(
        "project-storage",
        r##"{"projects":[{"id":"1","name":"Desarrollo Web","color":"#667eea","createdAt":"2024-10-01","createdBy":"admin"}],"currentProjectId":"1"}"##,
    )
    .unwrap();

    let ids = Arc::new(IdGenerator::new(Arc::new(ManualClock::at_epoch_ms(1))));
    let workspace = Workspace::open(repo, ids, false).unwrap();
    let project = workspace.projects().current_project().unwrap();
    assert_eq!(project.name, "Desarrollo Web");
    assert_eq!(project.created_at.timestamp(), 1_727_740_800);

    let stored: ProjectSnapshot = load_snapshot(workspace.repo(), "project-storage")
        .unwrap()
        .unwrap();
    assert_eq!(stored.projects[0].created_at, project.created_at);
}
