//! Demo data loaded into empty workspaces.
//!
//! Seed ids are short numeric strings so they never collide with the
//! `<prefix>_<millis>` ids issued at runtime.

use crate::model::case::{Case, CasePriority, CaseStatus, CaseUpdate};
use crate::model::message::Message;
use crate::model::project::Project;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::user::{Achievement, User, UserRole};
use crate::store::case_store::CaseSnapshot;
use crate::store::chat_store::ChatSnapshot;
use crate::store::project_store::ProjectSnapshot;
use crate::store::task_store::TaskSnapshot;
use crate::store::user_store::UserSnapshot;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn tags(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|value| value.to_string()).collect())
}

pub fn admin_user() -> User {
    User {
        id: "1".to_string(),
        username: "admin".to_string(),
        email: "admin@example.com".to_string(),
        role: UserRole::Admin,
        avatar: None,
        initials: "AD".to_string(),
        points: 150,
        level: 2,
        achievements: vec![Achievement {
            id: "1".to_string(),
            name: "Primera Tarea".to_string(),
            icon: "🎯".to_string(),
            description: "Completaste tu primera tarea".to_string(),
            date_earned: day(2024, 10, 15),
        }],
    }
}

pub fn users() -> UserSnapshot {
    let admin = admin_user();
    UserSnapshot {
        current_user: Some(admin.clone()),
        users: vec![admin],
    }
}

pub fn projects() -> ProjectSnapshot {
    ProjectSnapshot {
        projects: vec![
            Project {
                id: "1".to_string(),
                name: "Desarrollo Web".to_string(),
                description: Some("Proyecto principal de desarrollo".to_string()),
                color: "#667eea".to_string(),
                created_at: at(2024, 10, 1, 0, 0),
                created_by: "admin".to_string(),
            },
            Project {
                id: "2".to_string(),
                name: "Marketing".to_string(),
                description: Some("Campaña de marketing digital".to_string()),
                color: "#48cae4".to_string(),
                created_at: at(2024, 10, 5, 0, 0),
                created_by: "admin".to_string(),
            },
        ],
        current_project_id: Some("1".to_string()),
    }
}

pub fn tasks() -> TaskSnapshot {
    TaskSnapshot {
        tasks: vec![
            Task {
                id: "1".to_string(),
                text: "Diseñar interfaz de usuario".to_string(),
                status: TaskStatus::Todo,
                project_id: "1".to_string(),
                created_by: "admin".to_string(),
                assigned_to: None,
                created_at: at(2024, 10, 15, 10, 0),
                due_date: None,
                tags: tags(&["diseño", "frontend"]),
                priority: Some(TaskPriority::High),
            },
            Task {
                id: "2".to_string(),
                text: "Configurar base de datos".to_string(),
                status: TaskStatus::InProgress,
                project_id: "1".to_string(),
                created_by: "admin".to_string(),
                assigned_to: Some("admin".to_string()),
                created_at: at(2024, 10, 14, 9, 0),
                due_date: None,
                tags: tags(&["backend", "database"]),
                priority: Some(TaskPriority::Urgent),
            },
            Task {
                id: "3".to_string(),
                text: "Implementar autenticación".to_string(),
                status: TaskStatus::Done,
                project_id: "1".to_string(),
                created_by: "admin".to_string(),
                assigned_to: Some("admin".to_string()),
                created_at: at(2024, 10, 13, 8, 0),
                due_date: None,
                tags: tags(&["backend", "security"]),
                priority: Some(TaskPriority::High),
            },
        ],
    }
}

fn history_entry(
    id: &str,
    case_id: &str,
    action: &str,
    description: &str,
    timestamp: DateTime<Utc>,
) -> CaseUpdate {
    CaseUpdate {
        id: id.to_string(),
        case_id: case_id.to_string(),
        author: "admin".to_string(),
        action: action.to_string(),
        description: description.to_string(),
        timestamp,
    }
}

pub fn cases() -> CaseSnapshot {
    CaseSnapshot {
        cases: vec![
            Case {
                id: "1".to_string(),
                client: "Empresa ABC".to_string(),
                description: "Problema con el sistema de facturación".to_string(),
                status: CaseStatus::Open,
                priority: CasePriority::High,
                owner: Some("admin".to_string()),
                internal_notes: "Cliente reporta errores en cálculos".to_string(),
                history: vec![history_entry(
                    "1",
                    "1",
                    "Creación",
                    "Caso creado por contacto telefónico",
                    at(2024, 10, 15, 10, 0),
                )],
                created_at: at(2024, 10, 15, 10, 0),
                updated_at: at(2024, 10, 15, 10, 0),
            },
            Case {
                id: "2".to_string(),
                client: "Cliente XYZ".to_string(),
                description: "Solicitud de nueva funcionalidad".to_string(),
                status: CaseStatus::InProgress,
                priority: CasePriority::Medium,
                owner: Some("admin".to_string()),
                internal_notes: "En análisis de viabilidad".to_string(),
                history: vec![
                    history_entry(
                        "2",
                        "2",
                        "Creación",
                        "Caso creado desde formulario web",
                        at(2024, 10, 14, 9, 0),
                    ),
                    history_entry(
                        "3",
                        "2",
                        "Actualización",
                        "Cambio de estado a en curso",
                        at(2024, 10, 15, 11, 0),
                    ),
                ],
                created_at: at(2024, 10, 14, 9, 0),
                updated_at: at(2024, 10, 15, 11, 0),
            },
        ],
    }
}

pub fn messages() -> ChatSnapshot {
    ChatSnapshot {
        messages: vec![
            Message {
                id: "1".to_string(),
                author: "admin".to_string(),
                text: "Bienvenidos al chat del proyecto!".to_string(),
                timestamp: at(2024, 10, 15, 10, 0),
                project_id: Some("1".to_string()),
                mentions: Vec::new(),
                attachments: Vec::new(),
            },
            Message {
                id: "2".to_string(),
                author: "admin".to_string(),
                text: "Pueden usar @usuario para mencionar a alguien".to_string(),
                timestamp: at(2024, 10, 15, 10, 5),
                project_id: Some("1".to_string()),
                mentions: vec!["usuario".to_string()],
                attachments: Vec::new(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use crate::mention::extract_mentions;
    use crate::model::user::level_for_points;

    #[test]
    fn seeded_admin_level_matches_points() {
        let admin = super::admin_user();
        assert_eq!(admin.level, level_for_points(admin.points));
    }

    #[test]
    fn seeded_mentions_match_text() {
        for message in super::messages().messages {
            assert_eq!(message.mentions, extract_mentions(&message.text));
        }
    }
}
