//! Support case model.
//!
//! # Responsibility
//! - Define cases, their audit history and the partial-update patch.
//! - Validate patches before they are merged into a stored case.
//!
//! # Invariants
//! - `history` only grows; entries are never edited or removed.
//! - A patch cannot touch `id`, `created_at`, `updated_at` or `history`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CaseId = String;

/// Lifecycle state of a support case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    #[serde(rename = "abierto")]
    Open,
    #[serde(rename = "en_curso")]
    InProgress,
    #[serde(rename = "cerrado")]
    Closed,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 3] = [CaseStatus::Open, CaseStatus::InProgress, CaseStatus::Closed];

    /// Wire name (`abierto|en_curso|cerrado`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "abierto",
            Self::InProgress => "en_curso",
            Self::Closed => "cerrado",
        }
    }

    /// Human label used in audit descriptions (`en curso`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "abierto",
            Self::InProgress => "en curso",
            Self::Closed => "cerrado",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "abierto" => Some(Self::Open),
            "en_curso" | "en curso" => Some(Self::InProgress),
            "cerrado" => Some(Self::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CasePriority {
    #[serde(rename = "baja")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "urgente")]
    Urgent,
}

impl CasePriority {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "baja" => Some(Self::Low),
            "media" => Some(Self::Medium),
            "alta" => Some(Self::High),
            "urgente" => Some(Self::Urgent),
            _ => None,
        }
    }
}

/// One audit entry in a case history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseUpdate {
    pub id: String,
    /// Owning case id. Empty on the entry seeded by `add_case`.
    #[serde(rename = "caseId")]
    pub case_id: CaseId,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "accion")]
    pub action: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Support case. Serialized with the original Spanish field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    #[serde(rename = "cliente")]
    pub client: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "estado")]
    pub status: CaseStatus,
    #[serde(rename = "prioridad")]
    pub priority: CasePriority,
    /// Free-text username; not checked against the roster.
    #[serde(rename = "responsable", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "notasInternas", default)]
    pub internal_notes: String,
    #[serde(rename = "historial")]
    pub history: Vec<CaseUpdate>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Merges the provided patch fields into this case.
    ///
    /// Does not touch `updated_at` or `history`; the store owns both.
    pub(crate) fn apply_patch(&mut self, patch: CasePatch) {
        if let Some(client) = patch.client {
            self.client = client;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(owner) = patch.owner {
            self.owner = Some(owner);
        }
        if let Some(internal_notes) = patch.internal_notes {
            self.internal_notes = internal_notes;
        }
    }
}

/// Caller-provided fields for `CaseStore::add_case`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCase {
    pub client: String,
    pub description: String,
    pub status: CaseStatus,
    pub priority: CasePriority,
    pub owner: Option<String>,
    pub internal_notes: String,
}

/// Caller-provided fields for `CaseStore::add_case_update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCaseUpdate {
    pub author: String,
    pub action: String,
    pub description: String,
}

impl NewCaseUpdate {
    pub fn new(
        author: impl Into<String>,
        action: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            action: action.into(),
            description: description.into(),
        }
    }
}

/// Partial update for the editable fields of a case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CasePatch {
    pub client: Option<String>,
    pub description: Option<String>,
    pub status: Option<CaseStatus>,
    pub priority: Option<CasePriority>,
    pub owner: Option<String>,
    pub internal_notes: Option<String>,
}

impl CasePatch {
    /// Patch that only changes the status.
    pub fn status(status: CaseStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.client.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.owner.is_none()
            && self.internal_notes.is_none()
    }

    /// Rejects empty patches and blank values for required text fields.
    pub fn validate(&self) -> Result<(), CasePatchError> {
        if self.is_empty() {
            return Err(CasePatchError::Empty);
        }
        let required = [
            ("cliente", self.client.as_deref()),
            ("descripcion", self.description.as_deref()),
            ("responsable", self.owner.as_deref()),
        ];
        for (field, value) in required {
            if matches!(value, Some(text) if text.trim().is_empty()) {
                return Err(CasePatchError::BlankField(field));
            }
        }
        Ok(())
    }
}

/// Rejection reasons for `CasePatch::validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePatchError {
    Empty,
    BlankField(&'static str),
}

impl Display for CasePatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "case patch does not change any field"),
            Self::BlankField(field) => write!(f, "case field `{field}` cannot be blank"),
        }
    }
}

impl Error for CasePatchError {}
