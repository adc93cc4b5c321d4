//! Support case container.
//!
//! # Invariants
//! - `add_case` seeds exactly one history entry.
//! - `update_case` never appends history; only `add_case_update` does.
//! - Case history never shrinks.

use crate::clock::IdGenerator;
use crate::model::case::{
    Case, CasePatch, CasePatchError, CaseStatus, CaseUpdate, NewCase, NewCaseUpdate,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Action recorded on the history entry seeded at creation.
pub const CREATION_ACTION: &str = "Creación";
const CREATION_DESCRIPTION: &str = "Caso creado";
/// Author recorded at creation when the case has no (or an empty) owner.
const SYSTEM_AUTHOR: &str = "system";

/// Persisted shape of `CaseStore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSnapshot {
    #[serde(default)]
    pub cases: Vec<Case>,
}

#[derive(Debug)]
pub struct CaseStore {
    ids: Arc<IdGenerator>,
    cases: Vec<Case>,
}

impl CaseStore {
    pub fn new(ids: Arc<IdGenerator>) -> Self {
        Self::from_snapshot(ids, CaseSnapshot::default())
    }

    pub fn from_snapshot(ids: Arc<IdGenerator>, snapshot: CaseSnapshot) -> Self {
        Self {
            ids,
            cases: snapshot.cases,
        }
    }

    pub fn snapshot(&self) -> CaseSnapshot {
        CaseSnapshot {
            cases: self.cases.clone(),
        }
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn get(&self, case_id: &str) -> Option<&Case> {
        self.cases.iter().find(|case| case.id == case_id)
    }

    /// Appends a case with one seeded "Creación" history entry.
    ///
    /// The seeded entry keeps an empty `case_id`; existing consumers of
    /// persisted snapshots read it that way.
    pub fn add_case(&mut self, new_case: NewCase) -> Case {
        let now = self.ids.now();
        let author = new_case
            .owner
            .clone()
            .filter(|owner| !owner.is_empty())
            .unwrap_or_else(|| SYSTEM_AUTHOR.to_string());
        let case = Case {
            id: self.ids.next_id("case"),
            client: new_case.client,
            description: new_case.description,
            status: new_case.status,
            priority: new_case.priority,
            owner: new_case.owner,
            internal_notes: new_case.internal_notes,
            history: vec![CaseUpdate {
                id: self.ids.next_id("update"),
                case_id: String::new(),
                author,
                action: CREATION_ACTION.to_string(),
                description: CREATION_DESCRIPTION.to_string(),
                timestamp: now,
            }],
            created_at: now,
            updated_at: now,
        };
        self.cases.push(case.clone());
        case
    }

    /// Validates `patch`, merges it into the matching case and refreshes
    /// `updated_at`. No history entry is written.
    ///
    /// Returns `Ok(false)` when no case matches.
    pub fn update_case(&mut self, case_id: &str, patch: CasePatch) -> Result<bool, CasePatchError> {
        patch.validate()?;
        let now = self.ids.now();
        match self.cases.iter_mut().find(|case| case.id == case_id) {
            Some(case) => {
                case.apply_patch(patch);
                case.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Appends one history entry to the matching case and refreshes
    /// `updated_at`. Returns the stored entry, or `None` on unknown id.
    pub fn add_case_update(&mut self, case_id: &str, entry: NewCaseUpdate) -> Option<CaseUpdate> {
        let case = self.cases.iter_mut().find(|case| case.id == case_id)?;
        let now = self.ids.now();
        let update = CaseUpdate {
            id: self.ids.next_id("update"),
            case_id: case.id.clone(),
            author: entry.author,
            action: entry.action,
            description: entry.description,
            timestamp: now,
        };
        case.history.push(update.clone());
        case.updated_at = now;
        Some(update)
    }

    pub fn delete_case(&mut self, case_id: &str) -> bool {
        let before = self.cases.len();
        self.cases.retain(|case| case.id != case_id);
        self.cases.len() != before
    }

    pub fn cases_by_status(&self, status: CaseStatus) -> Vec<Case> {
        self.cases
            .iter()
            .filter(|case| case.status == status)
            .cloned()
            .collect()
    }
}
