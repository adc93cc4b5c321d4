//! Project model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ProjectId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// CSS color used by the sidebar badge, e.g. `#667eea`.
    pub color: String,
    /// Also accepts a bare `YYYY-MM-DD` date, read as midnight UTC.
    #[serde(deserialize_with = "lenient_timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    /// Username of the creator.
    pub created_by: String,
}

/// Caller-provided fields for `ProjectStore::add_project`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_by: String,
}

// Older project slots store the creation date without a time part.
mod lenient_timestamp {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(timestamp) = raw.parse::<DateTime<Utc>>() {
            return Ok(timestamp);
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| D::Error::custom(format!("invalid project timestamp `{raw}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::Project;
    use serde_json::json;

    fn project_json(created_at: &str) -> serde_json::Value {
        json!({
            "id": "1",
            "name": "Desarrollo Web",
            "color": "#667eea",
            "createdAt": created_at,
            "createdBy": "admin"
        })
    }

    #[test]
    fn date_only_created_at_reads_as_midnight_utc() {
        let project: Project = serde_json::from_value(project_json("2024-10-01")).unwrap();
        assert_eq!(project.created_at.to_rfc3339(), "2024-10-01T00:00:00+00:00");
    }

    #[test]
    fn full_timestamp_still_decodes_and_round_trips() {
        let project: Project =
            serde_json::from_value(project_json("2024-10-01T09:30:00.000Z")).unwrap();
        let encoded = serde_json::to_value(&project).unwrap();
        let again: Project = serde_json::from_value(encoded).unwrap();
        assert_eq!(again, project);
        assert_eq!(project.created_at.timestamp(), 1_727_775_000);
    }

    #[test]
    fn garbage_created_at_is_rejected() {
        let err = serde_json::from_value::<Project>(project_json("ayer")).unwrap_err();
        assert!(err.to_string().contains("invalid project timestamp"));
    }
}
