//! Chat message model.
//!
//! # Invariants
//! - `mentions` is computed from `text` once, when the message is appended.

use crate::model::project::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type MessageId = String;

/// File attached to a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAttachment {
    pub id: String,
    pub name: String,
    /// MIME type, serialized as `type`.
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    /// Username of the sender.
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub mentions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<MessageAttachment>,
}

/// Caller-provided fields for `ChatStore::add_message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub author: String,
    pub text: String,
    pub project_id: Option<ProjectId>,
    pub attachments: Vec<MessageAttachment>,
}

impl NewMessage {
    pub fn new(
        author: impl Into<String>,
        text: impl Into<String>,
        project_id: Option<ProjectId>,
    ) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            project_id,
            attachments: Vec::new(),
        }
    }
}
