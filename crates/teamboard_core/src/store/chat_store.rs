//! Project chat container.

use crate::clock::IdGenerator;
use crate::mention::extract_mentions;
use crate::model::message::{Message, NewMessage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Persisted shape of `ChatStore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSnapshot {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug)]
pub struct ChatStore {
    ids: Arc<IdGenerator>,
    messages: Vec<Message>,
}

impl ChatStore {
    pub fn new(ids: Arc<IdGenerator>) -> Self {
        Self::from_snapshot(ids, ChatSnapshot::default())
    }

    pub fn from_snapshot(ids: Arc<IdGenerator>, snapshot: ChatSnapshot) -> Self {
        Self {
            ids,
            messages: snapshot.messages,
        }
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.messages.clone(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Appends a message; mentions are extracted from its text here and
    /// never recomputed.
    pub fn add_message(&mut self, new_message: NewMessage) -> Message {
        let mentions = extract_mentions(&new_message.text);
        let message = Message {
            id: self.ids.next_id("msg"),
            author: new_message.author,
            text: new_message.text,
            timestamp: self.ids.now(),
            project_id: new_message.project_id,
            mentions,
            attachments: new_message.attachments,
        };
        self.messages.push(message.clone());
        message
    }

    pub fn delete_message(&mut self, message_id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|message| message.id != message_id);
        self.messages.len() != before
    }

    /// Messages of one project in insertion (chronological) order.
    pub fn messages_by_project(&self, project_id: &str) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|message| message.project_id.as_deref() == Some(project_id))
            .cloned()
            .collect()
    }
}
