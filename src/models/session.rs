use super::{Message, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a conversation is about: a persona or a topic, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Character(String),
    Topic(String),
}

impl Selector {
    pub fn character_id(&self) -> Option<&str> {
        match self {
            Selector::Character(id) => Some(id),
            Selector::Topic(_) => None,
        }
    }

    pub fn topic_id(&self) -> Option<&str> {
        match self {
            Selector::Topic(id) => Some(id),
            Selector::Character(_) => None,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Character(id) => write!(f, "character:{}", id),
            Selector::Topic(id) => write!(f, "topic:{}", id),
        }
    }
}

/// A persisted conversation. Field names match the stored JSON collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub title: String,
}

impl ChatSession {
    pub fn new(id: impl Into<String>, selector: &Selector, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            character_id: selector.character_id().map(str::to_string),
            topic_id: selector.topic_id().map(str::to_string),
            messages: Vec::new(),
            created_at: Utc::now(),
            title: title.into(),
        }
    }

    /// The session's selector. Records written by older clients may carry
    /// both ids; the topic wins, matching dispatcher precedence.
    pub fn selector(&self) -> Option<Selector> {
        match (&self.topic_id, &self.character_id) {
            (Some(topic), _) => Some(Selector::Topic(topic.clone())),
            (None, Some(character)) => Some(Selector::Character(character.clone())),
            (None, None) => None,
        }
    }

    /// The first user message, which sits right after the greeting.
    pub fn first_user_message(&self) -> Option<&Message> {
        self.messages.get(1).filter(|m| m.role() == Role::User)
    }
}
