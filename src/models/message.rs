use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Pagination, ValidationError};

/// Sender of a message; stored as the `message_role` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "system" => Ok(MessageRole::System),
            other => Err(ValidationError::new(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// A stored chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: MessageRole,
    pub content: Option<String>,
    pub content_type: Option<String>,
    pub parent_id: Option<Uuid>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /conversations/{id}/messages`
#[derive(Debug, Clone, Deserialize)]
pub struct MessageCreate {
    pub role: MessageRole,
    pub content: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl MessageCreate {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            content_type: None,
            parent_id: None,
            metadata: None,
        }
    }

    pub fn content_type_or_default(&self) -> &str {
        self.content_type.as_deref().unwrap_or("text")
    }
}

/// Body of `POST /messages`, which names its conversation inline
#[derive(Debug, Clone, Deserialize)]
pub struct FlatMessageCreate {
    pub conversation_id: Uuid,
    #[serde(flatten)]
    pub message: MessageCreate,
}

/// `?limit=&offset=` paging of the flat messages API
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MessagePage {
    #[serde(default = "default_page_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_page_limit() -> i64 {
    100
}

impl MessagePage {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            skip: self.offset,
            limit: self.limit,
        }
    }
}
