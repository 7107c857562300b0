use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{check_max_len, Patch, ValidationError};

const TITLE_MAX: usize = 200;

/// A thread of messages between a user and an assistant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub assistant_id: Option<Uuid>,
    pub title: Option<String>,
    pub conversation_type: Option<String>,
    pub status: Option<String>,
    pub voice_enabled: Option<bool>,
    pub voice_id: Option<Uuid>,
    pub metadata: Option<Value>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn apply(&mut self, update: ConversationUpdate) {
        update.title.apply_to(&mut self.title);
        update.conversation_type.apply_to(&mut self.conversation_type);
        update.status.apply_to(&mut self.status);
        update.voice_enabled.apply_to(&mut self.voice_enabled);
        update.voice_id.apply_to(&mut self.voice_id);
        update.metadata.apply_to(&mut self.metadata);
    }
}

/// Body of `POST /conversations`
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationCreate {
    pub assistant_id: Uuid,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub conversation_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Absent means disabled; an explicit `null` enables voice
    #[serde(default = "voice_disabled")]
    pub voice_enabled: Option<bool>,
    #[serde(default)]
    pub voice_id: Option<Uuid>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

fn voice_disabled() -> Option<bool> {
    Some(false)
}

impl ConversationCreate {
    pub fn new(assistant_id: Uuid) -> Self {
        Self {
            assistant_id,
            user_id: None,
            title: None,
            conversation_type: None,
            status: None,
            voice_enabled: voice_disabled(),
            voice_id: None,
            metadata: None,
        }
    }

    /// Set the title (builder pattern)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_max_len("title", self.title.as_deref(), TITLE_MAX)?;
        Ok(())
    }

    pub fn conversation_type_or_default(&self) -> &str {
        self.conversation_type.as_deref().unwrap_or("chat")
    }

    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or("active")
    }

    pub fn voice_enabled_or_default(&self) -> bool {
        self.voice_enabled.unwrap_or(true)
    }
}

/// Body of `PUT /conversations/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationUpdate {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub conversation_type: Patch<String>,
    #[serde(default)]
    pub status: Patch<String>,
    #[serde(default)]
    pub voice_enabled: Patch<bool>,
    #[serde(default)]
    pub voice_id: Patch<Uuid>,
    #[serde(default)]
    pub metadata: Patch<Value>,
}

impl ConversationUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_max_len("title", self.title.as_set().map(String::as_str), TITLE_MAX)
    }
}

/// `?assistant_id=&skip=&limit=` for listing conversations
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ConversationFilter {
    #[serde(default)]
    pub assistant_id: Option<Uuid>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl ConversationFilter {
    pub fn pagination(&self) -> super::Pagination {
        super::Pagination {
            skip: self.skip,
            limit: self.limit,
        }
    }
}
