// Domain records and request/response payloads

pub mod assistant;
pub mod catalog;
pub mod conversation;
pub mod message;
pub mod patch;
pub mod user;

pub use assistant::{Assistant, AssistantCreate, AssistantUpdate, ALLOWED_MODELS, DEFAULT_LLM_MODEL};
pub use catalog::{
    Agent, AssistantSkill, AssistantSkillUpdate, Avatar, EnabledSkill, PersonalityTemplate,
    SkillDefinition, Voice,
};
pub use conversation::{Conversation, ConversationCreate, ConversationFilter, ConversationUpdate};
pub use message::{FlatMessageCreate, Message, MessageCreate, MessagePage, MessageRole};
pub use patch::Patch;
pub use user::{DefaultUserResponse, User};

use serde::Deserialize;

/// A request payload failed a field constraint
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Reject strings longer than `max` characters
pub(crate) fn check_max_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::new(
            field,
            format!("ensure this value has at most {} characters", max),
        )),
        _ => Ok(()),
    }
}

/// `?skip=&limit=` pagination
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.skip < 0 {
            return Err(ValidationError::new("skip", "must be greater than or equal to 0"));
        }
        if self.limit < 0 {
            return Err(ValidationError::new("limit", "must be greater than or equal to 0"));
        }
        Ok(())
    }
}
