use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{check_max_len, Patch, ValidationError};

/// Model names an assistant may be configured with
pub const ALLOWED_MODELS: [&str; 3] = ["gemini-pro", "gpt-4", "claude-3-opus"];

/// Model assigned when a create request omits `default_llm_model`
pub const DEFAULT_LLM_MODEL: &str = "gemini-pro";

const NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 500;
const MODEL_MAX: usize = 100;
const SYSTEM_PROMPT_MAX: usize = 2000;

/// An AI persona owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assistant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub personality_template_id: Option<Uuid>,
    pub voice_id: Option<Uuid>,
    pub avatar_id: Option<Uuid>,
    pub default_llm_model: Option<String>,
    pub custom_system_prompt: Option<String>,
    pub is_active: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assistant {
    /// Apply a validated partial update in place
    pub fn apply(&mut self, update: AssistantUpdate) {
        if let Patch::Set(name) = update.name {
            self.name = name;
        }
        update.description.apply_to(&mut self.description);
        update.default_llm_model.apply_to(&mut self.default_llm_model);
        update
            .custom_system_prompt
            .apply_to(&mut self.custom_system_prompt);
        update
            .personality_template_id
            .apply_to(&mut self.personality_template_id);
        update.voice_id.apply_to(&mut self.voice_id);
        update.avatar_id.apply_to(&mut self.avatar_id);
    }
}

fn default_model() -> Option<String> {
    Some(DEFAULT_LLM_MODEL.to_string())
}

fn validate_model(model: &str) -> Result<(), ValidationError> {
    check_max_len("default_llm_model", Some(model), MODEL_MAX)?;
    if !ALLOWED_MODELS.contains(&model) {
        return Err(ValidationError::new("default_llm_model", "Unsupported model"));
    }
    Ok(())
}

/// Body of `POST /assistants`
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_model")]
    pub default_llm_model: Option<String>,
    #[serde(default)]
    pub custom_system_prompt: Option<String>,
    #[serde(default)]
    pub personality_template_id: Option<Uuid>,
    #[serde(default)]
    pub voice_id: Option<Uuid>,
    #[serde(default)]
    pub avatar_id: Option<Uuid>,
}

impl AssistantCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default_llm_model: default_model(),
            custom_system_prompt: None,
            personality_template_id: None,
            voice_id: None,
            avatar_id: None,
        }
    }

    /// Set the description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the model (builder pattern)
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_llm_model = Some(model.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new(
                "name",
                "ensure this value has at least 1 characters",
            ));
        }
        check_max_len("name", Some(&self.name), NAME_MAX)?;
        check_max_len("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        check_max_len(
            "custom_system_prompt",
            self.custom_system_prompt.as_deref(),
            SYSTEM_PROMPT_MAX,
        )?;
        // Absent defaults to gemini-pro; an explicit null is not a model
        match &self.default_llm_model {
            Some(model) => validate_model(model),
            None => Err(ValidationError::new("default_llm_model", "Unsupported model")),
        }
    }
}

/// Body of `PUT /assistants/{id}`; every field optional, empty strings clear
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantUpdate {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub default_llm_model: Patch<String>,
    #[serde(default)]
    pub custom_system_prompt: Patch<String>,
    #[serde(default)]
    pub personality_template_id: Patch<Uuid>,
    #[serde(default)]
    pub voice_id: Patch<Uuid>,
    #[serde(default)]
    pub avatar_id: Patch<Uuid>,
}

impl AssistantUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        // name is NOT NULL in the schema
        if matches!(self.name, Patch::Clear) {
            return Err(ValidationError::new("name", "may not be null"));
        }
        check_max_len("name", self.name.as_set().map(String::as_str), NAME_MAX)?;
        check_max_len(
            "description",
            self.description.as_set().map(String::as_str),
            DESCRIPTION_MAX,
        )?;
        check_max_len(
            "custom_system_prompt",
            self.custom_system_prompt.as_set().map(String::as_str),
            SYSTEM_PROMPT_MAX,
        )?;
        if let Some(model) = self.default_llm_model.as_set() {
            validate_model(model)?;
        }
        Ok(())
    }
}
