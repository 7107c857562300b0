// Skill, agent and persona component records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A capability an assistant can be given.
///
/// `configuration` carries the routing rules:
/// `{"keywords": [...], "preferred": "<model>", "fallback": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillDefinition {
    pub id: Uuid,
    /// `None` for system-provided skills
    pub user_id: Option<Uuid>,
    pub skill_code: String,
    pub name: String,
    pub description: String,
    pub skill_type: String,
    pub configuration: Value,
    pub is_public: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SkillDefinition {
    /// Lowercased trigger keywords from the configuration
    pub fn keywords(&self) -> Vec<String> {
        self.configuration
            .get("keywords")
            .and_then(Value::as_array)
            .map(|words| {
                words
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_lowercase)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Model this skill prefers to run on
    pub fn preferred_model(&self) -> Option<&str> {
        self.configuration.get("preferred").and_then(Value::as_str)
    }
}

/// Link between an assistant and one of its skills
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantSkill {
    pub assistant_id: Uuid,
    pub skill_definition_id: Uuid,
    pub is_enabled: bool,
    pub priority: i32,
    pub custom_settings: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `PUT /assistants/{id}/skills/{skill_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantSkillUpdate {
    #[serde(default = "enabled")]
    pub is_enabled: bool,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub custom_settings: Option<Value>,
}

fn enabled() -> bool {
    true
}

fn default_priority() -> i32 {
    1
}

impl Default for AssistantSkillUpdate {
    fn default() -> Self {
        Self {
            is_enabled: enabled(),
            priority: default_priority(),
            custom_settings: None,
        }
    }
}

/// An enabled skill of one assistant together with its link priority
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EnabledSkill {
    pub priority: i32,
    #[serde(flatten)]
    pub definition: SkillDefinition,
}

/// A prompt playbook stored on disk and referenced by path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalityTemplate {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub personality_type: Option<String>,
    pub system_prompt: Option<String>,
    pub characteristics: Option<Value>,
    pub is_active: Option<bool>,
    pub is_public: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voice {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub provider: Option<String>,
    pub voice_id: Option<String>,
    pub language: Option<String>,
    pub gender: Option<String>,
    pub age_group: Option<String>,
    pub description: Option<String>,
    pub sample_url: Option<String>,
    pub settings: Option<Value>,
    pub is_active: Option<bool>,
    pub is_public: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Avatar {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub avatar_type: Option<String>,
    pub image_url: Option<String>,
    pub animated_url: Option<String>,
    pub style: Option<String>,
    pub gender: Option<String>,
    pub age_appearance: Option<String>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<Value>,
    pub is_active: Option<bool>,
    pub is_public: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn skill(configuration: Value) -> SkillDefinition {
        let now = Utc::now();
        SkillDefinition {
            id: Uuid::new_v4(),
            user_id: None,
            skill_code: "ANALYSIS".to_string(),
            name: "Data Analysis".to_string(),
            description: "Analyze data".to_string(),
            skill_type: "analysis".to_string(),
            configuration,
            is_public: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let s = skill(json!({ "keywords": ["Analysis", "DATA", 3] }));
        assert_eq!(s.keywords(), vec!["analysis".to_string(), "data".to_string()]);
    }

    #[test]
    fn test_missing_keywords() {
        let s = skill(json!({ "preferred": "claude-3-opus" }));
        assert!(s.keywords().is_empty());
    }

    #[test]
    fn test_preferred_model() {
        let s = skill(json!({ "preferred": "claude-3-opus", "fallback": ["gemini-pro"] }));
        assert_eq!(s.preferred_model(), Some("claude-3-opus"));
        assert_eq!(skill(json!({})).preferred_model(), None);
    }

    #[test]
    fn test_enabled_skill_flattens_definition() {
        let enabled = EnabledSkill {
            priority: 2,
            definition: skill(json!({})),
        };
        let value = serde_json::to_value(&enabled).unwrap();
        assert_eq!(value["priority"], 2);
        assert_eq!(value["skill_code"], "ANALYSIS");
    }

    #[test]
    fn test_assistant_skill_update_defaults() {
        let update: AssistantSkillUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.is_enabled);
        assert_eq!(update.priority, 1);
    }
}
