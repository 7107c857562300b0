use tracing::debug;

use crate::models::{SkillDefinition, DEFAULT_LLM_MODEL};

/// Chooses the model for a set of matched skills
#[derive(Debug, Clone, Default)]
pub struct LlmRouter;

impl LlmRouter {
    pub fn new() -> Self {
        Self
    }

    /// The first skill's preferred model, else the default model
    pub fn select_llm(&self, skills: &[SkillDefinition]) -> String {
        let model = skills
            .first()
            .and_then(SkillDefinition::preferred_model)
            .unwrap_or(DEFAULT_LLM_MODEL)
            .to_string();
        debug!(%model, "model selected");
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::{json, Value};
    use uuid::Uuid;

    fn skill(configuration: Value) -> SkillDefinition {
        SkillDefinition {
            id: Uuid::new_v4(),
            user_id: None,
            skill_code: "X".to_string(),
            name: "x".to_string(),
            description: "x".to_string(),
            skill_type: "x".to_string(),
            configuration,
            is_public: true,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_skills_uses_default() {
        assert_eq!(LlmRouter::new().select_llm(&[]), "gemini-pro");
    }

    #[test]
    fn test_first_skill_wins() {
        let skills = vec![
            skill(json!({ "preferred": "claude-3-opus" })),
            skill(json!({ "preferred": "gpt-4-turbo" })),
        ];
        assert_eq!(LlmRouter::new().select_llm(&skills), "claude-3-opus");
    }

    #[test]
    fn test_skill_without_preference() {
        let skills = vec![skill(json!({ "keywords": ["x"] }))];
        assert_eq!(LlmRouter::new().select_llm(&skills), "gemini-pro");
    }
}
