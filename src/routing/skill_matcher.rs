use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::catalog::SkillCatalog;
use super::types::{AnalyzedTask, Result};
use crate::models::{EnabledSkill, SkillDefinition};

/// Picks the assistant skills a task calls for
#[derive(Clone)]
pub struct SkillMatcher {
    catalog: Arc<dyn SkillCatalog>,
}

impl SkillMatcher {
    pub fn new(catalog: Arc<dyn SkillCatalog>) -> Self {
        Self { catalog }
    }

    /// Enabled skills of the assistant with a keyword in the task, by priority then name.
    ///
    /// An unknown assistant simply has no skills.
    pub async fn find_required_skills(
        &self,
        task: &AnalyzedTask,
        assistant_id: Uuid,
    ) -> Result<Vec<SkillDefinition>> {
        let mut skills: Vec<EnabledSkill> = self
            .catalog
            .enabled_skills(assistant_id)
            .await?
            .into_iter()
            .filter(|skill| {
                skill
                    .definition
                    .keywords()
                    .iter()
                    .any(|k| task.keywords.contains(k))
            })
            .collect();

        skills.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.definition.name.cmp(&b.definition.name))
        });

        debug!(%assistant_id, matched = skills.len(), "skills matched");
        Ok(skills.into_iter().map(|s| s.definition).collect())
    }
}
