// Read access to the skill and agent catalogs

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::{self, Database};
use crate::models::{Agent, EnabledSkill};

#[async_trait]
pub trait SkillCatalog: Send + Sync {
    /// Enabled, active skills of an assistant
    async fn enabled_skills(&self, assistant_id: Uuid) -> db::Result<Vec<EnabledSkill>>;
}

#[async_trait]
pub trait AgentCatalog: Send + Sync {
    async fn agents(&self) -> db::Result<Vec<Agent>>;
}

#[async_trait]
impl SkillCatalog for Database {
    async fn enabled_skills(&self, assistant_id: Uuid) -> db::Result<Vec<EnabledSkill>> {
        self.list_enabled_skills(assistant_id).await
    }
}

#[async_trait]
impl AgentCatalog for Database {
    async fn agents(&self) -> db::Result<Vec<Agent>> {
        self.list_agents().await
    }
}
