//! Prompt routing
//!
//! [`RoutingOrchestrator::route`] runs four steps in order: keyword analysis
//! of the prompt, matching against the assistant's enabled skills, model
//! choice from the best skill, and agent playbook choice from the agent
//! catalog.

pub mod agent_selector;
pub mod catalog;
pub mod llm_router;
pub mod skill_matcher;
pub mod task_analyzer;
pub mod types;

pub use agent_selector::{AgentSelector, DEFAULT_AGENT_PATH};
pub use catalog::{AgentCatalog, SkillCatalog};
pub use llm_router::LlmRouter;
pub use skill_matcher::SkillMatcher;
pub use task_analyzer::TaskAnalyzer;
pub use types::{AnalyzedTask, Result, RoutingDecision, RoutingError, RoutingRequest};

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::db::Database;

/// Runs the routing steps for one prompt
#[derive(Clone)]
pub struct RoutingOrchestrator {
    task_analyzer: TaskAnalyzer,
    skill_matcher: SkillMatcher,
    llm_router: LlmRouter,
    agent_selector: AgentSelector,
}

impl RoutingOrchestrator {
    pub fn new(skills: Arc<dyn SkillCatalog>, agents: Arc<dyn AgentCatalog>) -> Self {
        Self {
            task_analyzer: TaskAnalyzer::new(),
            skill_matcher: SkillMatcher::new(skills),
            llm_router: LlmRouter::new(),
            agent_selector: AgentSelector::new(agents),
        }
    }

    /// Orchestrator backed by the database catalogs
    pub fn from_database(db: &Database) -> Self {
        let db = Arc::new(db.clone());
        Self::new(db.clone(), db)
    }

    pub async fn route(&self, prompt: &str, assistant_id: Uuid) -> Result<RoutingDecision> {
        let task = self.task_analyzer.analyze(prompt);
        let skills = self
            .skill_matcher
            .find_required_skills(&task, assistant_id)
            .await?;
        let llm_model = self.llm_router.select_llm(&skills);
        let agent_path = self.agent_selector.select_agent(&task).await?;

        let skills: Vec<String> = skills.into_iter().map(|s| s.name).collect();
        let reasoning = if skills.is_empty() {
            "No assistant skill matched the prompt; using the default model".to_string()
        } else {
            format!("Matched skills: {}", skills.join(", "))
        };

        info!(%assistant_id, %llm_model, %agent_path, "routing decided");
        Ok(RoutingDecision {
            llm_model,
            agent_path,
            skills,
            reasoning: Some(reasoning),
        })
    }
}
