use std::sync::Arc;
use tracing::debug;

use super::catalog::AgentCatalog;
use super::task_analyzer::extract_keywords;
use super::types::{AnalyzedTask, Result};
use crate::models::Agent;

/// Playbook used when no agent stands out
pub const DEFAULT_AGENT_PATH: &str = "agents/system/default.md";

/// Chooses the agent playbook for a task
#[derive(Clone)]
pub struct AgentSelector {
    catalog: Arc<dyn AgentCatalog>,
}

impl AgentSelector {
    pub fn new(catalog: Arc<dyn AgentCatalog>) -> Self {
        Self { catalog }
    }

    /// Path of the agent sharing the most keywords with the task.
    ///
    /// No overlap, or a tie for first place, yields [`DEFAULT_AGENT_PATH`].
    pub async fn select_agent(&self, task: &AnalyzedTask) -> Result<String> {
        let agents = self.catalog.agents().await?;

        let mut best: Option<(&Agent, usize)> = None;
        let mut tied = false;
        for agent in &agents {
            let score = overlap(agent, &task.keywords);
            if score == 0 {
                continue;
            }
            match best {
                Some((_, top)) if score < top => {}
                Some((_, top)) if score == top => tied = true,
                _ => {
                    best = Some((agent, score));
                    tied = false;
                }
            }
        }

        let path = match best {
            Some((agent, _)) if !tied => agent.file_path.clone(),
            _ => DEFAULT_AGENT_PATH.to_string(),
        };
        debug!(%path, "agent selected");
        Ok(path)
    }
}

fn overlap(agent: &Agent, keywords: &[String]) -> usize {
    let mut words = extract_keywords(&agent.name);
    if let Some(description) = &agent.description {
        words.extend(extract_keywords(description));
    }
    keywords.iter().filter(|k| words.contains(k)).count()
}
