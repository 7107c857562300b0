use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db;

/// What the analyzer understood from a prompt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzedTask {
    pub keywords: Vec<String>,
    pub intent: String,
    pub confidence: f32,
}

/// Model, agent and skills chosen for a prompt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingDecision {
    pub llm_model: String,
    pub agent_path: String,
    pub skills: Vec<String>,
    pub reasoning: Option<String>,
}

/// Body of `POST /routing/route`
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingRequest {
    pub prompt: String,
    pub assistant_id: Uuid,
}

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("catalog lookup failed: {0}")]
    Catalog(#[from] db::Error),
}

pub type Result<T> = std::result::Result<T, RoutingError>;
