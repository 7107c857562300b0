use tracing::debug;

use super::types::AnalyzedTask;

pub const UNKNOWN_INTENT: &str = "unknown";

/// Turns a prompt into keywords
#[derive(Debug, Clone, Default)]
pub struct TaskAnalyzer;

impl TaskAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, prompt: &str) -> AnalyzedTask {
        let keywords = extract_keywords(prompt);
        let confidence = if keywords.is_empty() { 0.0 } else { 0.5 };
        debug!(keywords = ?keywords, "task analyzed");

        AnalyzedTask {
            keywords,
            intent: UNKNOWN_INTENT.to_string(),
            confidence,
        }
    }
}

/// Lowercased alphanumeric words in first-seen order, without repeats
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let word = word.to_lowercase();
        if !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords
}
