//! Canned generator that echoes the prompt

use async_trait::async_trait;
use std::time::Duration;

use super::error::LlmError;
use super::provider::{ReplyGenerator, ReplyRequest, TokenStream};

/// Replies `You said: {prompt}`, one word per token
#[derive(Debug, Clone, Default)]
pub struct MockLlm {
    delay: Duration,
}

impl MockLlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pause between tokens (builder pattern)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The tokens that make up the reply to `prompt`
    pub fn tokens_for(prompt: &str) -> Vec<String> {
        format!("You said: {}", prompt)
            .split(' ')
            .map(|word| format!("{} ", word))
            .collect()
    }
}

#[async_trait]
impl ReplyGenerator for MockLlm {
    async fn stream_reply(&self, request: ReplyRequest) -> Result<TokenStream, LlmError> {
        if request.prompt.trim().is_empty() {
            return Err(LlmError::InvalidRequest("empty prompt".to_string()));
        }

        let tokens = Self::tokens_for(&request.prompt)
            .into_iter()
            .map(Ok::<_, LlmError>);
        let tokens = tokio_stream::iter(tokens);

        if self.delay.is_zero() {
            return Ok(Box::pin(tokens));
        }
        Ok(Box::pin(tokio_stream::StreamExt::throttle(tokens, self.delay)))
    }
}
