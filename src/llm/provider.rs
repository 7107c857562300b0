//! Reply generator trait

use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;

use super::error::LlmError;

/// Stream of reply tokens
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

/// Input for one assistant turn
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyRequest {
    /// The user's message
    pub prompt: String,
}

impl ReplyRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Anything that can stream an assistant reply token by token
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Start generating a reply.
    ///
    /// Tokens concatenate to the full reply text.
    async fn stream_reply(&self, request: ReplyRequest) -> Result<TokenStream, LlmError>;
}
