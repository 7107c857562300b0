use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use super::frames::{parse_user_text, ServerFrame};
use crate::db::{self, Database};
use crate::llm::{ReplyGenerator, ReplyRequest};
use crate::models::{Message, MessageCreate, MessageRole};

/// Persistence needed by a chat session
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn conversation_exists(&self, conversation_id: Uuid) -> db::Result<bool>;

    async fn append_message(
        &self,
        conversation_id: Uuid,
        message: MessageCreate,
    ) -> db::Result<Message>;
}

#[async_trait]
impl ChatStore for Database {
    async fn conversation_exists(&self, conversation_id: Uuid) -> db::Result<bool> {
        Database::conversation_exists(self, conversation_id).await
    }

    async fn append_message(
        &self,
        conversation_id: Uuid,
        message: MessageCreate,
    ) -> db::Result<Message> {
        self.create_message(conversation_id, &message).await
    }
}

/// One socket's conversation loop
#[derive(Clone)]
pub struct ChatSession {
    conversation_id: Uuid,
    store: Arc<dyn ChatStore>,
    generator: Arc<dyn ReplyGenerator>,
}

impl ChatSession {
    /// `None` when the conversation does not exist
    pub async fn open(
        store: Arc<dyn ChatStore>,
        generator: Arc<dyn ReplyGenerator>,
        conversation_id: Uuid,
    ) -> db::Result<Option<Self>> {
        if !store.conversation_exists(conversation_id).await? {
            return Ok(None);
        }
        Ok(Some(Self {
            conversation_id,
            store,
            generator,
        }))
    }

    /// Frames answering one inbound text frame.
    ///
    /// Stores the user message, streams the reply tokens, then stores the
    /// full reply. Failures end the turn with an error frame.
    pub fn respond(&self, raw: String) -> impl Stream<Item = ServerFrame> + Send + 'static {
        let session = self.clone();

        stream! {
            let text = match parse_user_text(&raw) {
                Ok(text) => text,
                Err(frame) => {
                    yield frame;
                    return;
                }
            };

            let user_message = MessageCreate::new(MessageRole::User, text.clone());
            if let Err(e) = session.store.append_message(session.conversation_id, user_message).await {
                error!(conversation_id = %session.conversation_id, error = %e, "failed to store user message");
                yield ServerFrame::error("failed to store message");
                return;
            }

            yield ServerFrame::AssistantStart;

            let mut tokens = match session.generator.stream_reply(ReplyRequest::new(text)).await {
                Ok(tokens) => tokens,
                Err(e) => {
                    error!(conversation_id = %session.conversation_id, error = %e, "reply generation failed");
                    yield ServerFrame::error("reply generation failed");
                    return;
                }
            };

            let mut collected = String::new();
            while let Some(token) = tokens.next().await {
                match token {
                    Ok(token) => {
                        collected.push_str(&token);
                        yield ServerFrame::Token { text: token };
                    }
                    Err(e) => {
                        error!(conversation_id = %session.conversation_id, error = %e, "reply stream failed");
                        yield ServerFrame::error("reply generation failed");
                        return;
                    }
                }
            }

            let reply = MessageCreate::new(MessageRole::Assistant, collected.clone());
            if let Err(e) = session.store.append_message(session.conversation_id, reply).await {
                error!(conversation_id = %session.conversation_id, error = %e, "failed to store assistant message");
                yield ServerFrame::error("failed to store message");
                return;
            }

            debug!(conversation_id = %session.conversation_id, chars = collected.len(), "assistant turn complete");
            yield ServerFrame::AssistantEnd { message: collected };
        }
    }
}
