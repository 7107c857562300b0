// GET /ws/chat?conversation_id=<uuid> handler

use futures_util::{SinkExt, StreamExt};
use pin_utils::pin_mut;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use warp::ws::{Message, WebSocket, Ws};

use crate::chat::{ChatSession, ChatStore};
use crate::db::Database;
use crate::llm::ReplyGenerator;

/// Close code sent when the conversation does not exist
pub const CLOSE_NOT_FOUND: u16 = 4404;
/// Close code sent when the conversation could not be looked up
pub const CLOSE_INTERNAL_ERROR: u16 = 1011;

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub conversation_id: Uuid,
}

pub async fn chat_ws_handler(
    ws: Ws,
    query: ChatQuery,
    db: Database,
    generator: Arc<dyn ReplyGenerator>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let store: Arc<dyn ChatStore> = Arc::new(db);
    Ok(ws.on_upgrade(move |socket| run_chat(socket, store, generator, query.conversation_id)))
}

/// Close frame for a conversation that does not exist
fn close_not_found() -> Message {
    Message::close_with(CLOSE_NOT_FOUND, "conversation not found")
}

/// Close frame for a conversation lookup that failed
fn close_internal_error() -> Message {
    Message::close_with(CLOSE_INTERNAL_ERROR, "internal error")
}

async fn run_chat(
    socket: WebSocket,
    store: Arc<dyn ChatStore>,
    generator: Arc<dyn ReplyGenerator>,
    conversation_id: Uuid,
) {
    let (mut tx, mut rx) = socket.split();

    let session = match ChatSession::open(store, generator, conversation_id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            debug!(%conversation_id, "chat opened for unknown conversation");
            let _ = tx.send(close_not_found()).await;
            return;
        }
        Err(e) => {
            error!(%conversation_id, error = %e, "conversation lookup failed");
            let _ = tx.send(close_internal_error()).await;
            return;
        }
    };
    info!(%conversation_id, "chat session started");

    while let Some(incoming) = rx.next().await {
        let msg = match incoming {
            Ok(msg) => msg,
            Err(e) => {
                warn!(%conversation_id, error = %e, "websocket error");
                break;
            }
        };

        if msg.is_close() {
            break;
        }
        // Ping, pong and binary frames carry nothing for us
        let Ok(raw) = msg.to_str() else {
            continue;
        };

        let frames = session.respond(raw.to_string());
        pin_mut!(frames);
        while let Some(frame) = frames.next().await {
            if let Err(e) = tx.send(Message::text(frame.to_json())).await {
                debug!(%conversation_id, error = %e, "client went away mid-reply");
                return;
            }
        }
    }

    info!(%conversation_id, "chat session ended");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::llm::MockLlm;
    use crate::models::{Message as StoredMessage, MessageCreate};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use warp::Filter;

    #[derive(Default)]
    struct MemoryStore {
        known: Vec<Uuid>,
        broken: bool,
        messages: Mutex<Vec<MessageCreate>>,
    }

    #[async_trait]
    impl ChatStore for MemoryStore {
        async fn conversation_exists(&self, conversation_id: Uuid) -> db::Result<bool> {
            if self.broken {
                return Err(db::Error::ConnectionError("down".to_string()));
            }
            Ok(self.known.contains(&conversation_id))
        }

        async fn append_message(
            &self,
            conversation_id: Uuid,
            message: MessageCreate,
        ) -> db::Result<StoredMessage> {
            self.messages.lock().unwrap().push(message.clone());
            Ok(StoredMessage {
                id: Uuid::new_v4(),
                conversation_id,
                role: message.role,
                content: Some(message.content),
                content_type: Some("text".to_string()),
                parent_id: None,
                metadata: None,
                created_at: Utc::now(),
            })
        }
    }

    fn chat_filter(
        store: Arc<MemoryStore>,
        conversation_id: Uuid,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::ws().map(move |ws: Ws| {
            let store: Arc<dyn ChatStore> = store.clone();
            let generator: Arc<dyn ReplyGenerator> = Arc::new(MockLlm::new());
            ws.on_upgrade(move |socket| run_chat(socket, store, generator, conversation_id))
        })
    }

    async fn recv_json(client: &mut warp::test::WsClient) -> serde_json::Value {
        let msg = client.recv().await.unwrap();
        serde_json::from_str(msg.to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_close_frames_carry_codes() {
        assert_eq!(
            close_not_found().close_frame(),
            Some((4404, "conversation not found"))
        );
        assert_eq!(close_internal_error().close_frame(), Some((1011, "internal error")));
    }

    #[tokio::test]
    async fn test_unknown_conversation_closes_socket() {
        let store = Arc::new(MemoryStore::default());
        let mut client = warp::test::ws()
            .handshake(chat_filter(store, Uuid::new_v4()))
            .await
            .unwrap();
        assert!(client.recv_closed().await.is_ok());
    }

    #[tokio::test]
    async fn test_lookup_failure_closes_socket() {
        let store = Arc::new(MemoryStore {
            broken: true,
            ..MemoryStore::default()
        });
        let mut client = warp::test::ws()
            .handshake(chat_filter(store, Uuid::new_v4()))
            .await
            .unwrap();
        assert!(client.recv_closed().await.is_ok());
    }

    #[tokio::test]
    async fn test_turn_over_socket() {
        let conversation_id = Uuid::new_v4();
        let store = Arc::new(MemoryStore {
            known: vec![conversation_id],
            ..MemoryStore::default()
        });
        let mut client = warp::test::ws()
            .handshake(chat_filter(store.clone(), conversation_id))
            .await
            .unwrap();

        // Binary frames are skipped without a reply
        client.send(Message::binary(vec![1, 2, 3])).await;
        client
            .send_text(r#"{"type":"user_message","text":"hi"}"#)
            .await;

        assert_eq!(recv_json(&mut client).await["type"], "assistant_start");
        let mut tokens = Vec::new();
        loop {
            let frame = recv_json(&mut client).await;
            match frame["type"].as_str() {
                Some("token") => tokens.push(frame["text"].as_str().unwrap().to_string()),
                Some("assistant_end") => {
                    assert_eq!(frame["message"], "You said: hi ");
                    break;
                }
                other => panic!("unexpected frame {:?}", other),
            }
        }
        assert_eq!(tokens, vec!["You ", "said: ", "hi "]);

        // A bad frame answers with an error and the session stays open
        client.send_text("not json").await;
        let frame = recv_json(&mut client).await;
        assert_eq!(frame["type"], "error");
        assert_eq!(frame["message"], "invalid payload");

        client.send_text(r#"{"text":"again"}"#).await;
        assert_eq!(recv_json(&mut client).await["type"], "assistant_start");

        let stored = store.messages.lock().unwrap().len();
        assert!(stored >= 3, "stored {} messages", stored);
    }
}
