// JSON frames exchanged over the chat socket

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const USER_MESSAGE: &str = "user_message";

/// Frame sent by the browser
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ClientFrame {
    #[serde(rename = "type", default)]
    pub frame_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Frame sent to the browser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    AssistantStart,
    Token { text: String },
    AssistantEnd { message: String },
    Error { message: String },
}

impl ServerFrame {
    pub fn error(message: impl Into<String>) -> Self {
        ServerFrame::Error {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        // Serializing a fieldless or string-only enum cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"error"}"#.to_string())
    }
}

/// Extract the user's text from a raw frame, or the error frame to answer with.
///
/// A missing `type` is treated as a user message; `null` counts as an empty frame.
pub fn parse_user_text(raw: &str) -> Result<String, ServerFrame> {
    let value: Value =
        serde_json::from_str(raw).map_err(|_| ServerFrame::error("invalid payload"))?;

    let frame = match value {
        Value::Null => ClientFrame::default(),
        Value::Object(_) => serde_json::from_value::<ClientFrame>(value)
            .map_err(|_| ServerFrame::error("invalid payload"))?,
        _ => return Err(ServerFrame::error("invalid payload")),
    };

    if let Some(kind) = frame.frame_type.as_deref() {
        if kind != USER_MESSAGE {
            return Err(ServerFrame::error("unsupported frame type"));
        }
    }

    match frame.text {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ServerFrame::error("empty text")),
    }
}
