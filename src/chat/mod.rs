//! WebSocket chat over a stored conversation
//!
//! Each inbound `user_message` frame produces `assistant_start`, a run of
//! `token` frames and `assistant_end`. Both sides of the exchange are stored
//! as messages of the conversation.

pub mod frames;
pub mod session;

pub use frames::{parse_user_text, ClientFrame, ServerFrame};
pub use session::{ChatSession, ChatStore};
