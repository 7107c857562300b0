// Handlers module

pub mod assistants;
pub mod catalog;
pub mod chat;
pub mod conversations;
pub mod health;
pub mod messages;
pub mod routing;
pub mod skills;
pub mod users;

pub use assistants::{
    create_assistant_handler, delete_assistant_handler, get_assistant_handler,
    list_assistants_handler, update_assistant_handler,
};
pub use catalog::{
    list_agents_handler, list_avatars_handler, list_personality_templates_handler,
    list_skills_handler, list_voices_handler,
};
pub use chat::chat_ws_handler;
pub use conversations::{
    add_message_handler, create_conversation_handler, delete_conversation_handler,
    get_conversation_handler, list_conversation_messages_handler, list_conversations_handler,
    update_conversation_handler,
};
pub use health::health_handler;
pub use messages::{create_message_handler, list_messages_by_conversation_handler};
pub use routing::route_handler;
pub use skills::{
    delete_assistant_skill_handler, list_assistant_skills_handler, put_assistant_skill_handler,
};
pub use users::get_default_user_handler;
