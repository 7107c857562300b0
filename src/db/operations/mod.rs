pub mod assistants;
pub mod catalog;
pub mod conversations;
pub mod messages;
pub mod users;

pub use assistants::{
    create_assistant, delete_assistant, get_assistant, list_assistants, update_assistant,
};
pub use catalog::{
    get_skill_definition, list_agents, list_avatars, list_enabled_skills,
    list_personality_templates, list_skill_definitions, list_voices, remove_assistant_skill,
    upsert_assistant_skill,
};
pub use conversations::{
    conversation_exists, create_conversation, delete_conversation, get_conversation,
    list_conversations, update_conversation,
};
pub use messages::{create_message, list_all_messages, list_messages};
pub use users::{ensure_default_user, get_default_user, get_user, DefaultUserSpec, EnsureOutcome};
