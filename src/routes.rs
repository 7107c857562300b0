// Route definitions and handlers

use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use warp::Filter;

use crate::config::AppConfig;
use crate::db::{Database, DefaultUserSpec};
use crate::error::handle_rejection;
use crate::handlers;
use crate::handlers::chat::ChatQuery;
use crate::llm::ReplyGenerator;
use crate::models::{ConversationFilter, MessagePage, Pagination};

/// Largest accepted JSON body
const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub fn configure_routes(
    db: Database,
    config: &AppConfig,
    generator: Arc<dyn ReplyGenerator>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let default_user = Arc::new(config.default_user.clone());

    let routes = health()
        .or(assistant_routes(db.clone()))
        .or(skill_routes(db.clone()))
        .or(conversation_routes(db.clone()))
        .or(message_routes(db.clone()))
        .or(user_routes(db.clone(), default_user))
        .or(routing_routes(db.clone()))
        .or(catalog_routes(db.clone()))
        .or(chat_routes(db, generator))
        .recover(handle_rejection);

    routes
        .with(cors(&config.cors_origins_list()))
        .with(warp::log::custom(|request| {
            info!(
                target: "ai_secretary::http",
                method = %request.method(),
                path = request.path(),
                status = request.status().as_u16(),
                elapsed_ms = request.elapsed().as_millis() as u64,
                "request"
            );
        }))
}

fn api() -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
    warp::path("api").and(warp::path("v1"))
}

fn with_db(db: Database) -> impl Filter<Extract = (Database,), Error = Infallible> + Clone {
    warp::any().map(move || db.clone())
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

// GET /health
fn health() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler)
}

fn assistant_routes(
    db: Database,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let assistants = api().and(warp::path("assistants"));

    // POST /assistants
    let create = assistants
        .clone()
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(handlers::create_assistant_handler);

    // GET /assistants?skip=&limit=
    let list = assistants
        .clone()
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<Pagination>())
        .and(with_db(db.clone()))
        .and_then(handlers::list_assistants_handler);

    // GET /assistants/{id}
    let get = assistants
        .clone()
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_db(db.clone()))
        .and_then(handlers::get_assistant_handler);

    // PUT /assistants/{id}
    let update = assistants
        .clone()
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::put())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(handlers::update_assistant_handler);

    // DELETE /assistants/{id}
    let delete = assistants
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_db(db))
        .and_then(handlers::delete_assistant_handler);

    create.or(list).or(get).or(update).or(delete)
}

fn skill_routes(
    db: Database,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let skills = api()
        .and(warp::path("assistants"))
        .and(warp::path::param::<Uuid>())
        .and(warp::path("skills"));

    // GET /assistants/{id}/skills
    let list = skills
        .clone()
        .and(warp::path::end())
        .and(warp::get())
        .and(with_db(db.clone()))
        .and_then(handlers::list_assistant_skills_handler);

    // PUT /assistants/{id}/skills/{skill_id}
    let put = skills
        .clone()
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::put())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(handlers::put_assistant_skill_handler);

    // DELETE /assistants/{id}/skills/{skill_id}
    let delete = skills
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_db(db))
        .and_then(handlers::delete_assistant_skill_handler);

    list.or(put).or(delete)
}

fn conversation_routes(
    db: Database,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let conversations = api().and(warp::path("conversations"));

    // POST /conversations
    let create = conversations
        .clone()
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(handlers::create_conversation_handler);

    // GET /conversations?assistant_id=&skip=&limit=
    let list = conversations
        .clone()
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<ConversationFilter>())
        .and(with_db(db.clone()))
        .and_then(handlers::list_conversations_handler);

    // GET /conversations/{id}
    let get = conversations
        .clone()
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_db(db.clone()))
        .and_then(handlers::get_conversation_handler);

    // PUT /conversations/{id}
    let update = conversations
        .clone()
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::put())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(handlers::update_conversation_handler);

    // DELETE /conversations/{id}
    let delete = conversations
        .clone()
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_db(db.clone()))
        .and_then(handlers::delete_conversation_handler);

    // POST /conversations/{id}/messages
    let add_message = conversations
        .clone()
        .and(warp::path::param::<Uuid>())
        .and(warp::path("messages"))
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(handlers::add_message_handler);

    // GET /conversations/{id}/messages
    let list_messages = conversations
        .and(warp::path::param::<Uuid>())
        .and(warp::path("messages"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_db(db))
        .and_then(handlers::list_conversation_messages_handler);

    create
        .or(list)
        .or(get)
        .or(update)
        .or(delete)
        .or(add_message)
        .or(list_messages)
}

fn message_routes(
    db: Database,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let messages = api().and(warp::path("messages"));

    // POST /messages
    let create = messages
        .clone()
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with_db(db.clone()))
        .and_then(handlers::create_message_handler);

    // GET /messages/by-conversation/{id}?limit=&offset=
    let by_conversation = messages
        .and(warp::path("by-conversation"))
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<MessagePage>())
        .and(with_db(db))
        .and_then(handlers::list_messages_by_conversation_handler);

    create.or(by_conversation)
}

fn user_routes(
    db: Database,
    default_user: Arc<DefaultUserSpec>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // GET /users/default
    api()
        .and(warp::path("users"))
        .and(warp::path("default"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_db(db))
        .and(warp::any().map(move || default_user.clone()))
        .and_then(handlers::get_default_user_handler)
}

fn routing_routes(
    db: Database,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // POST /routing/route
    api()
        .and(warp::path("routing"))
        .and(warp::path("route"))
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(with_db(db))
        .and_then(handlers::route_handler)
}

fn catalog_routes(
    db: Database,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let get = |name: &'static str| api().and(warp::path(name)).and(warp::path::end()).and(warp::get());

    let skills = get("skills")
        .and(with_db(db.clone()))
        .and_then(handlers::list_skills_handler);
    let agents = get("agents")
        .and(with_db(db.clone()))
        .and_then(handlers::list_agents_handler);
    let templates = get("personality-templates")
        .and(with_db(db.clone()))
        .and_then(handlers::list_personality_templates_handler);
    let voices = get("voices")
        .and(with_db(db.clone()))
        .and_then(handlers::list_voices_handler);
    let avatars = get("avatars")
        .and(with_db(db))
        .and_then(handlers::list_avatars_handler);

    skills.or(agents).or(templates).or(voices).or(avatars)
}

fn chat_routes(
    db: Database,
    generator: Arc<dyn ReplyGenerator>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // GET /ws/chat?conversation_id=<uuid>
    api()
        .and(warp::path("ws"))
        .and(warp::path("chat"))
        .and(warp::path::end())
        .and(warp::ws())
        .and(warp::query::<ChatQuery>())
        .and(with_db(db))
        .and(warp::any().map(move || generator.clone()))
        .and_then(handlers::chat_ws_handler)
}

fn cors(origins: &[String]) -> warp::cors::Builder {
    let builder = warp::cors()
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_headers(vec!["content-type", "authorization", "accept"])
        .allow_credentials(true);

    if origins.iter().any(|origin| origin == "*") {
        return builder.allow_any_origin();
    }

    let valid: Vec<&str> = origins
        .iter()
        .map(String::as_str)
        .filter(|origin| {
            let ok = is_valid_origin(origin);
            if !ok {
                warn!(%origin, "ignoring malformed CORS origin");
            }
            ok
        })
        .collect();
    builder.allow_origins(valid)
}

/// `scheme://host[:port]` with nothing after the authority
fn is_valid_origin(origin: &str) -> bool {
    match origin.split_once("://") {
        Some((scheme, authority)) => {
            !scheme.is_empty()
                && !authority.is_empty()
                && !authority.contains('/')
                && authority
                    .rsplit_once(':')
                    .map_or(true, |(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
        }
        None => false,
    }
}
