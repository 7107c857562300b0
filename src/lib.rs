// HTTP server modules
pub mod error;
pub mod handlers;
pub mod routes;

// Domain records and persistence
pub mod db;
pub mod models;

// Chat, reply generation and prompt routing
pub mod chat;
pub mod llm;
pub mod routing;

// Runtime setup
pub mod config;
pub mod logging;
