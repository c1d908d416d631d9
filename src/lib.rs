//! URL shortener served either as a JSON API or as a Telegram bot webhook,
//! both on top of a pluggable key-value store.

pub mod admin;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod store;
pub mod telegram;
