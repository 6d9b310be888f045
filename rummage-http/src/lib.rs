//! HTTP layer for the rummage search engine: axum handlers, the admin auth
//! gate, and the storefront response envelopes.

pub mod auth;
pub mod dto;
pub mod handlers;
pub mod server;

pub use server::{router, serve, ServerConfig};
