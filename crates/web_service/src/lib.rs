//! # Web Service
//!
//! HTTP front end for session-scoped todo lists. Each browser session gets
//! its own [`list_store::ListCollection`], held in memory by the
//! [`services::SessionStore`] and addressed through a session cookie.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod server;
pub mod services;

pub use config::{load_server_config, ServerConfig};
