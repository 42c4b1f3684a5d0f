//! Hitcheck daemon library
//!
//! This module provides the HTTP side of the hit checker:
//! - REST handlers and content negotiation
//! - Layered configuration
//! - Server lifecycle management

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use api::{create_router, AppState};
pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError, DaemonResult};
pub use server::Server;
