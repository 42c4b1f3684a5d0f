//! HTTP API

pub mod rest;

pub use rest::negotiate::{negotiate, wants_structured};
pub use rest::router::create_router;
pub use rest::state::AppState;
