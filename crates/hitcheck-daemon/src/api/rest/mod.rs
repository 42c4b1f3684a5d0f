//! REST API: router, shared state, handlers and content negotiation

pub mod handlers;
pub mod negotiate;
pub mod router;
pub mod state;
