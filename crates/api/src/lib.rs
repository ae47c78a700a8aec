//! Solar Quote API
//!
//! Axum router, handlers and middleware for the solar quote wizard.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use router::create_router;
pub use state::AppState;

#[cfg(feature = "openapi")]
pub mod openapi;
