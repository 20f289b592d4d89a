//! Middleware Module
//!
//! HTTP middleware that runs before handlers.
//!
//! - **`auth`** - Bearer-token authentication for protected routes
//! - **`json`** - `ValidatedJson`, a body extractor that rejects with field maps
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn_with_state, routing::get, Router};
//! use userauths::backend::middleware::auth_middleware;
//! use userauths::backend::server::AppState;
//!
//! fn protected(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/private", get(|| async { "ok" }))
//!         .route_layer(from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;
pub mod json;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use json::ValidatedJson;
