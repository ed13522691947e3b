//! # REST API
//!
//! Thin axum adapter over the internal API: each handler merges path, query
//! and body parameters into one map, attaches the caller's tenant context and
//! hands both to an operation.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod tenant;
pub(crate) mod util;

pub use routes::{build_router, ApiState};
pub use server::start_api_server;
