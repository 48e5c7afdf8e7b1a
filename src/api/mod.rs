//! REST API for the MedTracker dashboard.
//!
//! Exposes the roster, dashboard and report view-models as JSON. Routes are
//! nested under `/api/` and wrapped by the access-log middleware.
//!
//! The router is composable: `api_router()` returns a `Router` that can be
//! mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession, ServerError};
pub use types::ApiContext;
