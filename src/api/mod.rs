//! HTTP API for the booking agent.
//!
//! ## Endpoints
//!
//! - `POST /api/agent` - Send `{message, userId}`, receive `{response, userId}`
//! - `GET /api/health` - Health check

mod agent;
mod routes;
pub mod types;

pub use routes::{router, serve, AppState};
