//! X1 Sentinel HTTP API Module
//! REST endpoints for address checks and registry reports

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;
