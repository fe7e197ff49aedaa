#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use config::db::{db_url, DbProfile};
pub use config::game::GameConfig;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use extractors::{GameId, ValidatedJson};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
pub use services::games::GameService;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
