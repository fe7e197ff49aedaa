//! Adapters for external dependencies.

pub mod games_sea;
pub mod rounds_sea;
