//! Repository layer: domain-typed persistence over the SeaORM adapters.

pub mod games;
pub mod rounds;
