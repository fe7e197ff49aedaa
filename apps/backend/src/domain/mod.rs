//! Domain layer: pure scoring and progression rules for Call Break.

pub mod progression;
pub mod rules;
pub mod scoring;
pub mod state;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_progression;
#[cfg(test)]
mod tests_props_scoring;

// Re-exports for ergonomics
pub use progression::{submit_round, RoundOutcome, RoundResolution};
pub use scoring::{Points, TiePolicy};
pub use state::{EntrySubmission, GameState, GameStatus, Round, RoundEntry, RoundSubmission};
