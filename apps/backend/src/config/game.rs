use std::env;

use crate::domain::scoring::TiePolicy;
use crate::error::AppError;

/// Game rule settings read at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub tie_policy: TiePolicy,
}

impl GameConfig {
    /// Read `TIE_POLICY` (`first_seat` | `draw`); unset means `first_seat`.
    pub fn from_env() -> Result<Self, AppError> {
        let tie_policy = match env::var("TIE_POLICY") {
            Ok(raw) if !raw.trim().is_empty() => raw.parse().map_err(AppError::config)?,
            _ => TiePolicy::default(),
        };
        Ok(Self { tie_policy })
    }

    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }
}
