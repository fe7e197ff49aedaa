use crate::config::db::DbProfile;
use crate::config::game::GameConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    game: GameConfig,
    db_profile: Option<DbProfile>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            game: GameConfig::default(),
            db_profile: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_game_config(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.db_profile {
            // single entrypoint: connect + migrate
            Some(profile) => Ok(AppState::new(bootstrap_db(profile).await?, self.game)),
            None => Ok(AppState::without_db(self.game)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
