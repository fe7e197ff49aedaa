use sea_orm::DatabaseConnection;

use crate::config::game::GameConfig;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Rule settings such as the final-round tie policy
    pub game: GameConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, game: GameConfig) -> Self {
        Self { db: Some(db), game }
    }

    /// State without a database; every data route answers `DB_UNAVAILABLE`.
    pub fn without_db(game: GameConfig) -> Self {
        Self { db: None, game }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
