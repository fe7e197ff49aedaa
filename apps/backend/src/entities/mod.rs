pub mod game_players;
pub mod game_rounds;
pub mod games;
pub mod round_scores;

pub use game_players::Entity as GamePlayers;
pub use game_players::Model as GamePlayer;
pub use game_rounds::Entity as GameRounds;
pub use game_rounds::Model as GameRound;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use round_scores::Entity as RoundScores;
pub use round_scores::Model as RoundScore;
