//! DTOs for rounds_sea adapter.

use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
pub struct ScoreCreate {
    pub seat: i16,
    pub bid: i16,
    pub actual: i16,
    pub points_tenths: i32,
}

/// DTO for appending a round together with its per-seat scores.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub game_id: Uuid,
    pub round_no: i32,
    pub scores: Vec<ScoreCreate>,
}

impl RoundCreate {
    pub fn new(game_id: Uuid, round_no: i32) -> Self {
        Self {
            game_id,
            round_no,
            scores: Vec::new(),
        }
    }

    pub fn with_score(mut self, seat: i16, bid: u8, actual: u8, points_tenths: i32) -> Self {
        self.scores.push(ScoreCreate {
            seat,
            bid: i16::from(bid),
            actual: i16::from(actual),
            points_tenths,
        });
        self
    }
}
