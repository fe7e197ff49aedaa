use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::domain::rules::INSTANT_WIN_BID;
use crate::domain::state::Round;

/// Exact score value in tenths of a point.
///
/// Every reachable score is a multiple of 0.1, so storing tenths keeps
/// aggregation exact and makes tie detection a plain integer comparison.
/// Serialized as a JSON number (`5.1`, `-3.0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Points(i32);

impl Points {
    pub const ZERO: Points = Points(0);

    pub const fn from_tenths(tenths: i32) -> Self {
        Points(tenths)
    }

    pub const fn whole(points: i32) -> Self {
        Points(points * 10)
    }

    pub const fn tenths(self) -> i32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Nearest tenth to a caller-supplied float.
    pub fn from_f64_lossy(value: f64) -> Self {
        Points((value * 10.0).round() as i32)
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Points) {
        self.0 += rhs.0;
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Points>>(iter: I) -> Points {
        iter.fold(Points::ZERO, Add::add)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{}", abs / 10, abs % 10)
    }
}

impl Serialize for Points {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Points for one player's round.
///
/// Exact bid scores the bid, each overtrick adds a tenth, and falling short
/// costs the full bid.
pub fn compute_points(bid: u8, actual: u8) -> Points {
    let bid_tenths = i32::from(bid) * 10;
    match actual.cmp(&bid) {
        std::cmp::Ordering::Equal => Points(bid_tenths),
        std::cmp::Ordering::Greater => Points(bid_tenths + i32::from(actual - bid)),
        std::cmp::Ordering::Less => Points(-bid_tenths),
    }
}

pub fn is_instant_win(bid: u8, actual: u8) -> bool {
    bid == INSTANT_WIN_BID && actual >= INSTANT_WIN_BID
}

/// Running totals per seat, recomputed from the full round history.
///
/// Rounds are visited in ascending `round_number`; entries are added by
/// position, and entries beyond `player_count` are ignored.
pub fn aggregate_scores(player_count: usize, rounds: &[Round]) -> Vec<Points> {
    let mut ordered: Vec<&Round> = rounds.iter().collect();
    ordered.sort_by_key(|r| r.round_number);

    let mut totals = vec![Points::ZERO; player_count];
    for round in ordered {
        for (seat, entry) in round.entries.iter().enumerate().take(player_count) {
            totals[seat] += entry.points;
        }
    }
    totals
}

/// How a final-round tie on the top score is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TiePolicy {
    /// Lowest seat among the tied players wins.
    #[default]
    FirstSeat,
    /// A shared top score completes the game without a winner.
    Draw,
}

impl FromStr for TiePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first_seat" | "first-seat" => Ok(TiePolicy::FirstSeat),
            "draw" => Ok(TiePolicy::Draw),
            other => Err(format!(
                "unknown tie policy '{other}' (expected first_seat or draw)"
            )),
        }
    }
}

/// Seat holding the maximum total, subject to `policy` on ties.
pub fn resolve_winner(totals: &[Points], policy: TiePolicy) -> Option<usize> {
    let max = *totals.iter().max()?;
    let mut leaders = totals
        .iter()
        .enumerate()
        .filter(|(_, t)| **t == max)
        .map(|(seat, _)| seat);
    let first = leaders.next()?;
    match policy {
        TiePolicy::FirstSeat => Some(first),
        TiePolicy::Draw if leaders.next().is_some() => None,
        TiePolicy::Draw => Some(first),
    }
}
