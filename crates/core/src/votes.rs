//! Voting rules for questions and answers.
//!
//! A user holds at most one vote per votable with a value of `+1` or `-1`.
//! Voting again in the same direction retracts the vote; voting in the
//! opposite direction flips it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Requested vote direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// The stored vote value (`+1` / `-1`).
    pub fn value(self) -> i16 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }

    /// Parse a direction from a query parameter (`up` / `down`).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(CoreError::Validation(format!(
                "Invalid vote direction '{other}'. Must be one of: up, down"
            ))),
        }
    }
}

/// What must happen to the stored vote row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// No vote existed; insert one with this value.
    Cast(i16),
    /// An opposite vote existed; overwrite it with this value.
    Flip(i16),
    /// A vote in the same direction existed; delete it.
    Retract,
}

/// Decide the change for a user who currently holds `existing` (a stored
/// value, if any) and requests `direction`.
pub fn decide(existing: Option<i16>, direction: Direction) -> VoteChange {
    let requested = direction.value();
    match existing {
        None => VoteChange::Cast(requested),
        Some(value) if value == requested => VoteChange::Retract,
        Some(_) => VoteChange::Flip(requested),
    }
}

/// Sum of vote values.
pub fn tally(values: &[i16]) -> i64 {
    values.iter().map(|&v| i64::from(v)).sum()
}
