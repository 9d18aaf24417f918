use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A numbered phase of the game, 1 through 10.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Round(u8);

impl Round {
    pub const FIRST: Round = Round(1);
    pub const LAST: Round = Round(10);

    pub fn new(number: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0)
            .contains(&number)
            .then_some(Round(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn next(self) -> Self {
        Round((self.0 + 1).min(Self::LAST.0))
    }

    pub fn previous(self) -> Self {
        Round((self.0 - 1).max(Self::FIRST.0))
    }

    pub fn all() -> impl Iterator<Item = Round> {
        (Self::FIRST.0..=Self::LAST.0).map(Round)
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::FIRST
    }
}

impl Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Round {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Round::new(value).ok_or_else(|| format!("round must be between 1 and 10, got {value}"))
    }
}

impl TryFrom<i64> for Round {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| format!("round must be between 1 and 10, got {value}"))
            .and_then(Round::try_from)
    }
}

impl From<Round> for u8 {
    fn from(round: Round) -> Self {
        round.0
    }
}
