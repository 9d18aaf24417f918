use database::{sort_chronologically, VictoryPointRecord};
use types::{Round, GRID_SQUARES};

/// A player's VPs laid out on the fixed track of squares, as of a round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VpGrid {
    squares: Vec<VictoryPointRecord>,
}

impl VpGrid {
    /// Keeps VPs earned up to and including `round`, in display order, and
    /// drops anything past the last square.
    pub fn layout(vps: &[VictoryPointRecord], round: Round) -> Self {
        let mut squares: Vec<VictoryPointRecord> = vps
            .iter()
            .filter(|vp| vp.round <= round)
            .cloned()
            .collect();
        sort_chronologically(&mut squares);
        squares.truncate(GRID_SQUARES);
        Self { squares }
    }

    /// Square numbers start at 1.
    pub fn square(&self, number: usize) -> Option<&VictoryPointRecord> {
        number.checked_sub(1).and_then(|index| self.squares.get(index))
    }

    /// Every square in order, `None` for the empty ones.
    pub fn squares(&self) -> impl Iterator<Item = (usize, Option<&VictoryPointRecord>)> {
        (1..=GRID_SQUARES).map(|number| (number, self.square(number)))
    }

    pub fn filled(&self) -> usize {
        self.squares.len()
    }

    pub fn next_square(&self) -> usize {
        (self.filled() + 1).min(GRID_SQUARES)
    }

    pub fn can_add(&self) -> bool {
        self.filled() < GRID_SQUARES
    }
}

/// The round the tracker is looking at. Purely local, never persisted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundSelector {
    current: Round,
}

impl RoundSelector {
    pub fn new(current: Round) -> Self {
        Self { current }
    }

    pub fn current(&self) -> Round {
        self.current
    }

    pub fn previous(&mut self) -> Round {
        self.current = self.current.previous();
        self.current
    }

    pub fn next(&mut self) -> Round {
        self.current = self.current.next();
        self.current
    }

    pub fn set(&mut self, round: Round) {
        self.current = round;
    }
}
