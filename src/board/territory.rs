use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Me,
    Opponent,
}

impl Player {
    pub fn other(self) -> Self {
        match self { Player::Me => Player::Opponent, Player::Opponent => Player::Me }
    }

    /// Negamax colour: +1 for us, -1 for the opponent.
    pub fn sign(self) -> i32 {
        match self { Player::Me => 1, Player::Opponent => -1 }
    }

    pub fn from_sign(color: i32) -> Self {
        if color >= 0 { Player::Me } else { Player::Opponent }
    }
}

/// Ownership per cell; `None` is unclaimed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Territory {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Player>>,
}

impl Territory {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![None; rows * cols] }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> Option<Player> { self.cells[r * self.cols + c] }

    #[inline]
    pub(crate) fn set(&mut self, r: usize, c: usize, owner: Option<Player>) { self.cells[r * self.cols + c] = owner; }

    pub fn count(&self, player: Player) -> i32 {
        self.cells.iter().filter(|&&o| o == Some(player)).count() as i32
    }

    /// Cells owned by us minus cells owned by the opponent.
    pub fn differential(&self) -> i32 {
        self.cells.iter().map(|o| o.map_or(0, Player::sign)).sum()
    }
}
