use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_BOARD_DIMENSION, SnakeState};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: u16,
    pub height: u16,
}

impl Board {
    /// Sides larger than [`MAX_BOARD_DIMENSION`] are clamped to it
    pub fn new(width: u16, height: u16) -> Self {
        Board {
            width: width.min(MAX_BOARD_DIMENSION),
            height: height.min(MAX_BOARD_DIMENSION),
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u16) < self.width
            && (position.y as u16) < self.height
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

/// Reconstructed board for one turn. Dimensions are fixed when the snapshot
/// is created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TurnSnapshot {
    pub turn: u32,
    pub width: u16,
    pub height: u16,
    pub food: BTreeSet<Position>,
    pub snakes: BTreeMap<String, SnakeState>,
}

impl TurnSnapshot {
    pub fn new(turn: u32, board: Board) -> Self {
        TurnSnapshot {
            turn,
            width: board.width,
            height: board.height,
            food: BTreeSet::new(),
            snakes: BTreeMap::new(),
        }
    }

    pub fn board(&self) -> Board {
        Board::new(self.width, self.height)
    }

    /// Snake for `who`, created on first mention
    pub fn snake_mut(&mut self, who: &str) -> &mut SnakeState {
        self.snakes
            .entry(who.to_string())
            .or_insert_with(|| SnakeState::new(who))
    }
}
