use serde::{Deserialize, Serialize};

use crate::{PLACEHOLDER_HEALTH, PLACEHOLDER_LENGTH, Position};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Head,
    Body,
    Tail,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment {
    pub object: SegmentKind,
    pub x: i16,
    pub y: i16,
}

impl Segment {
    pub fn new(object: SegmentKind, position: Position) -> Self {
        Segment {
            object,
            x: position.x,
            y: position.y,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }
}

/// One participant's body as reconstructed for a single turn.
///
/// Segments keep the order in which their events were folded. The logs carry
/// no ordering key below the turn number, so this is not guaranteed to be
/// head-to-tail order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SnakeState {
    pub id: String,
    pub segments: Vec<Segment>,
    pub length: u32,
    pub health: u32,
}

impl SnakeState {
    pub fn new(id: impl Into<String>) -> Self {
        SnakeState {
            id: id.into(),
            segments: Vec::new(),
            length: PLACEHOLDER_LENGTH,
            health: PLACEHOLDER_HEALTH,
        }
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|segment| segment.object == SegmentKind::Head)
    }
}
