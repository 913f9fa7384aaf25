use serde::{Deserialize, Serialize};

use crate::{Position, SegmentKind};

/// What a logged event describes
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    Food,
    Head,
    Body,
    Tail,
    #[serde(other)]
    Other,
}

impl Item {
    pub fn segment_kind(self) -> Option<SegmentKind> {
        match self {
            Item::Head => Some(SegmentKind::Head),
            Item::Body => Some(SegmentKind::Body),
            Item::Tail => Some(SegmentKind::Tail),
            Item::Food | Item::Other => None,
        }
    }
}

/// Decoded payload of one matched log line
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub who: String,
    pub item: Item,
    pub turn: u32,
    #[serde(default)]
    pub coordinates: Option<Position>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_food_event() {
        let event: LogEvent = serde_json::from_str(
            r#"{"who":"7","item":"food","turn":0,"coordinates":{"x":2,"y":3}}"#,
        )
        .unwrap();
        assert_eq!(event.item, Item::Food);
        assert_eq!(event.turn, 0);
        assert_eq!(event.coordinates, Some(Position { x: 2, y: 3 }));
    }

    #[test]
    fn unknown_item_is_other() {
        let event: LogEvent =
            serde_json::from_str(r#"{"who":"7","item":"move","turn":4}"#).unwrap();
        assert_eq!(event.item, Item::Other);
        assert_eq!(event.coordinates, None);
        assert_eq!(event.item.segment_kind(), None);
    }

    #[test]
    fn negative_turn_is_rejected() {
        let result = serde_json::from_str::<LogEvent>(
            r#"{"who":"7","item":"head","turn":-1,"coordinates":{"x":0,"y":0}}"#,
        );
        assert!(result.is_err());
    }
}
