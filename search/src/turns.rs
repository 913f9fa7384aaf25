use std::collections::BTreeMap;

use common::{Board, Item, LogEvent, Segment, TurnSnapshot};
use tracing::debug;

/// Folds matched payloads into per-turn snapshots.
///
/// Payloads may arrive in any order. Food sets and snake membership do not
/// depend on that order; the order of segments inside one snake does, since
/// the logs carry no sequence number below the turn.
pub struct TurnStateBuilder {
    board: Board,
    turns: BTreeMap<u32, TurnSnapshot>,
    skipped: usize,
}

impl TurnStateBuilder {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            turns: BTreeMap::new(),
            skipped: 0,
        }
    }

    /// Decode and fold one payload. Payloads that are not valid events are
    /// skipped.
    pub fn apply(&mut self, payload: &str) {
        match serde_json::from_str::<LogEvent>(payload) {
            Ok(event) => self.apply_event(event),
            Err(_) => self.skipped += 1,
        }
    }

    pub fn apply_event(&mut self, event: LogEvent) {
        let board = self.board;
        let snapshot = self
            .turns
            .entry(event.turn)
            .or_insert_with(|| TurnSnapshot::new(event.turn, board));

        let Some(position) = event.coordinates else {
            return;
        };

        if event.item == Item::Food {
            snapshot.food.insert(position);
        } else if let Some(kind) = event.item.segment_kind() {
            snapshot
                .snake_mut(&event.who)
                .segments
                .push(Segment::new(kind, position));
        }
    }

    /// Number of payloads that could not be decoded so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Snapshots in increasing turn order
    pub fn build(self) -> Vec<TurnSnapshot> {
        if self.skipped > 0 {
            debug!(skipped = self.skipped, "Ignored undecodable payloads");
        }
        self.turns.into_values().collect()
    }
}

pub fn build_turns<I, S>(board: Board, payloads: I) -> Vec<TurnSnapshot>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TurnStateBuilder::new(board);
    for payload in payloads {
        builder.apply(payload.as_ref());
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{PLACEHOLDER_HEALTH, PLACEHOLDER_LENGTH, Position, SegmentKind};

    fn event(who: &str, item: &str, turn: u32, x: i16, y: i16) -> String {
        format!(
            r#"{{"who":"{who}","item":"{item}","turn":{turn},"coordinates":{{"x":{x},"y":{y}}}}}"#
        )
    }

    #[test]
    fn food_lands_in_its_turn() {
        let turns = build_turns(Board::default(), [event("7", "food", 0, 2, 3)]);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].turn, 0);
        assert_eq!(
            turns[0].food.iter().copied().collect::<Vec<_>>(),
            vec![Position { x: 2, y: 3 }]
        );
        assert!(turns[0].snakes.is_empty());
    }

    #[test]
    fn segments_group_by_participant() {
        let turns = build_turns(
            Board::default(),
            [
                event("7", "head", 1, 5, 5),
                event("9", "head", 1, 0, 0),
                event("7", "body", 1, 5, 6),
                event("7", "tail", 1, 5, 7),
            ],
        );
        let snake = &turns[0].snakes["7"];
        assert_eq!(snake.id, "7");
        assert_eq!(
            snake.segments.iter().map(|s| s.object).collect::<Vec<_>>(),
            vec![SegmentKind::Head, SegmentKind::Body, SegmentKind::Tail]
        );
        assert_eq!(snake.length, PLACEHOLDER_LENGTH);
        assert_eq!(snake.health, PLACEHOLDER_HEALTH);
        assert_eq!(turns[0].snakes["9"].segments.len(), 1);
    }

    #[test]
    fn turns_come_out_sorted() {
        let turns = build_turns(
            Board::default(),
            [
                event("7", "food", 2, 1, 1),
                event("7", "food", 0, 1, 1),
                event("7", "head", 1, 1, 1),
            ],
        );
        assert_eq!(turns.iter().map(|t| t.turn).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn board_is_fixed_at_creation() {
        let turns = build_turns(Board::new(19, 7), [event("7", "food", 0, 1, 1)]);
        assert_eq!((turns[0].width, turns[0].height), (19, 7));
    }

    #[test]
    fn undecodable_payloads_are_skipped() {
        let mut builder = TurnStateBuilder::new(Board::default());
        builder.apply("not json");
        builder.apply(r#"{"who":"7"}"#);
        builder.apply(&event("7", "food", 0, 1, 1));
        assert_eq!(builder.skipped(), 2);
        assert_eq!(builder.build().len(), 1);
    }

    #[test]
    fn unknown_items_still_open_the_turn() {
        let turns = build_turns(
            Board::default(),
            [
                event("7", "move", 3, 1, 1),
                r#"{"who":"7","item":"head","turn":4}"#.to_string(),
            ],
        );
        assert_eq!(turns.len(), 2);
        assert!(turns.iter().all(|t| t.food.is_empty() && t.snakes.is_empty()));
    }

    #[test]
    fn duplicate_food_collapses() {
        let turns = build_turns(
            Board::default(),
            [event("7", "food", 0, 1, 1), event("9", "food", 0, 1, 1)],
        );
        assert_eq!(turns[0].food.len(), 1);
    }
}
