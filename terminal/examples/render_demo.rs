use common::{Board, Position, Segment, SegmentKind, TurnSnapshot};
use terminal::render::{
    board::BoardRenderer,
    glyphs::{AsciiGlyphs, StandardGlyphs},
    text::render_turn_text,
    types::CharDimensions,
};

fn main() {
    let mut snapshot = TurnSnapshot::new(12, Board::new(20, 10));
    for (x, y) in [(10, 5), (2, 2), (17, 8)] {
        snapshot.food.insert(Position { x, y });
    }

    let first = snapshot.snake_mut("1");
    first.segments.push(Segment::new(SegmentKind::Head, Position { x: 5, y: 5 }));
    for y in 6..8 {
        first.segments.push(Segment::new(SegmentKind::Body, Position { x: 5, y }));
    }
    first.segments.push(Segment::new(SegmentKind::Tail, Position { x: 4, y: 7 }));

    let second = snapshot.snake_mut("2");
    second.segments.push(Segment::new(SegmentKind::Head, Position { x: 15, y: 3 }));
    for x in 12..15 {
        second.segments.push(Segment::new(SegmentKind::Body, Position { x, y: 3 }));
    }

    println!("=== ASCII ===");
    print!("{}", render_turn_text(&BoardRenderer::new(AsciiGlyphs), &snapshot));

    for (h, v) in [(1, 1), (2, 1), (3, 2)] {
        println!("\n=== {}x{} blocks ===", h, v);
        let renderer = BoardRenderer::new(StandardGlyphs::new(CharDimensions::new(h, v)));
        print!("{}", render_turn_text(&renderer, &snapshot));
    }
}
