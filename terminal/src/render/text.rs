use common::TurnSnapshot;

use super::board::BoardRenderer;
use super::glyphs::GlyphSet;

/// One turn as printable text: a header, the framed board and one line per
/// snake.
pub fn render_turn_text<G: GlyphSet>(renderer: &BoardRenderer<G>, snapshot: &TurnSnapshot) -> String {
    let grid = renderer.render(snapshot);
    let border = format!("+{}+", "-".repeat(grid.physical_width()));

    let mut out = format!(
        "Turn {} ({}x{}, {} food)\n",
        snapshot.turn,
        snapshot.width,
        snapshot.height,
        snapshot.food.len()
    );
    out.push_str(&border);
    out.push('\n');
    for line in grid.lines() {
        out.push('|');
        out.push_str(&line);
        out.push_str("|\n");
    }
    out.push_str(&border);
    out.push('\n');

    for snake in snapshot.snakes.values() {
        let head = snake
            .head()
            .map(|h| format!("({}, {})", h.x, h.y))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "  snake {}: head {}, {} segments, length {}, health {}\n",
            snake.id,
            head,
            snake.segments.len(),
            snake.length,
            snake.health
        ));
    }
    out
}
