use common::{SegmentKind, TurnSnapshot};

use super::glyphs::GlyphSet;
use super::types::CharGrid;

pub struct BoardRenderer<G: GlyphSet> {
    glyphs: G,
}

impl<G: GlyphSet> BoardRenderer<G> {
    pub fn new(glyphs: G) -> Self {
        Self { glyphs }
    }

    pub fn glyphs(&self) -> &G {
        &self.glyphs
    }

    pub fn render(&self, snapshot: &TurnSnapshot) -> CharGrid {
        let mut grid = CharGrid::new(
            snapshot.board(),
            self.glyphs.char_dimensions(),
            &self.glyphs.render_empty(),
        );

        let food = self.glyphs.render_food();
        for &position in &snapshot.food {
            grid.set_cell(position, &food);
        }

        // Heads go last so they stay visible where segments overlap.
        for heads in [false, true] {
            for (slot, snake) in snapshot.snakes.values().enumerate() {
                for segment in &snake.segments {
                    if (segment.object == SegmentKind::Head) == heads {
                        let pattern = self.glyphs.render_segment(segment.object, slot);
                        grid.set_cell(segment.position(), &pattern);
                    }
                }
            }
        }

        grid
    }
}
