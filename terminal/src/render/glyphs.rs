use common::SegmentKind;

use super::types::{CharDimensions, CharPattern};

pub trait GlyphSet {
    fn char_dimensions(&self) -> CharDimensions;

    /// `slot` is the participant's position in the snapshot, used to tell
    /// snakes apart
    fn render_segment(&self, kind: SegmentKind, slot: usize) -> CharPattern;

    fn render_food(&self) -> CharPattern;

    fn render_empty(&self) -> CharPattern;
}

/// Block characters for the interactive viewer
pub struct StandardGlyphs {
    char_dims: CharDimensions,
}

impl StandardGlyphs {
    pub fn new(char_dims: CharDimensions) -> Self {
        Self { char_dims }
    }
}

impl GlyphSet for StandardGlyphs {
    fn char_dimensions(&self) -> CharDimensions {
        self.char_dims
    }

    fn render_segment(&self, kind: SegmentKind, slot: usize) -> CharPattern {
        let ch = match kind {
            SegmentKind::Head => '█',
            SegmentKind::Tail => '▪',
            SegmentKind::Body => match slot % 3 {
                0 => '▓',
                1 => '▒',
                _ => '░',
            },
        };
        CharPattern::single(ch, self.char_dims)
    }

    fn render_food(&self) -> CharPattern {
        CharPattern::single('●', self.char_dims)
    }

    fn render_empty(&self) -> CharPattern {
        CharPattern::single(' ', self.char_dims)
    }
}

/// Plain ASCII, one character per cell: heads are capital letters, bodies
/// the matching lowercase letter.
pub struct AsciiGlyphs;

impl AsciiGlyphs {
    fn letter(slot: usize) -> u8 {
        (slot % 26) as u8
    }
}

impl GlyphSet for AsciiGlyphs {
    fn char_dimensions(&self) -> CharDimensions {
        CharDimensions::new(1, 1)
    }

    fn render_segment(&self, kind: SegmentKind, slot: usize) -> CharPattern {
        let ch = match kind {
            SegmentKind::Head => (b'A' + Self::letter(slot)) as char,
            SegmentKind::Body => (b'a' + Self::letter(slot)) as char,
            SegmentKind::Tail => '~',
        };
        CharPattern::new(vec![vec![ch]])
    }

    fn render_food(&self) -> CharPattern {
        CharPattern::new(vec![vec!['*']])
    }

    fn render_empty(&self) -> CharPattern {
        CharPattern::new(vec![vec!['.']])
    }
}
