use common::{Board, Position};

#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub chars_per_cell: CharDimensions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chars_per_cell: CharDimensions::new(2, 1),
        }
    }
}

/// How many terminal characters one board cell occupies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharDimensions {
    pub horizontal: usize,
    pub vertical: usize,
}

impl CharDimensions {
    pub fn new(horizontal: usize, vertical: usize) -> Self {
        Self {
            horizontal: horizontal.max(1),
            vertical: vertical.max(1),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharPattern {
    pub chars: Vec<Vec<char>>,
}

impl CharPattern {
    pub fn new(chars: Vec<Vec<char>>) -> Self {
        Self { chars }
    }

    pub fn single(ch: char, dims: CharDimensions) -> Self {
        Self::new(vec![vec![ch; dims.horizontal]; dims.vertical])
    }
}

/// Character canvas for one board, addressed in board cells
pub struct CharGrid {
    grid: Vec<Vec<char>>,
    board: Board,
    char_dims: CharDimensions,
}

impl CharGrid {
    pub fn new(board: Board, char_dims: CharDimensions, background: &CharPattern) -> Self {
        let mut grid = Self {
            grid: vec![
                vec![' '; board.width as usize * char_dims.horizontal];
                board.height as usize * char_dims.vertical
            ],
            board,
            char_dims,
        };
        let xs = || (0..board.width).filter_map(|x| i16::try_from(x).ok());
        for y in (0..board.height).filter_map(|y| i16::try_from(y).ok()) {
            for x in xs() {
                grid.set_cell(Position { x, y }, background);
            }
        }
        grid
    }

    /// Paint `pattern` over one cell. Cells off the board are ignored.
    pub fn set_cell(&mut self, position: Position, pattern: &CharPattern) -> bool {
        if !self.board.contains(position) {
            return false;
        }
        let start_x = position.x as usize * self.char_dims.horizontal;
        let start_y = position.y as usize * self.char_dims.vertical;

        for (dy, row) in pattern.chars.iter().take(self.char_dims.vertical).enumerate() {
            for (dx, &ch) in row.iter().take(self.char_dims.horizontal).enumerate() {
                self.grid[start_y + dy][start_x + dx] = ch;
            }
        }
        true
    }

    pub fn physical_width(&self) -> usize {
        self.board.width as usize * self.char_dims.horizontal
    }

    pub fn physical_height(&self) -> usize {
        self.board.height as usize * self.char_dims.vertical
    }

    pub fn lines(&self) -> Vec<String> {
        self.grid.iter().map(|row| row.iter().collect()).collect()
    }

    pub fn into_lines(self) -> Vec<Vec<char>> {
        self.grid
    }
}
