pub mod board;
pub mod glyphs;
pub mod text;
pub mod types;
