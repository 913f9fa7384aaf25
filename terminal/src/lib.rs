pub mod app;
pub mod player;
pub mod prompt;
pub mod render;
pub mod views;
