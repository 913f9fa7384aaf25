mod constants;
mod event;
mod key;
mod snake;
mod turn_state;

pub mod util;

pub use constants::*;
pub use event::*;
pub use key::*;
pub use snake::*;
pub use turn_state::*;
