//! Reconstructs a snake match from rotated server logs.
//!
//! Log files are split into line-aligned chunks, scanned in parallel for the
//! lines belonging to one [`ReplayKey`], and the matched event payloads are
//! folded into one [`TurnSnapshot`] per turn.

pub mod chunk;
pub mod config;
pub mod coordinator;
mod error;
pub mod index;
pub mod matcher;
pub mod turns;
pub mod worker;

use common::{ReplayKey, TurnSnapshot};

pub use chunk::{Chunk, ChunkPlan, ChunkPlanner, Encoding};
pub use config::SearchConfig;
pub use coordinator::{LogSearch, SearchOptions};
pub use error::{Result, SearchError};
pub use index::discover_replay_keys;
pub use matcher::{LogRecord, RecordMatcher, parse_record};
pub use turns::{TurnStateBuilder, build_turns};
pub use worker::scan_chunk;

/// Search every configured log for `key` and rebuild its turns
pub fn replay_turns(config: &SearchConfig, key: &ReplayKey) -> Result<Vec<TurnSnapshot>> {
    let payloads = LogSearch::new(config.search_options()).run(key)?;
    Ok(build_turns(config.board, payloads))
}
