use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

use common::{
    Board, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_CHUNK_SIZE, DEFAULT_TAG_NAMESPACE,
};

use crate::coordinator::SearchOptions;
use crate::error::{Result, SearchError};

pub const DEFAULT_LOG_DIR: &str = "/var/log/td-agent/";
pub const DEFAULT_INDEX_PATTERN: &str = "replays.*";
pub const DEFAULT_LOG_PATTERN: &str = "luasnake.*";

/// Where logs live and how to search them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub log_dir: PathBuf,
    pub index_pattern: String,
    pub log_pattern: String,
    pub namespace: String,
    pub chunk_size: u64,
    pub workers: usize,
    pub board: Board,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            index_pattern: DEFAULT_INDEX_PATTERN.to_string(),
            log_pattern: DEFAULT_LOG_PATTERN.to_string(),
            namespace: DEFAULT_TAG_NAMESPACE.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: default_workers(),
            board: Board::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT),
        }
    }
}

impl SearchConfig {
    /// Read `REPLAY_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source, falling back to defaults for
    /// unset names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SearchConfig::default();

        if let Some(dir) = lookup("REPLAY_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(pattern) = lookup("REPLAY_INDEX_PATTERN") {
            config.index_pattern = pattern;
        }
        if let Some(pattern) = lookup("REPLAY_LOG_PATTERN") {
            config.log_pattern = pattern;
        }
        if let Some(namespace) = lookup("REPLAY_TAG_NAMESPACE") {
            config.namespace = namespace;
        }
        if let Some(size) = parse_setting(&lookup, "REPLAY_CHUNK_SIZE")? {
            config.chunk_size = size;
        }
        if let Some(workers) = parse_setting::<usize, _>(&lookup, "REPLAY_WORKERS")? {
            config.workers = workers.max(1);
        }
        if let Some(width) = parse_setting(&lookup, "REPLAY_BOARD_WIDTH")? {
            config.board = Board::new(width, config.board.height);
        }
        if let Some(height) = parse_setting(&lookup, "REPLAY_BOARD_HEIGHT")? {
            config.board = Board::new(config.board.width, height);
        }

        Ok(config)
    }

    pub fn index_glob(&self) -> String {
        self.log_dir.join(&self.index_pattern).to_string_lossy().into_owned()
    }

    pub fn log_glob(&self) -> String {
        self.log_dir.join(&self.log_pattern).to_string_lossy().into_owned()
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            log_pattern: self.log_glob(),
            namespace: self.namespace.clone(),
            chunk_size: self.chunk_size,
            workers: self.workers,
        }
    }
}

pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn parse_setting<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SearchError::InvalidSetting { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SearchConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.log_dir, PathBuf::from(DEFAULT_LOG_DIR));
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.namespace, "luasnake");
        assert_eq!(config.board, Board::new(10, 10));
        assert!(config.workers >= 1);
        assert_eq!(config.log_glob(), "/var/log/td-agent/luasnake.*");
        assert_eq!(config.index_glob(), "/var/log/td-agent/replays.*");
    }

    #[test]
    fn overrides_from_variables() {
        let config = SearchConfig::from_lookup(lookup_from(&[
            ("REPLAY_LOG_DIR", "/tmp/logs"),
            ("REPLAY_LOG_PATTERN", "snake-*.log"),
            ("REPLAY_TAG_NAMESPACE", "robosnake"),
            ("REPLAY_CHUNK_SIZE", "4096"),
            ("REPLAY_WORKERS", "0"),
            ("REPLAY_BOARD_WIDTH", "19"),
        ]))
        .unwrap();
        assert_eq!(config.log_glob(), "/tmp/logs/snake-*.log");
        assert_eq!(config.namespace, "robosnake");
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.workers, 1);
        assert_eq!(config.board, Board::new(19, 10));

        let options = config.search_options();
        assert_eq!(options.chunk_size, 4096);
        assert_eq!(options.log_pattern, "/tmp/logs/snake-*.log");
    }

    #[test]
    fn oversized_board_is_clamped() {
        let config = SearchConfig::from_lookup(lookup_from(&[
            ("REPLAY_BOARD_WIDTH", "65535"),
            ("REPLAY_BOARD_HEIGHT", "40000"),
        ]))
        .unwrap();
        assert_eq!(config.board.width, 32767);
        assert_eq!(config.board.height, 32767);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = SearchConfig::from_lookup(lookup_from(&[("REPLAY_CHUNK_SIZE", "big")]))
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidSetting {
                name: "REPLAY_CHUNK_SIZE",
                ..
            }
        ));
    }
}
