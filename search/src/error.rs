use std::path::PathBuf;

use common::ReplayKey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No matches have been played yet: no index files match {pattern}")]
    NoIndexFiles { pattern: String },

    #[error("Could not find log files matching {pattern}")]
    NoLogFiles { pattern: String },

    #[error("No log data found for replay ({key})")]
    NoLogData { key: ReplayKey },

    #[error("Invalid file pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Invalid value {value:?} for {name}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start search workers: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl SearchError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> SearchError {
        let path = path.into();
        move |source| SearchError::Io { path, source }
    }
}
