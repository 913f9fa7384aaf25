use std::path::PathBuf;

use common::{DEFAULT_CHUNK_SIZE, DEFAULT_TAG_NAMESPACE, ReplayKey};
use rayon::ThreadPoolBuilder;
use tracing::{debug, info};

use crate::chunk::ChunkPlanner;
use crate::config::default_workers;
use crate::error::{Result, SearchError};
use crate::matcher::RecordMatcher;
use crate::worker::scan_chunk;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Glob matching every event log to scan
    pub log_pattern: String,
    pub namespace: String,
    pub chunk_size: u64,
    pub workers: usize,
}

impl SearchOptions {
    pub fn new(log_pattern: impl Into<String>) -> Self {
        SearchOptions {
            log_pattern: log_pattern.into(),
            namespace: DEFAULT_TAG_NAMESPACE.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: default_workers(),
        }
    }
}

/// Parallel search of all event logs for one replay key
pub struct LogSearch {
    options: SearchOptions,
}

impl LogSearch {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Collect the payload of every log line recorded under `key`.
    ///
    /// Chunks of every log file are scanned on a worker pool that exists only
    /// for the duration of this call. Payloads arrive in completion order,
    /// which varies between runs; callers should rely on the turn carried in
    /// each payload instead.
    pub fn run(&self, key: &ReplayKey) -> Result<Vec<String>> {
        let files = discover_files(&self.options.log_pattern)?;
        if files.is_empty() {
            return Err(SearchError::NoLogFiles {
                pattern: self.options.log_pattern.clone(),
            });
        }

        let workers = self.options.workers.max(1);
        info!(
            files = files.len(),
            workers,
            "Searching logs for replay ({})",
            key
        );

        let matcher = RecordMatcher::new(key.clone(), &self.options.namespace);
        let planner = ChunkPlanner::new(self.options.chunk_size);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("log-search-{i}"))
            .build()?;
        let (sender, receiver) = crossbeam_channel::unbounded();

        // The scope joins every spawned job before returning, even when
        // planning fails partway through.
        let submitted = pool.scope(|scope| -> Result<usize> {
            let mut submitted = 0;
            for path in &files {
                for chunk in planner.plan(path)? {
                    let chunk = chunk?;
                    let sender = sender.clone();
                    let matcher = &matcher;
                    scope.spawn(move |_| {
                        let _ = sender.send(scan_chunk(&chunk, matcher));
                    });
                    submitted += 1;
                }
            }
            Ok(submitted)
        });
        drop(sender);
        let submitted = submitted?;

        let mut payloads = Vec::new();
        for result in receiver.iter() {
            payloads.extend(result?);
        }
        debug!(chunks = submitted, matched = payloads.len(), "Search finished");

        if payloads.is_empty() {
            return Err(SearchError::NoLogData { key: key.clone() });
        }
        Ok(payloads)
    }
}

/// Regular files matching `pattern`, sorted by path
pub(crate) fn discover_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|source| SearchError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| SearchError::Io {
            path: err.path().to_path_buf(),
            source: err.into(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
