use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use common::ReplayKey;
use common::util::{format_local_timestamp, parse_unix_seconds};
use flate2::read::MultiGzDecoder;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::chunk::Encoding;
use crate::coordinator::discover_files;
use crate::error::{Result, SearchError};

static JSON_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{.*\}").expect("valid regex"));
static LOG_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]*):(.*):(.*)").expect("valid regex"));

#[derive(Debug, Deserialize)]
struct IndexEntry {
    log_id: String,
}

/// Turn a `match:participant:timestamp` log id into a replay key
pub fn parse_log_id(log_id: &str) -> Option<ReplayKey> {
    let captures = LOG_ID.captures(log_id)?;
    let timestamp = captures.get(3)?.as_str();
    if timestamp.is_empty() {
        return None;
    }
    let start_time = format_local_timestamp(parse_unix_seconds(timestamp)?)?;
    Some(ReplayKey::new(start_time, &captures[1], &captures[2]))
}

/// Replay key from one index line, which embeds a JSON object with `log_id`
pub fn parse_index_line(line: &str) -> Option<ReplayKey> {
    let object = JSON_OBJECT.find(line)?;
    let entry: IndexEntry = serde_json::from_str(object.as_str()).ok()?;
    parse_log_id(&entry.log_id)
}

/// Every replay key listed in the index files matching `pattern`, in file
/// then line order.
pub fn discover_replay_keys(pattern: &str) -> Result<Vec<ReplayKey>> {
    let files = discover_files(pattern)?;
    if files.is_empty() {
        return Err(SearchError::NoIndexFiles {
            pattern: pattern.to_string(),
        });
    }

    let mut keys = Vec::new();
    for path in &files {
        let before = keys.len();
        read_index_file(path, &mut keys)?;
        debug!(path = %path.display(), keys = keys.len() - before, "Read index file");
    }
    info!(files = files.len(), keys = keys.len(), "Discovered replay keys");
    Ok(keys)
}

fn read_index_file(path: &Path, keys: &mut Vec<ReplayKey>) -> Result<()> {
    let file = File::open(path).map_err(SearchError::io(path))?;
    let reader: Box<dyn Read> = match Encoding::for_path(path) {
        Encoding::Plain => Box::new(file),
        Encoding::Gzip => Box::new(MultiGzDecoder::new(file)),
    };

    for line in BufReader::new(reader).split(b'\n') {
        let line = line.map_err(SearchError::io(path))?;
        if let Some(key) = parse_index_line(&String::from_utf8_lossy(&line)) {
            keys.push(key);
        }
    }
    Ok(())
}
