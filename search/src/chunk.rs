use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use common::DEFAULT_CHUNK_SIZE;

use crate::error::{Result, SearchError};

/// How the bytes of a log file are stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    /// Rotated, compressed log. Only readable as a whole.
    Gzip,
}

impl Encoding {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Encoding::Gzip,
            _ => Encoding::Plain,
        }
    }
}

/// A line-aligned byte range of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub path: PathBuf,
    pub offset: u64,
    pub length: u64,
    pub encoding: Encoding,
}

impl Chunk {
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlanner {
    chunk_size: u64,
}

impl Default for ChunkPlanner {
    fn default() -> Self {
        ChunkPlanner::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ChunkPlanner {
    pub fn new(chunk_size: u64) -> Self {
        ChunkPlanner {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Start a fresh pass over `path`.
    ///
    /// Each call opens its own handle, so a plan can be restarted by calling
    /// this again.
    pub fn plan(&self, path: &Path) -> Result<ChunkPlan> {
        let file = File::open(path).map_err(SearchError::io(path))?;
        let file_len = file.metadata().map_err(SearchError::io(path))?.len();
        Ok(ChunkPlan {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            encoding: Encoding::for_path(path),
            chunk_size: self.chunk_size,
            file_len,
            cursor: 0,
            failed: false,
        })
    }
}

/// Lazy sequence of chunks covering one file exactly once
pub struct ChunkPlan {
    path: PathBuf,
    reader: BufReader<File>,
    encoding: Encoding,
    chunk_size: u64,
    file_len: u64,
    cursor: u64,
    failed: bool,
}

impl ChunkPlan {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    /// Offset just past the first `\n` at or after `target`, clamped to the
    /// end of the file.
    fn line_end_from(&mut self, target: u64) -> io::Result<u64> {
        if target >= self.file_len {
            return Ok(self.file_len);
        }
        self.reader.seek(SeekFrom::Start(target))?;

        let mut end = target;
        loop {
            let (found, used) = {
                let buf = self.reader.fill_buf()?;
                if buf.is_empty() {
                    break;
                }
                match buf.iter().position(|&b| b == b'\n') {
                    Some(i) => (true, i + 1),
                    None => (false, buf.len()),
                }
            };
            self.reader.consume(used);
            end += used as u64;
            if found {
                break;
            }
        }

        Ok(end.min(self.file_len))
    }
}

impl Iterator for ChunkPlan {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.file_len {
            return None;
        }

        let start = self.cursor;
        let end = match self.encoding {
            Encoding::Gzip => self.file_len,
            Encoding::Plain => match self.line_end_from(start.saturating_add(self.chunk_size)) {
                Ok(end) => end,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(SearchError::Io {
                        path: self.path.clone(),
                        source,
                    }));
                }
            },
        };
        self.cursor = end;

        Some(Ok(Chunk {
            path: self.path.clone(),
            offset: start,
            length: end - start,
            encoding: self.encoding,
        }))
    }
}
