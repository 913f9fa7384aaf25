use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use flate2::read::MultiGzDecoder;
use tracing::trace;

use crate::chunk::{Chunk, Encoding};
use crate::error::{Result, SearchError};
use crate::matcher::RecordMatcher;

/// Scan one chunk and return the payloads of every matching line.
///
/// The file handle lives only for the duration of the call. Invalid UTF-8 is
/// replaced rather than rejected, since such lines can never match a key.
pub fn scan_chunk(chunk: &Chunk, matcher: &RecordMatcher) -> Result<Vec<String>> {
    let bytes = read_chunk(chunk).map_err(SearchError::io(&chunk.path))?;
    let text = String::from_utf8_lossy(&bytes);

    let payloads: Vec<String> = log_lines(&text)
        .filter_map(|line| matcher.match_line(line))
        .map(str::to_owned)
        .collect();

    trace!(
        path = %chunk.path.display(),
        offset = chunk.offset,
        length = chunk.length,
        matched = payloads.len(),
        "Scanned chunk"
    );
    Ok(payloads)
}

/// Split on every line boundary a log writer may emit: `\n`, `\r\n`, a bare
/// `\r`, vertical tab, form feed, the separator controls and the Unicode line
/// and paragraph separators. Empty lines are dropped.
fn log_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| {
        matches!(
            c,
            '\n' | '\r'
                | '\x0b'
                | '\x0c'
                | '\x1c'
                | '\x1d'
                | '\x1e'
                | '\u{85}'
                | '\u{2028}'
                | '\u{2029}'
        )
    })
    .filter(|line| !line.is_empty())
}

fn read_chunk(chunk: &Chunk) -> io::Result<Vec<u8>> {
    let mut file = File::open(&chunk.path)?;
    let mut bytes = Vec::with_capacity(chunk.length as usize);
    match chunk.encoding {
        Encoding::Plain => {
            file.seek(SeekFrom::Start(chunk.offset))?;
            file.take(chunk.length).read_to_end(&mut bytes)?;
        }
        Encoding::Gzip => {
            MultiGzDecoder::new(file).read_to_end(&mut bytes)?;
        }
    }
    Ok(bytes)
}
