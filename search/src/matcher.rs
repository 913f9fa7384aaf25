use common::ReplayKey;
use common::util::{format_local_timestamp, parse_unix_seconds};

/// Fields decoded from one `time \t tag \t payload` log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord<'a> {
    pub time: &'a str,
    pub tag: &'a str,
    pub match_id: &'a str,
    pub participant_id: &'a str,
    pub unix_seconds: f64,
    pub payload: &'a str,
}

impl LogRecord<'_> {
    /// Start time in the same representation as [`ReplayKey::start_time`]
    pub fn started_at(&self) -> Option<String> {
        format_local_timestamp(self.unix_seconds)
    }
}

/// Decode a log line whose tag carries `prefix` followed by
/// `match:participant:timestamp`.
///
/// Old or corrupt lines return `None`: fewer than three tab fields, no prefix
/// in the tag, fewer than three encoded parts, or an empty or non-numeric
/// timestamp. Tab fields after the payload are ignored. The match id is the
/// last character of the first encoded part, which still includes the prefix.
pub fn parse_record<'a>(line: &'a str, prefix: &str) -> Option<LogRecord<'a>> {
    let mut fields = line.split('\t');
    let time = fields.next()?;
    let tag = fields.next()?;
    let payload = fields.next()?;

    let encoded = &tag[tag.find(prefix)?..];
    let mut parts = encoded.split(':');
    let head = parts.next()?;
    let participant_id = parts.next()?;
    let timestamp = parts.next()?;
    if timestamp.is_empty() {
        return None;
    }

    let (last, _) = head.char_indices().next_back()?;
    let unix_seconds = parse_unix_seconds(timestamp)?;

    Some(LogRecord {
        time,
        tag,
        match_id: &head[last..],
        participant_id,
        unix_seconds,
        payload,
    })
}

/// Tests log lines against one replay key
#[derive(Debug, Clone)]
pub struct RecordMatcher {
    key: ReplayKey,
    prefix: String,
}

impl RecordMatcher {
    pub fn new(key: ReplayKey, namespace: &str) -> Self {
        RecordMatcher {
            key,
            prefix: format!("{namespace}.info."),
        }
    }

    pub fn key(&self) -> &ReplayKey {
        &self.key
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Payload of `line` when its encoded key equals this matcher's key
    pub fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        let record = parse_record(line, &self.prefix)?;
        if record.match_id != self.key.match_id || record.participant_id != self.key.participant_id
        {
            return None;
        }
        // Formatting is the expensive step; ids are compared first.
        let started_at = record.started_at()?;
        (started_at == self.key.start_time).then_some(record.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str =
        r#"{"who":"7","item":"food","turn":0,"coordinates":{"x":2,"y":3}}"#;

    fn key() -> ReplayKey {
        ReplayKey::new(format_local_timestamp(1609459200.5).unwrap(), "3", "7")
    }

    fn line(tag: &str) -> String {
        format!("2021-01-01T00:00:01\t{tag}\t{PAYLOAD}")
    }

    #[test]
    fn matching_line_returns_payload() {
        let matcher = RecordMatcher::new(key(), "luasnake");
        let line = line("luasnake.info.3:7:1609459200.5");
        assert_eq!(matcher.match_line(&line), Some(PAYLOAD));
    }

    #[test]
    fn same_second_matches() {
        let matcher = RecordMatcher::new(key(), "luasnake");
        let line = line("luasnake.info.3:7:1609459200.999");
        assert_eq!(matcher.match_line(&line), Some(PAYLOAD));
    }

    #[test]
    fn differing_fields_do_not_match() {
        let matcher = RecordMatcher::new(key(), "luasnake");
        for tag in [
            "luasnake.info.4:7:1609459200.5",
            "luasnake.info.3:8:1609459200.5",
            "luasnake.info.3:7:1609462800",
            "robosnake.info.3:7:1609459200.5",
        ] {
            assert_eq!(matcher.match_line(&line(tag)), None, "{tag}");
        }
    }

    #[test]
    fn match_id_is_last_character_of_first_part() {
        let line = line("x.luasnake.info.13:7:10");
        let record = parse_record(&line, "luasnake.info.").unwrap();
        assert_eq!(record.match_id, "3");
        assert_eq!(record.participant_id, "7");
        assert_eq!(record.unix_seconds, 10.0);
        assert_eq!(record.time, "2021-01-01T00:00:01");
        assert_eq!(record.tag, "x.luasnake.info.13:7:10");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let prefix = "luasnake.info.";
        for bad in [
            String::new(),
            "just one field".to_string(),
            "a\tluasnake.info.3:7:1".to_string(),
            line("luasnake.debug.3:7:1609459200"),
            line("luasnake.info.3:7"),
            line("luasnake.info.3:7:"),
            line("luasnake.info.3:7:yesterday"),
        ] {
            assert!(parse_record(&bad, prefix).is_none(), "{bad:?}");
        }
    }

    #[test]
    fn trailing_fields_are_dropped_from_payload() {
        let record = parse_record("t\tluasnake.info.3:7:1\tp1\tp2", "luasnake.info.").unwrap();
        assert_eq!(record.payload, "p1");

        let matcher = RecordMatcher::new(key(), "luasnake");
        let line = format!("{}\thost=a", line("luasnake.info.3:7:1609459200.5"));
        assert_eq!(matcher.match_line(&line), Some(PAYLOAD));
    }

    #[test]
    fn extra_encoded_parts_are_ignored() {
        let line = line("luasnake.info.3:7:1609459200.5:extra");
        let record = parse_record(&line, "luasnake.info.").unwrap();
        assert_eq!(record.unix_seconds, 1609459200.5);
    }
}
