use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one participant's log stream for one match.
///
/// All three fields are compared with exact string equality. `start_time`
/// is produced by [`crate::util::format_local_timestamp`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct ReplayKey {
    pub start_time: String,
    pub match_id: String,
    pub participant_id: String,
}

impl ReplayKey {
    pub fn new(
        start_time: impl Into<String>,
        match_id: impl Into<String>,
        participant_id: impl Into<String>,
    ) -> Self {
        ReplayKey {
            start_time: start_time.into(),
            match_id: match_id.into(),
            participant_id: participant_id.into(),
        }
    }
}

impl fmt::Display for ReplayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}', '{}', '{}'",
            self.start_time, self.match_id, self.participant_id
        )
    }
}
