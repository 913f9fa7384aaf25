use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use common::ReplayKey;

/// Choice that selects the most recently indexed replay
pub const MOST_RECENT: i64 = -1;

pub fn format_options(keys: &[ReplayKey]) -> String {
    let mut out = String::from(
        "\nEnter INDEX for which game logfiles to lookup or -1 to replay the most recent\n\n\
         [INDEX]\ttimestamp, game_id, robosnake_id\n",
    );
    for (index, key) in keys.iter().enumerate() {
        out.push_str(&format!("[{}]\t{}\n", index, key));
    }
    out
}

/// Resolve an operator choice: an index into `keys`, or -1 for the last key
pub fn resolve_choice(keys: &[ReplayKey], choice: i64) -> Result<&ReplayKey> {
    if keys.is_empty() {
        bail!("No replays to choose from");
    }
    let index = if choice == MOST_RECENT {
        keys.len() - 1
    } else {
        usize::try_from(choice)
            .ok()
            .filter(|&index| index < keys.len())
            .with_context(|| {
                format!(
                    "Choice {} out of range (expected -1 to {})",
                    choice,
                    keys.len() - 1
                )
            })?
    };
    Ok(&keys[index])
}

/// List `keys` on `output` and read one choice from `input`
pub fn prompt_for_key<R: BufRead, W: Write>(
    keys: &[ReplayKey],
    mut input: R,
    mut output: W,
) -> Result<ReplayKey> {
    write!(output, "{}Choice: ", format_options(keys))?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read choice")?;
    let choice: i64 = line
        .trim()
        .parse()
        .with_context(|| format!("Invalid choice: {:?}", line.trim()))?;

    resolve_choice(keys, choice).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn keys() -> Vec<ReplayKey> {
        vec![
            ReplayKey::new("2021-01-01 00:00:00", "3", "7"),
            ReplayKey::new("2021-01-02 00:00:00", "4", "7"),
        ]
    }

    #[test]
    fn lists_every_key() {
        let text = format_options(&keys());
        assert!(text.contains("[0]\t'2021-01-01 00:00:00', '3', '7'\n"));
        assert!(text.contains("[1]\t'2021-01-02 00:00:00', '4', '7'\n"));
    }

    #[test]
    fn minus_one_is_most_recent() {
        let keys = keys();
        assert_eq!(resolve_choice(&keys, MOST_RECENT).unwrap().match_id, "4");
        assert_eq!(resolve_choice(&keys, 0).unwrap().match_id, "3");
    }

    #[test]
    fn out_of_range_is_rejected() {
        let keys = keys();
        assert!(resolve_choice(&keys, 2).is_err());
        assert!(resolve_choice(&keys, -2).is_err());
        assert!(resolve_choice(&[], MOST_RECENT).is_err());
    }

    #[test]
    fn reads_choice_from_input() {
        let mut output = Vec::new();
        let key = prompt_for_key(&keys(), Cursor::new("1\n"), &mut output).unwrap();
        assert_eq!(key.match_id, "4");
        assert!(String::from_utf8(output).unwrap().ends_with("Choice: "));
    }

    #[test]
    fn garbage_input_is_an_error() {
        let result = prompt_for_key(&keys(), Cursor::new("first\n"), Vec::new());
        assert!(result.is_err());
    }
}
