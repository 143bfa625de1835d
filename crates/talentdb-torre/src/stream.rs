//! Parsing for the newline-delimited JSON search stream.

use crate::types::CandidateRecord;

/// Parses every non-blank line of `body` as a [`CandidateRecord`].
///
/// A line that fails to parse is logged and skipped; it never fails the
/// whole stream.
#[must_use]
pub fn parse_search_stream(body: &str) -> Vec<CandidateRecord> {
    body.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(
            |(index, line)| match serde_json::from_str::<CandidateRecord>(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(line = index + 1, error = %e, "skipping unparseable search line");
                    None
                }
            },
        )
        .collect()
}
