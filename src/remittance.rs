//! Decoder for the fixed-width remittance annotation.
//!
//! The bank packs free text into lines of exactly [`LINE_WIDTH`] characters:
//! a two-digit, zero-padded line number followed by [`PAYLOAD_WIDTH`]
//! characters of space-padded payload.
//!
//! ```text
//! 01Invoice 4711                         02Thank you
//! ```
//!
//! decodes to `"Invoice 4711 Thank you"`.

use log::{debug, warn};
use thiserror::Error;

/// Width of the line-number prefix.
pub const PREFIX_WIDTH: usize = 2;

/// Width of the payload following the prefix.
pub const PAYLOAD_WIDTH: usize = 35;

/// Width of one encoded line.
pub const LINE_WIDTH: usize = PREFIX_WIDTH + PAYLOAD_WIDTH;

/// Payload tag introducing the end-to-end reference; it and everything after
/// it is metadata, not narrative text.
pub const END_TO_END_MARKER: &str = "End-to-End-Ref";

/// Malformed remittance payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A line did not start with a two-digit line number.
    #[error("remittance line {line} has malformed prefix {prefix:?}")]
    MalformedPrefix {
        line: usize,
        prefix: String,
        /// Text decoded from the lines before the bad one.
        partial: String,
    },
}

/// Decodes an annotation, degrading to the text decoded so far if a line is
/// malformed.
pub fn decode(raw: &str) -> String {
    match try_decode(raw) {
        Ok(text) => text,
        Err(DecodeError::MalformedPrefix {
            line,
            prefix,
            partial,
        }) => {
            warn!(
                "Remittance line {} has malformed prefix {:?}, keeping {} decoded characters",
                line,
                prefix,
                partial.chars().count()
            );
            partial
        }
    }
}

/// Strict decoding: fails on the first line without a numeric prefix.
///
/// A trailing fragment shorter than [`LINE_WIDTH`] is ignored.
pub fn try_decode(raw: &str) -> Result<String, DecodeError> {
    let chars: Vec<char> = raw.chars().collect();
    let mut lines: Vec<String> = Vec::new();

    let mut chunks = chars.chunks_exact(LINE_WIDTH);
    for (idx, chunk) in chunks.by_ref().enumerate() {
        let (prefix, payload) = chunk.split_at(PREFIX_WIDTH);
        if !prefix.iter().all(|c| c.is_ascii_digit()) {
            return Err(DecodeError::MalformedPrefix {
                line: idx + 1,
                prefix: prefix.iter().collect(),
                partial: lines.join(" "),
            });
        }

        let payload: String = payload.iter().collect();
        if payload.contains(END_TO_END_MARKER) {
            break;
        }
        lines.push(payload.trim_end_matches(' ').to_string());
    }

    let rest = chunks.remainder();
    if !rest.is_empty() {
        debug!(
            "Ignoring {} trailing remittance characters after the last full line",
            rest.len()
        );
    }

    Ok(lines.join(" "))
}

/// Encodes lines of free text into the fixed-width layout.
///
/// Payloads longer than [`PAYLOAD_WIDTH`] characters are cut.
pub fn encode<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let payload: String = line.as_ref().chars().take(PAYLOAD_WIDTH).collect();
            format!(
                "{:02}{:<width$}",
                (idx + 1) % 100,
                payload,
                width = PAYLOAD_WIDTH
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(decode(""), "");
    }

    #[test]
    fn test_single_line() {
        let raw = encode(&["Invoice 4711"]);
        assert_eq!(raw.chars().count(), LINE_WIDTH);
        assert_eq!(decode(&raw), "Invoice 4711");
    }

    #[test]
    fn test_lines_joined_with_single_space() {
        let raw = encode(&["Invoice 4711", "Thank you", "Customer 99"]);
        assert_eq!(decode(&raw), "Invoice 4711 Thank you Customer 99");
    }

    #[test]
    fn test_decoded_length_matches_trimmed_payloads() {
        let payloads = ["abc", "full width payload of 35 characters", "x  y"];
        let raw = encode(&payloads);
        let expected: usize =
            payloads.iter().map(|p| p.trim_end().len()).sum::<usize>() + payloads.len() - 1;
        assert_eq!(decode(&raw).len(), expected);
    }

    #[test]
    fn test_stops_at_end_to_end_marker() {
        let raw = encode(&["Rent March", "End-to-End-Ref.:", "NOTPROVIDED", "Secret"]);
        let text = decode(&raw);
        assert_eq!(text, "Rent March");
        assert!(!text.contains("NOTPROVIDED"));
        assert!(!text.contains("Secret"));
    }

    #[test]
    fn test_marker_on_first_line_yields_empty() {
        assert_eq!(decode("01End-to-End-Ref:12345678901234"), "");

        let padded = format!("{:<37}", "01End-to-End-Ref:12345678901234");
        assert_eq!(padded.len(), LINE_WIDTH);
        assert_eq!(decode(&padded), "");
    }

    #[test]
    fn test_partial_trailing_fragment_ignored() {
        let mut raw = encode(&["Groceries"]);
        raw.push_str("02Half a li");
        assert_eq!(decode(&raw), "Groceries");
    }

    #[test]
    fn test_input_shorter_than_a_line() {
        assert_eq!(decode("01Short"), "");
    }

    #[test]
    fn test_multibyte_characters_do_not_split() {
        let raw = encode(&["Überweisung Müller", "Grüße"]);
        assert_eq!(decode(&raw), "Überweisung Müller Grüße");
    }

    #[test]
    fn test_leading_spaces_are_kept() {
        let raw = encode(&["  indented"]);
        assert_eq!(decode(&raw), "  indented");
    }

    #[test]
    fn test_malformed_prefix_is_contained() {
        let mut raw = encode(&["First line"]);
        raw.push_str(&format!("{:<37}", "XXbroken"));
        raw.push_str(&encode(&["never reached"]));

        assert_eq!(
            try_decode(&raw),
            Err(DecodeError::MalformedPrefix {
                line: 2,
                prefix: "XX".to_string(),
                partial: "First line".to_string(),
            })
        );
        assert_eq!(decode(&raw), "First line");
    }

    #[test]
    fn test_reencoding_is_stable() {
        let once = decode(&encode(&["Insurance  ", "Policy 12"]));
        let twice = decode(&encode(&once.split(' ').collect::<Vec<_>>()));
        assert_eq!(once, "Insurance Policy 12");
        assert_eq!(once, twice);
    }
}
