//! Nested block extraction
//!
//! A nested block opens with an exact marker line and continues over the
//! indented lines that follow it:
//!
//! ```text
//! !!! ad-note
//!     title: Nested
//!     Body text
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest spaces that count as one indentation group
pub const INDENT_MIN_SPACES: usize = 2;

/// Most spaces consumed by a single indentation group
pub const INDENT_MAX_SPACES: usize = 4;

/// Errors raised while extracting a nested block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("marker line {marker:?} not found at or after line {from}")]
    MarkerNotFound { marker: String, from: usize },
}

/// A nested block located in a line sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedBlock {
    /// Absolute index of the marker line
    pub start: usize,
    /// Absolute index of the last consumed body line (inclusive)
    pub end: usize,
    /// Body text with the common indentation removed
    pub src: String,
    /// Block type tag taken from the marker
    pub kind: String,
}

impl NestedBlock {
    /// Inclusive range of line numbers covered by the block, marker included.
    pub fn line_range(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Rules deciding which lines continue a nested block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Indentation {
    pub min_spaces: usize,
    pub max_spaces: usize,
    /// Keep blank lines that sit between indented lines
    pub allow_blank_lines: bool,
}

impl Default for Indentation {
    fn default() -> Self {
        Self {
            min_spaces: INDENT_MIN_SPACES,
            max_spaces: INDENT_MAX_SPACES,
            allow_blank_lines: false,
        }
    }
}

impl Indentation {
    /// Count the leading indentation groups of a line.
    ///
    /// A group is either a single tab or a run of `min_spaces` up to
    /// `max_spaces` spaces. Leftover spaces shorter than a group end the count.
    pub fn depth(&self, line: &str) -> usize {
        let min = self.min_spaces.max(1);
        let max = self.max_spaces.max(min);
        let bytes = line.as_bytes();

        let mut pos = 0;
        let mut groups = 0;
        while pos < bytes.len() {
            if bytes[pos] == b'\t' {
                pos += 1;
                groups += 1;
                continue;
            }

            let spaces = bytes[pos..].iter().take_while(|&&b| b == b' ').count();
            if spaces < min {
                break;
            }
            pos += spaces.min(max);
            groups += 1;
        }

        groups
    }

    /// Whether a line continues the block body
    pub fn is_continuation(&self, line: &str) -> bool {
        self.depth(line) > 0
    }

    fn is_blank(line: &str) -> bool {
        line.trim().is_empty()
    }
}

/// Extract the nested block opened by `marker` using the default indentation rules.
pub fn extract_block<S: AsRef<str>>(
    lines: &[S],
    from: usize,
    marker: &str,
) -> Result<NestedBlock, ExtractError> {
    extract_block_with(lines, from, marker, &Indentation::default())
}

/// Extract the nested block opened by the first line equal to `marker` at or
/// after `from`.
pub fn extract_block_with<S: AsRef<str>>(
    lines: &[S],
    from: usize,
    marker: &str,
    indentation: &Indentation,
) -> Result<NestedBlock, ExtractError> {
    let not_found = || ExtractError::MarkerNotFound {
        marker: marker.to_string(),
        from,
    };

    let rest = lines.get(from..).ok_or_else(not_found)?;
    let first = rest
        .iter()
        .position(|line| line.as_ref() == marker)
        .ok_or_else(not_found)?;

    let mut next = first + 1;
    while next < rest.len() {
        if indentation.is_continuation(rest[next].as_ref()) {
            next += 1;
            continue;
        }
        if !indentation.allow_blank_lines {
            break;
        }

        // Blank runs belong to the block only when indented text follows them
        let blanks = rest[next..]
            .iter()
            .take_while(|line| Indentation::is_blank(line.as_ref()))
            .count();
        match rest.get(next + blanks) {
            Some(line) if blanks > 0 && indentation.is_continuation(line.as_ref()) => {
                next += blanks;
            }
            _ => break,
        }
    }

    let body = &rest[first + 1..next];
    let src = dedent(body, indentation);
    let kind = marker.rsplit('-').next().unwrap_or(marker).to_string();

    Ok(NestedBlock {
        start: from + first,
        end: from + next - 1,
        src,
        kind,
    })
}

/// Strip the leading whitespace of the first indented line from every line that starts with it.
///
/// Blank lines kept by `allow_blank_lines` never supply the prefix.
fn dedent<S: AsRef<str>>(body: &[S], indentation: &Indentation) -> String {
    let prefix = body
        .iter()
        .map(AsRef::as_ref)
        .find(|line| indentation.is_continuation(line))
        .map_or("", |line| &line[..line.len() - line.trim_start().len()]);

    body.iter()
        .map(|line| {
            let line = line.as_ref();
            line.strip_prefix(prefix).unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
