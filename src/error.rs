//! Error types shared by every ecosystem module.
//!
//! Each ecosystem parser returns [`ParseError`] rather than defining its own
//! enum, the way `deps-cargo`/`deps-go`/... each defined their own error type
//! in the teacher workspace: there the split existed because every crate also
//! carried registry/lockfile/LSP errors of its own. Here every ecosystem does
//! exactly one thing (parse a version or a range), so one error type —
//! carrying the offending input and a human-readable message — covers all of
//! them, per spec §7.

use thiserror::Error;

/// Failure parsing a version or range string.
///
/// Every variant carries the offending input substring, per spec §7's
/// propagation policy: "parse errors surface to the caller unchanged."
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty after trimming whitespace.
    #[error("empty input")]
    Empty,

    /// The input does not match the ecosystem's grammar.
    #[error("invalid version format in '{input}': {message}")]
    InvalidFormat { input: String, message: String },

    /// A numeric segment failed to parse as a non-negative integer.
    #[error("invalid numeric segment '{segment}' in '{input}'")]
    InvalidNumeric { input: String, segment: String },

    /// A character outside the grammar's allowed set for a segment.
    #[error("invalid character '{ch}' in {segment} of '{input}'")]
    InvalidChar {
        input: String,
        ch: char,
        segment: String,
    },

    /// A malformed, negative, or misplaced epoch.
    #[error("invalid epoch in '{input}'")]
    InvalidEpoch { input: String },

    /// An unrecognized comparator operator.
    #[error("unknown operator '{operator}' in '{input}'")]
    InvalidOperator { input: String, operator: String },

    /// A comparator with no version following it.
    #[error("missing version after operator in '{input}'")]
    MissingVersion { input: String },

    /// Structurally malformed range syntax: unclosed brackets, an empty
    /// bracket body, a trailing dash on a hyphen range, and the like.
    #[error("malformed range '{input}': {message}")]
    MalformedRange { input: String, message: String },

    /// Input exceeded the resource policy's length cap (spec §5).
    #[error("input of {len} bytes exceeds the {limit}-byte parse limit")]
    TooLong { len: usize, limit: usize },
}

impl ParseError {
    pub fn invalid_format(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            message: message.into(),
        }
    }

    pub fn invalid_numeric(input: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::InvalidNumeric {
            input: input.into(),
            segment: segment.into(),
        }
    }

    pub fn invalid_char(input: impl Into<String>, ch: char, segment: impl Into<String>) -> Self {
        Self::InvalidChar {
            input: input.into(),
            ch,
            segment: segment.into(),
        }
    }

    pub fn invalid_epoch(input: impl Into<String>) -> Self {
        Self::InvalidEpoch {
            input: input.into(),
        }
    }

    pub fn invalid_operator(input: impl Into<String>, operator: impl Into<String>) -> Self {
        Self::InvalidOperator {
            input: input.into(),
            operator: operator.into(),
        }
    }

    pub fn missing_version(input: impl Into<String>) -> Self {
        Self::MissingVersion {
            input: input.into(),
        }
    }

    pub fn malformed_range(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedRange {
            input: input.into(),
            message: message.into(),
        }
    }
}

/// Maximum input length accepted by any parser (spec §5: "reject
/// pathologically long inputs (>64 KB) with a parse error rather than
/// allocate proportionally").
pub const MAX_INPUT_LEN: usize = 64 * 1024;

/// Trims `input` and rejects it if empty or over [`MAX_INPUT_LEN`].
pub fn trim_and_check(input: &str) -> Result<&str, ParseError> {
    let trimmed = input.trim();
    if trimmed.len() > MAX_INPUT_LEN {
        return Err(ParseError::TooLong {
            len: trimmed.len(),
            limit: MAX_INPUT_LEN,
        });
    }
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(trimmed)
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Top-level error for the registry/VERS boundary (spec §4.1, §4.4).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No ecosystem is registered under this name.
    #[error("unknown ecosystem '{0}'")]
    UnknownEcosystem(String),

    /// Parsing a version or range failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The `vers:` URI itself was malformed (missing scheme, bad separators).
    #[error("malformed vers URI '{uri}': {message}")]
    InvalidVersUri { uri: String, message: String },

    /// Two versions or a version and a range belong to different
    /// ecosystems; comparing them is a programming error (spec §6).
    #[error("cannot compare '{left}' version against '{right}' version")]
    EcosystemMismatch {
        left: &'static str,
        right: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_rejects_empty() {
        assert_eq!(trim_and_check("  "), Err(ParseError::Empty));
        assert_eq!(trim_and_check("  1.0.0  "), Ok("1.0.0"));
    }

    #[test]
    fn rejects_oversize_input() {
        let huge = "1".repeat(MAX_INPUT_LEN + 1);
        assert!(matches!(
            trim_and_check(&huge),
            Err(ParseError::TooLong { .. })
        ));
    }

    #[test]
    fn display_includes_offending_input() {
        let err = ParseError::invalid_format("bogus", "not a version");
        assert!(err.to_string().contains("bogus"));
    }
}
