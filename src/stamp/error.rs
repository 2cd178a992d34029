use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StampError {
    #[error("{path}:{line_no}: malformed status line {line:?} (expected \"KEY value\")")]
    MalformedStatusLine {
        path: PathBuf,
        line_no: usize,
        line: String,
    },
    #[error("status key {0:?} is reserved for the template variable block")]
    ReservedKey(String),
    #[error("BUILD_TIMESTAMP {0:?} is not a base-10 integer")]
    InvalidTimestamp(String),
    #[error("BUILD_TIMESTAMP {0} is outside the representable date range")]
    TimestampOutOfRange(i64),
    #[error("pattern {name} failed to compile: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("pattern {0} must contain capture group 1")]
    PatternMissingGroup(&'static str),
    #[error("unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),
    #[error("positional placeholder {{{0}}} is out of range (only key and value are available)")]
    PositionalOutOfRange(usize),
    #[error("cannot switch between automatic and manual field numbering")]
    MixedNumbering,
    #[error("unsupported format spec or conversion in placeholder {{{0}}}")]
    UnsupportedSpec(String),
    #[error("single '{0}' encountered in format string")]
    UnbalancedBrace(char),
}
