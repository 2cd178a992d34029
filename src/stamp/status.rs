use std::path::Path;

use crate::stamp::error::StampError;

/// One `KEY value` line from a workspace status file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Splits a line at its first space. The value keeps any further spaces.
pub fn split_status_line(line: &str) -> Option<StatusLine<'_>> {
    line.split_once(' ')
        .map(|(key, value)| StatusLine { key, value })
}

/// Line boundaries recognised in status files, besides `\r\n`.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Splits `content` into lines without their terminators. `\r\n` counts as
/// one break and a trailing break does not produce an empty last line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        match rest.find(LINE_BREAKS) {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let brk = if rest[idx..].starts_with("\r\n") {
                    2
                } else {
                    rest[idx..].chars().next().map_or(1, char::len_utf8)
                };
                rest = &rest[idx + brk..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Parses a whole status file. Any line without a space aborts the parse;
/// `path` is only used to label the error.
pub fn parse_status<'a>(
    path: &Path,
    content: &'a str,
) -> Result<Vec<StatusLine<'a>>, StampError> {
    split_lines(content)
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            split_status_line(line).ok_or_else(|| StampError::MalformedStatusLine {
                path: path.to_path_buf(),
                line_no: idx + 1,
                line: line.to_string(),
            })
        })
        .collect()
}
