//! Brace-style formatting for variable lines and output templates.
//!
//! Build rules pass format strings such as `#define {} "{}"` and templates
//! containing `{vars}` or `{BUILD_USER}`. Only plain field names are
//! supported: `{{`/`}}` escapes, auto-numbered `{}`, explicit `{0}`/`{1}`
//! and named fields. Format specs and conversions are rejected.

use std::collections::BTreeMap;

use crate::stamp::defaults::VARS_PLACEHOLDER;
use crate::stamp::error::StampError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

fn parse(fmt: &str) -> Result<Vec<Segment>, StampError> {
    let mut out = Vec::new();
    let mut lit = String::new();
    let mut chars = fmt.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                lit.push('{');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    match n {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(StampError::UnbalancedBrace('{')),
                        _ => name.push(n),
                    }
                }
                if !closed {
                    return Err(StampError::UnbalancedBrace('{'));
                }
                if name.contains(':') || name.contains('!') {
                    return Err(StampError::UnsupportedSpec(name));
                }
                if !lit.is_empty() {
                    out.push(Segment::Literal(std::mem::take(&mut lit)));
                }
                out.push(Segment::Field(name));
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                lit.push('}');
            }
            '}' => return Err(StampError::UnbalancedBrace('}')),
            _ => lit.push(c),
        }
    }
    if !lit.is_empty() {
        out.push(Segment::Literal(lit));
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Key,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum VarPart {
    Literal(String),
    Slot(Slot),
}

/// A pre-parsed two-slot format applied to every `(key, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarFormat {
    source: String,
    parts: Vec<VarPart>,
}

impl VarFormat {
    pub fn parse(fmt: &str) -> Result<Self, StampError> {
        let mut parts = Vec::new();
        let mut auto: Option<usize> = None;
        let mut manual = false;
        for seg in parse(fmt)? {
            let name = match seg {
                Segment::Literal(s) => {
                    parts.push(VarPart::Literal(s));
                    continue;
                }
                Segment::Field(name) => name,
            };
            let idx = match name.as_str() {
                "" => {
                    if manual {
                        return Err(StampError::MixedNumbering);
                    }
                    let next = auto.map_or(0, |i| i + 1);
                    auto = Some(next);
                    next
                }
                "k" => 0,
                "v" => 1,
                digits if digits.bytes().all(|b| b.is_ascii_digit()) => {
                    if auto.is_some() {
                        return Err(StampError::MixedNumbering);
                    }
                    manual = true;
                    digits
                        .parse::<usize>()
                        .map_err(|_| StampError::UnknownPlaceholder(digits.to_string()))?
                }
                other => return Err(StampError::UnknownPlaceholder(other.to_string())),
            };
            let slot = match idx {
                0 => Slot::Key,
                1 => Slot::Value,
                n => return Err(StampError::PositionalOutOfRange(n)),
            };
            parts.push(VarPart::Slot(slot));
        }
        Ok(Self {
            source: fmt.to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn render(&self, key: &str, value: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + key.len() + value.len());
        for part in &self.parts {
            match part {
                VarPart::Literal(s) => out.push_str(s),
                VarPart::Slot(Slot::Key) => out.push_str(key),
                VarPart::Slot(Slot::Value) => out.push_str(value),
            }
        }
        out
    }
}

/// Joins the formatted lines of `vars` (already key-sorted) with `\n`.
pub fn serialize_vars(format: &VarFormat, vars: &BTreeMap<String, String>) -> String {
    vars.iter()
        .map(|(k, v)| format.render(k, v))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitutes `{vars}` with `block` and `{NAME}` with the matching variable.
pub fn render_template(
    template: &str,
    block: &str,
    vars: &BTreeMap<String, String>,
) -> Result<String, StampError> {
    let mut out = String::with_capacity(template.len() + block.len());
    for seg in parse(template)? {
        match seg {
            Segment::Literal(s) => out.push_str(&s),
            Segment::Field(name) if name == VARS_PLACEHOLDER => out.push_str(block),
            Segment::Field(name) => match vars.get(&name) {
                Some(v) => out.push_str(v),
                None => return Err(StampError::UnknownPlaceholder(name)),
            },
        }
    }
    Ok(out)
}
