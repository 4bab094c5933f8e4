//! Embedded-JSON recovery: pulls one JSON object out of free-form oracle text.
//!
//! Order of attempts:
//! 1. the trimmed text, with a surrounding code fence removed, parsed directly
//! 2. greedy span from the first `{` to the last `}`
//! 3. balanced scan: the first depth-balanced `{...}` span (string-aware) that parses
//!
//! Step 3 only runs when step 2 failed, so it never changes a result the greedy
//! span would have produced. It rescues responses with two top-level objects or a
//! stray `}` in trailing prose.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecoveryError {
    #[error("oracle response contained no recoverable JSON object: {reason}")]
    MalformedResponse { raw: String, reason: String },
}

impl RecoveryError {
    pub fn raw(&self) -> &str {
        match self {
            RecoveryError::MalformedResponse { raw, .. } => raw,
        }
    }
}

pub fn recover_json(text: &str) -> Result<Map<String, Value>, RecoveryError> {
    let trimmed = text.trim();

    if let Some(object) = parse_object(strip_code_fence(trimmed)) {
        return Ok(object);
    }
    if let Some(object) = parse_object(trimmed) {
        return Ok(object);
    }

    let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) else {
        return Err(malformed(text, "no '{...}' span found"));
    };
    if start < end {
        if let Some(object) = parse_object(&trimmed[start..=end]) {
            return Ok(object);
        }
    }

    balanced_spans(trimmed)
        .find_map(parse_object)
        .ok_or_else(|| malformed(text, "no '{...}' span parsed as a JSON object"))
}

fn malformed(raw: &str, reason: &str) -> RecoveryError {
    RecoveryError::MalformedResponse {
        raw: raw.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Strips a ```` ``` ```` fence, with an optional language tag on the opening line.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = match rest.find('\n') {
        Some(i) if is_language_tag(&rest[..i]) => &rest[i + 1..],
        _ => rest,
    };
    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Yields every depth-balanced `{...}` span, in order of its opening brace.
/// Braces inside JSON strings do not count toward depth.
fn balanced_spans(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'{')
        .filter_map(move |(start, _)| {
            let mut depth = 0usize;
            let mut in_string = false;
            let mut escaped = false;
            for (offset, &b) in bytes[start..].iter().enumerate() {
                if in_string {
                    match b {
                        _ if escaped => escaped = false,
                        b'\\' => escaped = true,
                        b'"' => in_string = false,
                        _ => {}
                    }
                    continue;
                }
                match b {
                    b'"' => in_string = true,
                    b'{' => depth += 1,
                    b'}' => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(&text[start..=start + offset]);
                        }
                    }
                    _ => {}
                }
            }
            None
        })
}
