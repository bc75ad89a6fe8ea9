//! Turning free-form model replies into gift suggestions.
//!
//! Models are asked for a bare JSON array but routinely wrap it in prose or
//! Markdown fences, or emit slightly broken JSON. Extraction is a best-effort
//! salvage over a handful of candidate fragments; normalization never fails.

use crate::suggest::error::MalformedResponse;
use crate::suggest::GiftSuggestion;
use serde_json::Value;

pub const DEFAULT_TITLE: &str = "Gift";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";
pub const DEFAULT_REASONING: &str = "No reasoning provided.";
pub const DEFAULT_PRICE: &str = "Price unknown";

/// Upper bound on `[` positions scanned for balanced fragments
const MAX_SCAN_STARTS: usize = 32;
/// Upper bound on distinct candidate fragments tried
const MAX_CANDIDATES: usize = 8;

/// Strip markdown code fences from a response
fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(without_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (```json) up to the first newline.
    let body = match without_open.find('\n') {
        Some(idx) => &without_open[idx + 1..],
        None => without_open,
    };
    let body = match body.rfind("```") {
        Some(end) => &body[..end],
        None => body,
    };
    body.trim()
}

/// Balanced `[ ... ]` fragment starting at `start`, ignoring brackets inside strings
fn balanced_array_from(content: &str, start: usize) -> Option<&str> {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in content[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.pop() != Some(ch) {
                    return None;
                }
                if stack.is_empty() {
                    let end = start + offset + ch.len_utf8();
                    return Some(&content[start..end]);
                }
            }
            _ => {}
        }
    }
    None
}

/// First `[` through last `]`, the legacy greedy match
fn greedy_array_span(content: &str) -> Option<&str> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    (start < end).then(|| &content[start..=end])
}

fn push_unique<'a>(candidates: &mut Vec<&'a str>, candidate: &'a str) {
    if !candidates.contains(&candidate) {
        candidates.push(candidate);
    }
}

fn array_candidates(content: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    let starts = content
        .char_indices()
        .filter(|(_, ch)| *ch == '[')
        .map(|(idx, _)| idx)
        .take(MAX_SCAN_STARTS);

    for idx in starts {
        if let Some(fragment) = balanced_array_from(content, idx) {
            push_unique(&mut candidates, fragment);
            if candidates.len() >= MAX_CANDIDATES {
                break;
            }
        }
    }
    if let Some(span) = greedy_array_span(content) {
        push_unique(&mut candidates, span);
    }
    candidates
}

/// Drop commas followed only by whitespace before `]` or `}`, outside strings
fn strip_trailing_commas(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in json.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = json[idx + 1..].trim_start().chars().next();
            if matches!(next, Some(']') | Some('}')) {
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Try to fix common JSON issues from LLM responses
fn fix_json_issues(json: &str) -> String {
    let fixed = json
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");
    let fixed = strip_trailing_commas(&fixed);

    fixed
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Locate and parse the JSON array embedded in a model reply.
///
/// Candidates are balanced `[...]` fragments in order of appearance followed
/// by the greedy first-`[`-to-last-`]` span. Each is tried as-is, then after
/// light repair. The first array holding an object wins; an array of scalars
/// (`see [1]` in the prose) is only returned when no pass finds one.
///
/// A reply with no `[` that is nonetheless valid JSON (a lone object) is
/// reported as `NotAnArray` rather than `NoArray`.
pub fn extract_suggestion_array(text: &str) -> Result<Vec<Value>, MalformedResponse> {
    let clean = strip_markdown_fences(text);
    let candidates = array_candidates(clean);
    if candidates.is_empty() {
        if serde_json::from_str::<Value>(clean).is_ok() {
            return Err(MalformedResponse::NotAnArray);
        }
        return Err(MalformedResponse::NoArray);
    }

    let mut first_array: Option<Vec<Value>> = None;
    let mut last_err: Option<String> = None;

    for repair in [false, true] {
        for candidate in &candidates {
            let parsed = if repair {
                serde_json::from_str::<Vec<Value>>(&fix_json_issues(candidate))
            } else {
                serde_json::from_str::<Vec<Value>>(candidate)
            };

            match parsed {
                Ok(items) if items.iter().any(Value::is_object) => return Ok(items),
                Ok(items) => {
                    first_array.get_or_insert(items);
                }
                Err(err) => last_err = Some(err.to_string()),
            }
        }
    }

    match first_array {
        Some(items) => Ok(items),
        None => Err(MalformedResponse::InvalidJson(
            last_err.unwrap_or_else(|| "unknown parse error".to_string()),
        )),
    }
}

fn text_field(item: &Value, key: &str, default: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Map one parsed entry onto the canonical shape. Anything missing, blank or
/// non-string falls back to a fixed default.
pub fn normalize_suggestion(item: &Value) -> GiftSuggestion {
    GiftSuggestion {
        title: text_field(item, "title", DEFAULT_TITLE),
        description: text_field(item, "description", DEFAULT_DESCRIPTION),
        reasoning: text_field(item, "reasoning", DEFAULT_REASONING),
        estimated_price: text_field(item, "estimatedPrice", DEFAULT_PRICE),
    }
}

pub fn normalize_suggestions(items: &[Value]) -> Vec<GiftSuggestion> {
    items.iter().map(normalize_suggestion).collect()
}
