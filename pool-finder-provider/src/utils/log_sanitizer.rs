//! Log sanitization utilities
//!
//! Keeps bearer tokens, refresh tokens and passwords out of debug/error logs,
//! and caps how much of a response body ends up in a single log line.

/// Maximum number of bytes of a body to include in log output.
const TRUNCATE_LIMIT: usize = 256;

/// JSON keys whose string values are masked before logging.
const SECRET_KEYS: [&str; 3] = ["\"accessToken\"", "\"refreshToken\"", "\"password\""];

/// Form fields whose values are masked before logging.
const SECRET_FORM_FIELDS: [&str; 3] = ["password=", "refresh_token=", "access_token="];

const MASK: &str = "***";

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// `TRUNCATE_LIMIT` bytes (on a char boundary) plus the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask token and password values in a JSON or form-encoded body.
///
/// Works on raw text so it also handles bodies that fail to parse.
pub fn redact_secrets(s: &str) -> String {
    let mut out = s.to_string();
    for key in SECRET_KEYS {
        out = mask_json_value(&out, key);
    }
    for field in SECRET_FORM_FIELDS {
        out = mask_form_value(&out, field);
    }
    out
}

/// Redact, then truncate. This is what request/response logging should use.
pub fn sanitize_for_log(s: &str) -> String {
    truncate_for_log(&redact_secrets(s))
}

fn mask_json_value(s: &str, key: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find(key) {
        let (head, tail) = rest.split_at(pos + key.len());
        out.push_str(head);
        // Expect `: "value"`
        let trimmed = tail.trim_start_matches([' ', ':']);
        let skipped = tail.len() - trimmed.len();
        let Some(value) = trimmed.strip_prefix('"') else {
            rest = tail;
            continue;
        };
        let Some(end) = value.find('"') else {
            rest = tail;
            continue;
        };
        out.push_str(&tail[..skipped]);
        out.push('"');
        out.push_str(MASK);
        out.push('"');
        rest = &value[end + 1..];
    }
    out.push_str(rest);
    out
}

fn mask_form_value(s: &str, field: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find(field) {
        let at_boundary = pos == 0 || rest[..pos].ends_with('&');
        let (head, tail) = rest.split_at(pos + field.len());
        out.push_str(head);
        if !at_boundary {
            rest = tail;
            continue;
        }
        let end = tail.find('&').unwrap_or(tail.len());
        out.push_str(MASK);
        rest = &tail[end..];
    }
    out.push_str(rest);
    out
}
