//! Escaping of query-string reserved characters

/// Characters with special meaning in the query grammar
pub const RESERVED: &[char] = &[
    '\\', '+', '-', '!', '(', ')', ':', '^', '[', ']', '"', '{', '}', '~', '*', '?', '|', '&',
];

/// Check if a character must be escaped outside a quoted literal
pub fn is_reserved(ch: char) -> bool {
    RESERVED.contains(&ch)
}

/// Backslash-escape every reserved character
///
/// Not idempotent: escaping already-escaped text escapes the backslashes again.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 4);
    for ch in raw.chars() {
        if is_reserved(ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Wrap a string literal in double quotes
///
/// Only `"` and `\` are escaped; the other reserved characters are inert
/// inside a quoted phrase.
pub fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for ch in raw.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}
