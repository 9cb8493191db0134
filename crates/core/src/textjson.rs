//! Best-effort extraction of a JSON object embedded in free text.
//!
//! The language oracle is asked for bare JSON but routinely wraps it in
//! prose. These helpers locate the first balanced `{...}` span and parse it,
//! returning `None` on any failure rather than surfacing an error.

use serde::de::DeserializeOwned;

/// Returns the first balanced `{...}` span in `text`.
///
/// Brace counting is string-aware: braces inside quoted JSON strings (and
/// escaped quotes within them) do not affect nesting.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parses the first embedded JSON object in `text` into `T`.
pub fn parse_embedded<T: DeserializeOwned>(text: &str) -> Option<T> {
    serde_json::from_str(first_json_object(text)?).ok()
}
