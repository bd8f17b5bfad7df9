//! Response body decoding and the optional character cap.

use crate::error::FetchError;

/// Upper bound on bytes needed to hold `max_chars` UTF-8 characters.
/// The transport uses it to stop reading once enough bytes have arrived.
/// Never less than one character's worth, so a zero cap still reads enough to
/// tell a non-empty body from an empty one.
pub fn byte_budget(max_chars: Option<usize>) -> Option<usize> {
    max_chars.map(|n| n.max(1).saturating_mul(4))
}

/// Decodes the raw body as UTF-8 (invalid sequences become U+FFFD) and applies
/// the character cap. An empty body is an error.
pub fn decode_body(bytes: &[u8], max_chars: Option<usize>) -> Result<String, FetchError> {
    if bytes.is_empty() {
        return Err(FetchError::EmptyResponse);
    }
    let text = String::from_utf8_lossy(bytes);
    Ok(match max_chars {
        Some(limit) => truncate_chars(&text, limit).to_string(),
        None => text.into_owned(),
    })
}

/// Longest prefix of `s` with at most `max_chars` characters.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
