//! Upstream body decoding.
//!
//! The body is decoded as UTF-8 (malformed bytes become U+FFFD) and split
//! into lines on `\n`, `\r` or `\r\n`. Lines are appended to the buffer with
//! no separator, so line boundaries do not survive the relay.

/// Decode a raw body and join its lines without separators.
pub fn join_lines(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let mut content = String::with_capacity(text.len());
    for line in text.split(['\r', '\n']) {
        content.push_str(line);
    }
    content
}
