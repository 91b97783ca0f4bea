//! Input sanitization for text entering the compose area.

/// Sanitize text before it is inserted into the input buffer.
///
/// Pasted content can carry control characters that either corrupt the
/// terminal display or confuse the backend. Tabs become four spaces,
/// carriage returns (alone or as part of CRLF) become plain newlines, and
/// every other control character is dropped.
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\t' => sanitized.push_str("    "),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                sanitized.push('\n');
            }
            '\n' => sanitized.push('\n'),
            c if c.is_control() => {}
            c => sanitized.push(c),
        }
    }
    sanitized
}
