//! Identifier escaping for type-name grammar punctuation.

use std::borrow::Cow;

/// Characters that are grammar punctuation in qualified type names and must be escaped
/// with a backslash when they occur inside an identifier.
pub const RESERVED_CHARS: [char; 7] = [',', '+', '*', '&', '[', ']', '\\'];

/// Check if `c` needs a backslash inside an identifier
#[must_use]
pub fn is_reserved(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
}

/// Append `ident` to `out`, escaping reserved characters
pub fn escape_into(out: &mut String, ident: &str) {
    for c in ident.chars() {
        if is_reserved(c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Escape reserved characters in `ident`, borrowing when nothing needs escaping
#[must_use]
pub fn escape(ident: &str) -> Cow<'_, str> {
    if ident.chars().any(is_reserved) {
        let mut escaped = String::with_capacity(ident.len() + 4);
        escape_into(&mut escaped, ident);
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(ident)
    }
}
