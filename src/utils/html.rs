//! HTML escaping for rendered head elements.
//!
//! - `escape()` - text content
//! - `escape_attr()` - quoted attribute values
//! - `escape_script()` - raw `<script>` bodies

use std::borrow::Cow;

/// Characters special in text content.
const TEXT_CHARS: [char; 3] = ['<', '>', '&'];

/// Characters special inside a quoted attribute value.
const ATTR_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in text content.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// # Example
/// ```ignore
/// assert_eq!(escape("<b>"), "&lt;b&gt;");
/// assert_eq!(escape("TidesDB"), "TidesDB"); // No allocation
/// ```
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    escape_with(s, &TEXT_CHARS)
}

/// Escape an attribute value for use inside double quotes.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, &ATTR_CHARS)
}

/// Neutralize closing sequences in a raw `<script>` body.
///
/// Script content is not entity-decoded by browsers, so only `</script`
/// (any case) needs breaking up.
pub fn escape_script(s: &str) -> Cow<'_, str> {
    const NEEDLE: &str = "</script";
    let lower = s.to_ascii_lowercase();
    if !lower.contains(NEEDLE) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 4);
    let mut rest = 0;
    // ASCII lowercasing keeps byte offsets aligned with `s`.
    for (at, _) in lower.match_indices(NEEDLE) {
        result.push_str(&s[rest..at]);
        result.push_str("<\\/");
        rest = at + 2;
    }
    result.push_str(&s[rest..]);
    Cow::Owned(result)
}

#[inline]
fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c).filter(|_| chars.contains(&c)) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}
