use std::borrow::Cow;

use percent_encoding::{
    percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS,
};

/// Everything but the RFC 3986 unreserved characters.
const QUERY_COMPONENT: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// What the `url` crate percent-encodes when it writes a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escapes a path segment the way it shows up in a serialized URL. `%` is
/// left alone, so already-encoded input passes through.
#[inline]
pub fn escape_path(s: &str) -> Cow<'_, str> {
    utf8_percent_encode(s, PATH_SEGMENT).into()
}

/// Escapes a query key or value so it can be placed between `&` and `=`.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    utf8_percent_encode(s, QUERY_COMPONENT).into()
}

/// Reverses [`escape`], also decoding `+` as a space.
pub fn unescape(s: &str) -> crate::Result<String> {
    let bytes = s.as_bytes();

    for (i, _) in s.match_indices('%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));

        if !valid {
            return Err(crate::Error::InvalidEscape(s.to_owned()));
        }
    }

    let spaced = if s.contains('+') {
        Cow::Owned(s.replace('+', " "))
    } else {
        Cow::Borrowed(s)
    };

    let decoded = percent_decode_str(&spaced).decode_utf8()?;

    Ok(decoded.into_owned())
}
