// Percent-encoding policies for expanded values

use std::borrow::Cow;

/// RFC 3986 reserved characters, kept as-is by `+` and `#` expansions.
const RESERVED: &[u8] = b":/?#[]@!$&'()*+,;=";

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

fn is_reserved_allowed(b: u8) -> bool {
    is_unreserved(b) || RESERVED.contains(&b)
}

/// Percent-encode `value` for an expression.
///
/// With `allow_reserved` only characters outside unreserved + reserved are
/// encoded; otherwise everything outside the unreserved set is. Each byte of
/// a multi-byte character is encoded on its own, with uppercase hex digits.
pub fn escape(value: &str, allow_reserved: bool) -> Cow<'_, str> {
    if allow_reserved {
        escape_reserved(value)
    } else {
        urlencoding::encode(value)
    }
}

fn escape_reserved(value: &str) -> Cow<'_, str> {
    if value.bytes().all(is_reserved_allowed) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() * 3);
    let mut start = 0;
    for (i, b) in value.bytes().enumerate() {
        if is_reserved_allowed(b) {
            continue;
        }
        if start < i {
            escaped.push_str(&value[start..i]);
        }
        escaped.push_str(&urlencoding::encode_binary(&[b]));
        start = i + 1;
    }
    escaped.push_str(&value[start..]);
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_unreserved_policy() {
        assert_eq!(escape("Hello World!", false), "Hello%20World%21");
        assert_eq!(escape("/foo/bar", false), "%2Ffoo%2Fbar");
        assert_eq!(escape("50%", false), "50%25");
        assert_eq!(escape("a-b.c_d~e", false), "a-b.c_d~e");
    }

    #[test]
    fn test_escape_reserved_policy() {
        assert_eq!(escape("/foo/bar", true), "/foo/bar");
        assert_eq!(escape("Hello World!", true), "Hello%20World!");
        assert_eq!(escape("50%", true), "50%25");
        assert_eq!(escape(":/?#[]@!$&'()*+,;=", true), ":/?#[]@!$&'()*+,;=");
    }

    #[test]
    fn test_escape_multibyte_per_byte() {
        assert_eq!(escape("\u{e9}", false), "%C3%A9");
        assert_eq!(escape("\u{e9}", true), "%C3%A9");
        assert_eq!(escape("caf\u{e9}/x", true), "caf%C3%A9/x");
    }

    #[test]
    fn test_escape_is_noop_on_unreserved_input() {
        assert!(matches!(escape("already-safe_1.0~", false), Cow::Borrowed(_)));
        assert!(matches!(escape("a/b?c=d", true), Cow::Borrowed(_)));
    }
}
