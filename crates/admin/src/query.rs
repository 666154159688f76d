use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything `encodeURIComponent` escapes.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a URL component the way browsers' `encodeURIComponent` does.
pub(crate) fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `path?key=value` with `value` encoded.
pub(crate) fn with_query(path: &str, key: &str, value: &str) -> String {
    format!("{path}?{key}={}", encode_component(value))
}

/// `path/segment` with `segment` encoded.
pub(crate) fn with_segment(path: &str, segment: &str) -> String {
    format!("{path}/{}", encode_component(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_component("web hacking"), "web%20hacking");
        assert_eq!(encode_component("a&b=c/d?"), "a%26b%3Dc%2Fd%3F");
        assert_eq!(encode_component("C++"), "C%2B%2B");
        assert_eq!(encode_component("bảo mật"), "b%E1%BA%A3o%20m%E1%BA%ADt");
        assert_eq!(encode_component("it's-(ok)_~!*."), "it's-(ok)_~!*.");
    }

    #[test]
    fn builds_query_and_path() {
        assert_eq!(with_query("/course/search", "name", "sql injection"), "/course/search?name=sql%20injection");
        assert_eq!(with_segment("/lesson", "abc"), "/lesson/abc");
    }

    proptest! {
        #[test]
        fn encoded_output_is_url_safe(s in "\\PC*") {
            let enc = encode_component(&s);
            prop_assert!(enc.bytes().all(|b| b.is_ascii_alphanumeric() || b"-_.!~*'()%".contains(&b)));
        }
    }
}
