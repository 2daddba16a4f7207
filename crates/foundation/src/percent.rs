//! Percent coding for URL components (fragment values, asset paths).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Everything except the URI component unreserved marks gets escaped.
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

pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// `+` → space, then `%XX` escapes. Malformed escapes stay as written; if the
/// decoded bytes are not UTF-8 only the `+` substitution is applied.
pub fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    match percent_decode_str(&spaced).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_component, encode_component};

    #[test]
    fn decodes_plus_and_escapes() {
        assert_eq!(decode_component("My+Layer%20%C3%A9"), "My Layer é");
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz%4"), "%zz%4");
        assert_eq!(decode_component("%FF+x"), "%FF x");
    }

    #[test]
    fn encodes_reserved_characters_only() {
        assert_eq!(encode_component("Layer_A-1.(b)"), "Layer_A-1.(b)");
        assert_eq!(encode_component("Steve #1?"), "Steve%20%231%3F");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn encode_then_decode_round_trips() {
        for s in ["LayerA", "a b&c=d;e", "é/ü#?", "50%+"] {
            assert_eq!(decode_component(&encode_component(s)), s);
        }
    }
}
