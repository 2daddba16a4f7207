use std::collections::BTreeMap;
use std::sync::LazyLock;

use foundation::percent::decode_component;
use regex::Regex;

static PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^&;=]+)=?([^&;]*)").expect("constant pattern"));

/// Decoded `key=value` pairs from a query string or fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams(BTreeMap<String, String>);

impl UrlParams {
    /// Parses `a=1&b=2;c`. A leading `?` or `#` is skipped, `+` means space,
    /// and later duplicates win.
    pub fn parse(s: &str) -> Self {
        let s = s.strip_prefix(['?', '#']).unwrap_or(s);
        let pairs = PAIR
            .captures_iter(s)
            .map(|c| (decode_component(&c[1]), decode_component(&c[2])))
            .collect();
        UrlParams(pairs)
    }

    /// Fragment parameters if there are any, else query parameters.
    pub fn resolve(fragment: &str, query: &str) -> Self {
        let from_fragment = Self::parse(fragment);
        if from_fragment.is_empty() {
            Self::parse(query)
        } else {
            from_fragment
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

pub fn parse_params(s: &str) -> UrlParams {
    UrlParams::parse(s)
}
