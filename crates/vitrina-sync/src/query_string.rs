//! Query-string codec: parameter lookup and update over the raw query
//! string, with percent round-tripping.
//!
//! Decoding never fails: malformed percent sequences decode lossily and a
//! missing parameter is simply absent, so URL state can always be treated
//! as "unset" rather than an error.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left bare when encoding a parameter value: RFC 3986
/// unreserved.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Returns the decoded value of `name`, or `None` when absent.
///
/// An empty value (`name=`) reads as an empty string, and a bare key with
/// no `=` reads the same way.
#[must_use]
pub fn get_param(query: &str, name: &str) -> Option<String> {
    parse_pairs(query)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// Returns `query` with `name` set to `value`, updating in place when the
/// parameter already exists and appending otherwise. Other parameters and
/// their order are preserved.
#[must_use]
pub fn set_param(query: &str, name: &str, value: &str) -> String {
    let mut pairs = parse_pairs(query);
    if let Some(pair) = pairs.iter_mut().find(|(key, _)| key == name) {
        pair.1 = value.to_owned();
    } else {
        pairs.push((name.to_owned(), value.to_owned()));
    }
    encode_pairs(&pairs)
}

/// Returns `query` without the `name` parameter.
#[must_use]
pub fn remove_param(query: &str, name: &str) -> String {
    let pairs: Vec<_> = parse_pairs(query)
        .into_iter()
        .filter(|(key, _)| key != name)
        .collect();
    encode_pairs(&pairs)
}

fn parse_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(segment), String::new()),
        })
        .collect()
}

fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decodes one query component: `+` means space, percent sequences decode
/// lossily (invalid UTF-8 becomes replacement characters, stray `%` stays).
fn decode_component(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}
