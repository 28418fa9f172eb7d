//! Query string extraction.
//!
//! [`get_url_params`] flattens the query of a URL (like `?page=1&sort=name`)
//! into a plain map, following address-bar conventions rather than form
//! encoding: values percent-decode, keys stay verbatim, `+` is a literal
//! plus.

use std::collections::HashMap;

/// Parse the query string of `url` into key/value pairs.
///
/// The query is everything between the first `?` and the end of the URL or
/// the first `#`, whichever comes first. Pairs are separated by `&` and
/// split at the first `=`; pairs without `=` are skipped. Values are
/// percent-decoded as UTF-8, keys are kept verbatim, and a repeated key
/// keeps its last value.
///
/// # Example
///
/// ```
/// use detour_router::get_url_params;
///
/// let params = get_url_params("http://app.test/list?page=2&sort=name");
/// assert_eq!(params.get("page"), Some(&"2".to_string()));
/// assert_eq!(params.get("sort"), Some(&"name".to_string()));
///
/// let params = get_url_params("http://app.test/list?q=a%20b&q=c");
/// assert_eq!(params.get("q"), Some(&"c".to_string()));
/// ```
#[must_use]
pub fn get_url_params(url: &str) -> HashMap<String, String> {
    let query = match url.split_once('?') {
        Some((_, rest)) => rest.split('#').next().unwrap_or_default(),
        None => return HashMap::new(),
    };

    let mut params = HashMap::new();
    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            params.insert(key.to_string(), percent_decode(value));
        }
    }
    params
}

/// Decode `%XX` escapes as UTF-8 bytes; malformed escapes pass through
/// verbatim. No `+`-to-space mapping.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                decoded.push(high * 16 + low);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|digit| digit as u8)
}
