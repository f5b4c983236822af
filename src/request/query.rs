//! Query string parsing and serialization (application/x-www-form-urlencoded)

use percent_encoding::percent_decode_str;
use url::form_urlencoded;

use crate::error::{ExplorerResult, QueryError};

/// Ordered key/value pairs of a query string, duplicates allowed
pub type QueryPairs = Vec<(String, String)>;

/// Splits a templated URL or path at the first `?`
pub fn split_template(template: &str) -> (&str, &str) {
    template.split_once('?').unwrap_or((template, ""))
}

fn decode_component(raw: &str) -> Result<String, QueryError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| QueryError::InvalidEncoding(raw.to_string()))
}

/// Parses a query string strictly.
///
/// Empty segments (`a=1&&b=2`) are skipped; a segment without `=` is a key
/// with an empty value. A segment with an empty key or percent-escapes that
/// decode to invalid UTF-8 rejects the whole query.
pub fn parse_query(query: &str) -> Result<QueryPairs, QueryError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut pairs = Vec::new();

    for segment in query.split('&').filter(|s| !s.is_empty()) {
        let (raw_key, raw_value) = segment.split_once('=').unwrap_or((segment, ""));
        if raw_key.is_empty() {
            return Err(QueryError::EmptyKey(segment.to_string()));
        }
        pairs.push((decode_component(raw_key)?, decode_component(raw_value)?));
    }

    Ok(pairs)
}

/// Splits a template at `?` and parses its query strictly
pub fn parse_template(template: &str) -> ExplorerResult<(&str, QueryPairs)> {
    let (base, query) = split_template(template);
    Ok((base, parse_query(query)?))
}

/// Sets `key` to `value`: replaces the first occurrence and drops later
/// duplicates, or appends when the key is absent.
pub fn set_pair(pairs: &mut QueryPairs, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_string();
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = index <= first || k != key;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

/// Serializes pairs with standard form encoding (space becomes `+`)
pub fn serialize_query(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExplorerError;

    fn pairs(items: &[(&str, &str)]) -> QueryPairs {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_keeps_order_and_empty_values() {
        let parsed = parse_query("apikey=&limit=10&q=hello+world&flag").unwrap();
        assert_eq!(
            parsed,
            pairs(&[("apikey", ""), ("limit", "10"), ("q", "hello world"), ("flag", "")])
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            parse_query("=oops&a=1"),
            Err(QueryError::EmptyKey("=oops".into()))
        );
        assert!(matches!(
            parse_query("a=%FF%FE"),
            Err(QueryError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_set_replaces_first_and_drops_duplicates() {
        let mut query = pairs(&[("a", "1"), ("b", "2"), ("a", "3")]);
        set_pair(&mut query, "a", "x");
        assert_eq!(query, pairs(&[("a", "x"), ("b", "2")]));

        set_pair(&mut query, "c", "");
        assert_eq!(query, pairs(&[("a", "x"), ("b", "2"), ("c", "")]));
    }

    #[test]
    fn test_serialize_encodes_reserved_characters() {
        let query = pairs(&[("url", "https://x.io/a?b=c"), ("q", "a b")]);
        assert_eq!(
            serialize_query(&query),
            "url=https%3A%2F%2Fx.io%2Fa%3Fb%3Dc&q=a+b"
        );
    }

    #[test]
    fn test_parse_template_reports_parse_error() {
        let (base, pairs) = parse_template("/api/x?apikey=&limit=10").unwrap();
        assert_eq!(base, "/api/x");
        assert_eq!(pairs.len(), 2);

        match parse_template("/api/x?=oops") {
            Err(ExplorerError::Parse(QueryError::EmptyKey(segment))) => assert_eq!(segment, "=oops"),
            other => panic!("expected parse error, got {:?}", other),
        }
        let err = parse_template("/api/x?a=%FF").unwrap_err();
        assert_eq!(err.to_string(), "malformed query: invalid percent-encoding in `%FF`");
    }

    #[test]
    fn test_split_template() {
        assert_eq!(split_template("/a?x=1?y"), ("/a", "x=1?y"));
        assert_eq!(split_template("/a"), ("/a", ""));
    }
}
