//! Request URL construction.

use std::fmt;

use url::form_urlencoded;

use crate::error::{ClientError, Result};

/// A query-string value: the upstream accepts text and integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

/// One `name=value` pair. Order of a parameter slice is preserved on the wire,
/// and repeated names are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub name: String,
    pub value: ParamValue,
}

impl QueryParam {
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<N: Into<String>, V: Into<ParamValue>> From<(N, V)> for QueryParam {
    fn from((name, value): (N, V)) -> Self {
        QueryParam::new(name, value)
    }
}

/// Form-urlencodes `params` in order.
pub fn encode_query(params: &[QueryParam]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for param in params {
        serializer.append_pair(&param.name, &param.value.to_string());
    }
    serializer.finish()
}

/// `{base}/{endpoint}?{query}`. The `?` is always present, even with no params.
pub fn build_url(base_url: &str, endpoint: &str, params: &[QueryParam]) -> Result<String> {
    let endpoint = endpoint.trim_matches('/');
    if endpoint.is_empty() {
        return Err(ClientError::Configuration(
            "endpoint must not be empty".to_string(),
        ));
    }
    Ok(format!(
        "{}/{}?{}",
        base_url.trim_end_matches('/'),
        endpoint,
        encode_query(params)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://api.urbandictionary.com/v0";

    #[test]
    fn test_build_url_without_params() {
        assert_eq!(
            build_url(BASE, "random", &[]).unwrap(),
            "http://api.urbandictionary.com/v0/random?"
        );
    }

    #[test]
    fn test_build_url_with_term() {
        let params = [QueryParam::new("term", "cat")];
        assert_eq!(
            build_url(BASE, "define", &params).unwrap(),
            "http://api.urbandictionary.com/v0/define?term=cat"
        );
    }

    #[test]
    fn test_trailing_slash_and_leading_slash() {
        let params = [QueryParam::new("term", "cat")];
        assert_eq!(
            build_url("http://proxy.local/v0/", "/define", &params).unwrap(),
            "http://proxy.local/v0/define?term=cat"
        );
    }

    #[test]
    fn test_values_are_encoded() {
        let params = [QueryParam::new("term", "rock & roll=fun")];
        assert_eq!(encode_query(&params), "term=rock+%26+roll%3Dfun");

        let params = [QueryParam::new("term", "café")];
        assert_eq!(encode_query(&params), "term=caf%C3%A9");
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let params: Vec<QueryParam> = vec![
            ("term", "b").into(),
            ("page", 2).into(),
            ("term", "a").into(),
        ];
        assert_eq!(encode_query(&params), "term=b&page=2&term=a");
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        assert!(matches!(
            build_url(BASE, "", &[]),
            Err(ClientError::Configuration(_))
        ));
        assert!(matches!(
            build_url(BASE, "/", &[]),
            Err(ClientError::Configuration(_))
        ));
    }
}
