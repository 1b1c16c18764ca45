//! Inbound request abstraction and form-data decoding.

use crate::error::{FormError, Result};

/// Decoded parameters in submission order.
///
/// Repeated keys are kept; [`Params::get`] returns the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Returns the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of pairs, repeats included.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over all pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Decodes an `application/x-www-form-urlencoded` string.
    pub fn parse_urlencoded(input: &str) -> Result<Self> {
        let mut params = Self::new();
        for pair in input.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.append(urlencoding_decode(key)?, urlencoding_decode(value)?);
        }
        Ok(params)
    }

    /// Decodes a JSON object body. Scalars are stringified, `null` is empty.
    pub fn parse_json(body: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        let serde_json::Value::Object(object) = value else {
            return Err(FormError::RequestParse(
                "JSON body must be an object".to_string(),
            ));
        };

        let mut params = Self::new();
        for (key, value) in object {
            let value = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s,
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(FormError::RequestParse(format!(
                        "unsupported JSON value for {key:?}: {other}"
                    )))
                }
            };
            params.append(key, value);
        }
        Ok(params)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.append(k, v);
        }
        params
    }
}

/// Query and body parameters of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams {
    /// Parameters from the URL query string.
    pub query: Params,
    /// Parameters from the request body; empty for GET requests.
    pub body: Params,
}

/// A request that a form can bind values from.
pub trait FormSource {
    /// Returns the HTTP method.
    fn method(&self) -> &str;

    /// Decodes the query and body parameters.
    fn params(&self) -> Result<FormParams>;
}

/// An in-memory HTTP request carrying form data.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: String,
    /// Raw query string, without the leading `?`.
    pub query: String,
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Request body.
    pub body: Vec<u8>,
}

impl Request {
    /// Creates a new request.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            query: String::new(),
            content_type: None,
            body: Vec::new(),
        }
    }

    /// Creates a GET request.
    pub fn get() -> Self {
        Self::new("GET")
    }

    /// Creates a POST request.
    pub fn post() -> Self {
        Self::new("POST")
    }

    /// Creates a request from a request target such as `/search?q=rust`.
    ///
    /// A `#fragment` is not part of the query and is dropped.
    pub fn from_url(method: impl Into<String>, target: &str) -> Self {
        let target = target.split_once('#').map_or(target, |(t, _)| t);
        let query = target.split_once('?').map_or("", |(_, q)| q);
        Self::new(method).query(query)
    }

    /// Sets the raw query string.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets the `Content-Type` header.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a urlencoded body and the matching content type.
    #[must_use]
    pub fn form_body(self, body: impl Into<Vec<u8>>) -> Self {
        self.content_type("application/x-www-form-urlencoded")
            .body(body)
    }

    /// Returns the media type without parameters, lowercased.
    fn media_type(&self) -> Option<String> {
        self.content_type.as_deref().map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    fn parse_body(&self) -> Result<Params> {
        match self.media_type().as_deref() {
            Some("application/x-www-form-urlencoded") => {
                let body = std::str::from_utf8(&self.body).map_err(|_| FormError::InvalidUtf8)?;
                Params::parse_urlencoded(body)
            }
            Some("application/json") => Params::parse_json(&self.body),
            _ => Ok(Params::new()),
        }
    }
}

impl FormSource for Request {
    fn method(&self) -> &str {
        &self.method
    }

    fn params(&self) -> Result<FormParams> {
        let query = Params::parse_urlencoded(&self.query)?;
        let body = if self.method == "GET" {
            Params::new()
        } else {
            self.parse_body()?
        };
        Ok(FormParams { query, body })
    }
}

/// Decodes `+` and `%XX` escapes.
fn urlencoding_decode(s: &str) -> Result<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| FormError::InvalidEscape {
                        input: s.to_string(),
                    })?;
                out.push(hex);
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out).map_err(|_| FormError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_parsing() {
        let query = Params::parse_urlencoded("name=John+Doe&age=30&city=New%20York").unwrap();
        assert_eq!(query.get("name"), Some("John Doe"));
        assert_eq!(query.get("age"), Some("30"));
        assert_eq!(query.get("city"), Some("New York"));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let query = Params::parse_urlencoded("a=1&a=2&&b&c=").unwrap();
        assert_eq!(query.get("a"), Some("1"));
        assert_eq!(query.get("b"), Some(""));
        assert_eq!(query.get("c"), Some(""));
        assert_eq!(query.len(), 4);
    }

    #[test]
    fn test_multibyte_escapes() {
        let query = Params::parse_urlencoded("q=caf%C3%A9").unwrap();
        assert_eq!(query.get("q"), Some("café"));
    }

    #[test]
    fn test_invalid_escapes() {
        assert!(matches!(
            Params::parse_urlencoded("a=%zz"),
            Err(FormError::InvalidEscape { .. })
        ));
        assert!(matches!(
            Params::parse_urlencoded("a=%4"),
            Err(FormError::InvalidEscape { .. })
        ));
        for input in ["a=%+F", "a=%-1", "a=%+"] {
            assert!(
                matches!(
                    Params::parse_urlencoded(input),
                    Err(FormError::InvalidEscape { .. })
                ),
                "{input} should be rejected"
            );
        }
        assert!(matches!(
            Params::parse_urlencoded("a=%FF"),
            Err(FormError::InvalidUtf8)
        ));
    }

    #[test]
    fn test_from_url_drops_fragment() {
        let req = Request::from_url("GET", "/search?q=1#results");
        let params = req.params().unwrap();
        assert_eq!(params.query.get("q"), Some("1"));
        assert_eq!(params.query.len(), 1);

        let req = Request::from_url("GET", "/search#q=2");
        assert!(req.params().unwrap().query.is_empty());
    }

    #[test]
    fn test_get_ignores_body() {
        let req = Request::from_url("GET", "/search?q=rust").form_body("q=body");
        let params = req.params().unwrap();
        assert_eq!(params.query.get("q"), Some("rust"));
        assert!(params.body.is_empty());
    }

    #[test]
    fn test_post_urlencoded_body() {
        let req = Request::post()
            .content_type("application/x-www-form-urlencoded; charset=UTF-8")
            .body("age=25&name=Ann");
        let params = req.params().unwrap();
        assert_eq!(params.body.get("age"), Some("25"));
        assert_eq!(params.body.get("name"), Some("Ann"));
    }

    #[test]
    fn test_post_json_body() {
        let req = Request::post()
            .content_type("application/json")
            .body(r#"{"age": 25, "name": "Ann", "admin": false, "note": null}"#);
        let params = req.params().unwrap();
        assert_eq!(params.body.get("age"), Some("25"));
        assert_eq!(params.body.get("admin"), Some("false"));
        assert_eq!(params.body.get("note"), Some(""));

        let nested = Request::post()
            .content_type("application/json")
            .body(r#"{"tags": ["a"]}"#);
        assert!(matches!(nested.params(), Err(FormError::RequestParse(_))));

        let broken = Request::post().content_type("application/json").body("{");
        assert!(matches!(broken.params(), Err(FormError::Json(_))));
    }

    #[test]
    fn test_unknown_content_type_has_no_body_params() {
        let req = Request::post().content_type("text/plain").body("age=25");
        assert!(req.params().unwrap().body.is_empty());
        assert!(Request::post().body("age=25").params().unwrap().body.is_empty());
    }
}
