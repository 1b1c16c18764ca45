//! HTML escaping, ordered attributes and the pre-sanitized markup type.
//!
//! Values are stored unescaped everywhere in this crate. Escaping happens
//! only while rendering, and the result of a render is wrapped in
//! [`RawHtml`] so that a template layer knows not to escape it again.

use std::fmt;

use serde::{Serialize, Serializer};

/// Escapes HTML special characters for use in text and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Markup that has already been escaped and is safe to embed verbatim.
///
/// Only renderers in this crate construct it from escaped parts. Wrapping
/// caller-provided text with [`RawHtml::from_trusted`] bypasses escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawHtml(String);

impl RawHtml {
    /// Marks a string as already-sanitized markup.
    pub fn from_trusted(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Returns the markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the markup.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RawHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RawHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for RawHtml {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Returns whether `name` can be emitted as an attribute name verbatim.
///
/// Rejects the empty string, whitespace, control characters and
/// `" ' < > / = &`.
pub fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=' | '&')
        })
}

/// HTML attributes in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    attrs: Vec<(String, String)>,
}

impl Attrs {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute. An existing key keeps its position.
    ///
    /// Keys that are not valid attribute names are dropped and `false` is
    /// returned.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if !is_valid_attr_name(&key) {
            return false;
        }
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((key, value)),
        }
        true
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes an attribute, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(pos).1)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the attributes as ` key="value"` pairs, skipping `skip` keys.
    pub(crate) fn to_html_except(&self, skip: &[&str]) -> String {
        self.iter()
            .filter(|(k, _)| !skip.contains(k))
            .map(|(k, v)| format!(r#" {k}="{}""#, html_escape(v)))
            .collect()
    }

    /// Renders every attribute as space-separated `key="value"` pairs.
    pub fn to_html(&self) -> String {
        self.to_html_except(&[]).trim_start().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("it's"), "it&#x27;s");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_attrs_keep_insertion_order() {
        let mut attrs = Attrs::new();
        attrs.set("placeholder", "Age");
        attrs.set("id", "age");
        attrs.set("placeholder", "Your age");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.to_html(), r#"placeholder="Your age" id="age""#);
        assert_eq!(attrs.remove("placeholder").as_deref(), Some("Your age"));
        assert_eq!(attrs.to_html(), r#"id="age""#);
    }

    #[test]
    fn test_attrs_are_escaped() {
        let mut attrs = Attrs::new();
        attrs.set("data-x", "\"><script>");
        assert_eq!(attrs.to_html(), r#"data-x="&quot;&gt;&lt;script&gt;""#);
        assert_eq!(attrs.to_html_except(&["data-x"]), "");
    }

    #[test]
    fn test_invalid_attr_names_are_dropped() {
        let mut attrs = Attrs::new();
        for key in [
            "x onfocus=alert(1) autofocus",
            "a=b",
            "",
            "\"><script>",
            "a/b",
            "tab\tkey",
            "amp&",
        ] {
            assert!(!attrs.set(key, "y"), "{key:?} should be rejected");
        }
        assert!(attrs.set("data-id", "1"));
        assert!(attrs.set("aria-label", "Age"));

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.to_html(), r#"data-id="1" aria-label="Age""#);
    }

    #[test]
    fn test_raw_html_passthrough() {
        let html = RawHtml::from_trusted("<b>ok</b>");
        assert_eq!(html.to_string(), "<b>ok</b>");
        assert_eq!(html.as_str(), "<b>ok</b>");
        assert_eq!(serde_json::to_string(&html).unwrap(), r#""<b>ok</b>""#);
    }
}
