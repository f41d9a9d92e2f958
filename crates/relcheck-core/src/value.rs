//! Metadata values and literal wrappers.
//!
//! Schema authors attach free-form metadata to elements. The IR keeps the
//! value exactly as written, so [`MetaValue`] mirrors the JSON data model and
//! preserves object key order.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::range::Range;

/// A value together with its encoded source location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Literal<T> {
    pub value: T,
    #[serde(default)]
    pub loc: Option<String>,
}

impl<T> Literal<T> {
    /// Create a literal without location information.
    pub fn new(value: T) -> Self {
        Self { value, loc: None }
    }

    /// Attach an encoded location.
    pub fn with_loc(mut self, loc: impl Into<String>) -> Self {
        self.loc = Some(loc.into());
        self
    }

    /// Decode the location of this literal.
    pub fn range(&self) -> Range {
        Range::decode(self.loc.as_deref())
    }
}

/// Free-form metadata value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<MetaValue>),
    Object(IndexMap<String, MetaValue>),
}

impl MetaValue {
    /// Build an object value from key/value pairs, keeping their order.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, MetaValue)>) -> Self {
        MetaValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an array of string values.
    pub fn strings<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        MetaValue::Array(
            items
                .into_iter()
                .map(|s| MetaValue::String(s.into()))
                .collect(),
        )
    }

    /// Whether the value counts as "set" when deciding which relationship
    /// kind an annotation declares.
    ///
    /// `null`, `false`, `0`, `NaN` and the empty string are falsy; arrays and
    /// objects are always truthy, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            MetaValue::Null => false,
            MetaValue::Bool(b) => *b,
            MetaValue::Number(n) => *n != 0.0 && !n.is_nan(),
            MetaValue::String(s) => !s.is_empty(),
            MetaValue::Array(_) | MetaValue::Object(_) => true,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, MetaValue>> {
        match self {
            MetaValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Human readable name of the value's kind, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            MetaValue::Null => "null",
            MetaValue::Bool(_) => "boolean",
            MetaValue::Number(_) => "number",
            MetaValue::String(_) => "string",
            MetaValue::Array(_) => "array",
            MetaValue::Object(_) => "object",
        }
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Number(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::String(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::String(value)
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Null => write!(f, "null"),
            MetaValue::Bool(b) => write!(f, "{b}"),
            MetaValue::Number(n) => write!(f, "{n}"),
            MetaValue::String(s) => write!(f, "{s:?}"),
            MetaValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            MetaValue::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_preserves_key_order() {
        let value: MetaValue =
            serde_json::from_str(r#"{"zeta": 1, "alpha": [true, null, "x"]}"#).unwrap();

        let map = value.as_object().expect("object");
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert_eq!(map["zeta"], MetaValue::Number(1.0));
        assert_eq!(
            map["alpha"],
            MetaValue::Array(vec![
                MetaValue::Bool(true),
                MetaValue::Null,
                MetaValue::String("x".to_string())
            ])
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!MetaValue::Null.is_truthy());
        assert!(!MetaValue::Bool(false).is_truthy());
        assert!(!MetaValue::Number(0.0).is_truthy());
        assert!(!MetaValue::from("").is_truthy());
        assert!(MetaValue::Bool(true).is_truthy());
        assert!(MetaValue::Array(vec![]).is_truthy());
        assert!(MetaValue::object::<&str>([]).is_truthy());
    }

    #[test]
    fn test_literal_range() {
        let lit = Literal::new(MetaValue::Null).with_loc("4;2;17");

        assert_eq!(lit.range().start().line(), 4);
        assert_eq!(Literal::new(0).range(), Range::default());
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(MetaValue::Null.kind_name(), "null");
        assert_eq!(MetaValue::from("x").kind_name(), "string");
        assert_eq!(MetaValue::strings(["a"]).kind_name(), "array");
        assert_eq!(MetaValue::object::<&str>([]).kind_name(), "object");
    }

    #[test]
    fn test_display() {
        let value = MetaValue::object([
            ("edge", MetaValue::strings(["a", "b"])),
            ("many", MetaValue::Bool(false)),
        ]);

        assert_eq!(value.to_string(), r#"{"edge": ["a", "b"], "many": false}"#);
    }
}
