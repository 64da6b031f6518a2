use std::fmt;

use crate::errors::CmdError;

/// Library generic result type.
pub type CmdResult<T> = Result<T, CmdError>;

/// The uniform data representation used for bound parameters, request
/// fields and response documents.
///
/// An empty [`Value::List`] is not the same thing as an absent field.
/// Builders and selectors preserve that distinction everywhere, because
/// clearing a collection and leaving it untouched are different operations
/// on the service side.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// An explicit null.  Binding `Nil` to a parameter is not the same as
    /// leaving the parameter unbound.
    Nil,
    /// A boolean flag.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Double(f64),
    /// A string value.
    Str(String),
    /// An ordered collection of values.
    List(Vec<Value>),
    /// A document with ordered, named fields.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Returns true if the value is the explicit null.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Borrows the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrows the elements, if this is a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a named field on a map value.  Any other shape has no
    /// fields, so the lookup comes back empty.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries
                .iter()
                .find(|(name, _)| name == field)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (name, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Value {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Value {
        Value::List(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Value {
        Value::List(v.into_iter().map(Value::Str).collect())
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Value {
        Value::List(v.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<(String, Value)>> for Value {
    fn from(v: Vec<(String, Value)>) -> Value {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Value {
        match v {
            Some(inner) => inner.into(),
            None => Value::Nil,
        }
    }
}

/// The raw reply from one remote operation.
///
/// A response is a map-shaped document.  Field access never fails for a
/// merely missing field; it just comes back empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    doc: Value,
}

impl Response {
    /// Wraps a raw document.
    pub fn new(doc: impl Into<Value>) -> Response {
        Response { doc: doc.into() }
    }

    /// Borrows the whole document.
    pub fn value(&self) -> &Value {
        &self.doc
    }

    /// Consumes the response into its document.
    pub fn into_value(self) -> Value {
        self.doc
    }

    /// Looks up a top-level field of the document.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.doc.get(name)
    }

    /// Extracts the continuation token carried in `field`, treating an
    /// absent field, a non-string field and an empty string all as "no
    /// further pages".
    pub fn continuation_token(&self, field: &str) -> Option<&str> {
        match self.field(field) {
            Some(Value::Str(token)) if !token.is_empty() => Some(token),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup_only_works_on_maps() {
        let doc = Value::Map(vec![("Status".into(), Value::Str("available".into()))]);
        assert_eq!(doc.get("Status"), Some(&Value::Str("available".into())));
        assert_eq!(doc.get("Missing"), None);
        assert_eq!(Value::Int(3).get("Status"), None);
    }

    #[test]
    fn continuation_token_treats_empty_as_exhausted() {
        let with_token = Response::new(vec![("Marker".to_string(), Value::Str("t1".into()))]);
        assert_eq!(with_token.continuation_token("Marker"), Some("t1"));

        let empty_token = Response::new(vec![("Marker".to_string(), Value::Str(String::new()))]);
        assert_eq!(empty_token.continuation_token("Marker"), None);

        let no_token = Response::new(Vec::<(String, Value)>::new());
        assert_eq!(no_token.continuation_token("Marker"), None);
    }

    #[test]
    fn option_conversion_maps_none_to_nil() {
        assert_eq!(Value::from(None::<i64>), Value::Nil);
        assert_eq!(Value::from(Some("x")), Value::Str("x".into()));
    }
}
