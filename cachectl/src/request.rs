//! Request construction.
//!
//! [`build_request`] maps a [`Binding`] onto the request a command expects:
//! required parameters must be bound, every bound parameter is coerced into
//! its declared shape, and anything unbound is omitted outright.  Building
//! is a pure transformation; nothing here touches the transport.

use crate::command::{Binding, Command, ParamKind, ParamSpec};
use crate::errors::{CmdError, ErrorKind};
use crate::types::{CmdResult, Value};

/// A transport-level request: the operation name plus exactly the fields
/// that were bound, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    operation: String,
    fields: Vec<(String, Value)>,
}

impl Request {
    /// Creates a request with no fields.
    pub fn new(operation: impl Into<String>) -> Request {
        Request {
            operation: operation.into(),
            fields: Vec::new(),
        }
    }

    /// The remote operation name.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The request fields, in order.
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Whether the field is present at all, even with an empty value.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    /// Sets a field, replacing an existing value under the same name.
    /// Used by pagination to advance the continuation token between pages.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> &mut Request {
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_owned(), value)),
        }
        self
    }
}

/// Builds the request for one invocation.
///
/// A required parameter that is unbound, or bound to the explicit null,
/// fails with [`ErrorKind::MissingParameter`] naming that parameter.
/// Unbound optional parameters are omitted from the request entirely;
/// bound-but-empty collections are kept, because omission and emptiness
/// are different requests server-side.
pub fn build_request(command: &Command, binding: &Binding) -> CmdResult<Request> {
    let mut request = Request::new(command.name());
    for spec in command.params() {
        match binding.get(spec.name) {
            None | Some(Value::Nil) => {
                if spec.required {
                    fail!(CmdError::missing_parameter(spec.name));
                }
            }
            Some(value) => {
                let coerced = coerce(spec, value)?;
                request.set_field(spec.name, coerced);
            }
        }
    }
    Ok(request)
}

fn coerce(spec: &ParamSpec, value: &Value) -> CmdResult<Value> {
    match (spec.kind, value) {
        (ParamKind::Str, Value::Str(_)) => Ok(value.clone()),
        (ParamKind::Int, Value::Int(_)) => Ok(value.clone()),
        (ParamKind::Bool, Value::Bool(_)) => Ok(value.clone()),
        (ParamKind::Enum(allowed), Value::Str(s)) => {
            if allowed.contains(&s.as_str()) {
                Ok(value.clone())
            } else {
                fail!(invalid(spec, &format!("{s:?} is not one of {allowed:?}")));
            }
        }
        (ParamKind::StrList, Value::List(items)) => {
            for item in items {
                if !matches!(item, Value::Str(_)) {
                    fail!(invalid(spec, &format!("list element {item:?} is not a string")));
                }
            }
            Ok(value.clone())
        }
        // Scalar-to-list wrapping.
        (ParamKind::StrList, Value::Str(_)) => Ok(Value::List(vec![value.clone()])),
        (ParamKind::MapList, Value::List(items)) => {
            for item in items {
                if !matches!(item, Value::Map(_)) {
                    fail!(invalid(spec, &format!("list element {item:?} is not a map")));
                }
            }
            Ok(value.clone())
        }
        (ParamKind::MapList, Value::Map(_)) => Ok(Value::List(vec![value.clone()])),
        _ => fail!(invalid(spec, &format!("value {value:?} does not fit {:?}", spec.kind))),
    }
}

fn invalid(spec: &ParamSpec, detail: &str) -> CmdError {
    CmdError::from((
        ErrorKind::InvalidParameter,
        "Parameter value is not acceptable",
        format!("{}: {detail}", spec.name),
    ))
}
