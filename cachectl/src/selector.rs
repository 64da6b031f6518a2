//! Output selection.
//!
//! A selector is the rule that decides what part of a response becomes the
//! externally visible output of a command.  It is resolved exactly once per
//! invocation, before any call is made, and applied as a pure function to
//! every response page.

use crate::command::Binding;
use crate::errors::{CmdError, ErrorKind};
use crate::types::{CmdResult, Response, Value};

/// Sentinel accepted as a field selection meaning "the whole response".
pub const WHOLE_RESPONSE: &str = "*";

/// The rule choosing what part of a response becomes the visible output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Emit the response document unchanged.
    WholeResponse,
    /// Emit one named top-level field of the response.
    Field(String),
    /// Ignore the response and echo a bound input parameter back.  Exists
    /// for legacy passthrough behavior.
    EchoInput(String),
}

/// Resolves the effective selector for one invocation.
///
/// `select_field` and `echo_param` are the caller's overrides; both at once
/// is a configuration error, raised here rather than at call time.  A field
/// selection of `"*"` means the whole response, and the legacy `"^Name"`
/// spelling selects echo of the parameter `Name`.
pub fn resolve(
    default: &Selector,
    select_field: Option<&str>,
    echo_param: Option<&str>,
) -> CmdResult<Selector> {
    match (select_field, echo_param) {
        (Some(field), Some(param)) => fail!(CmdError::from((
            ErrorKind::InvalidSelectorConfig,
            "Field selection and input echo are mutually exclusive",
            format!("select {field:?} conflicts with echo of {param:?}"),
        ))),
        (Some(WHOLE_RESPONSE), None) => Ok(Selector::WholeResponse),
        (Some(field), None) => match field.strip_prefix('^') {
            Some(param) => Ok(Selector::EchoInput(param.to_owned())),
            None => Ok(Selector::Field(field.to_owned())),
        },
        (None, Some(param)) => Ok(Selector::EchoInput(param.to_owned())),
        (None, None) => Ok(default.clone()),
    }
}

/// Applies a resolved selector to one response.
///
/// Pure.  A named field that is absent from the response yields
/// [`Value::Nil`], never an error; the same goes for echoing a parameter
/// that was never bound.
pub fn select(response: &Response, selector: &Selector, binding: &Binding) -> Value {
    match selector {
        Selector::WholeResponse => response.value().clone(),
        Selector::Field(name) => response.field(name).cloned().unwrap_or(Value::Nil),
        Selector::EchoInput(param) => binding.get(param).cloned().unwrap_or(Value::Nil),
    }
}
