//! Testing support
//!
//! This module provides `MockTransport`, which implements [`Transport`]
//! and can be used anywhere a connected transport is expected.  It is
//! scripted with a sequence of exchanges, records every request it
//! receives, and fails loudly when the requests do not match the script.
//! This is useful for writing unit tests without a reachable service.
//!
//! # Example
//!
//! ```rust
//! use cachectl::{commands, execute, Binding, ExecOptions};
//! use cachectl_test::{map_value, MockExchange, MockTransport};
//!
//! let mut transport = MockTransport::new(vec![MockExchange::new(
//!     map_value!({"TagList": [{"Key": "env", "Value": "prod"}]}),
//! )]);
//!
//! let mut binding = Binding::new();
//! binding.bind("ResourceName", "arn:aws:elasticache:us-east-1:123:cluster:myCluster");
//!
//! let outcome = execute(
//!     &commands::list_tags_for_resource(),
//!     &binding,
//!     &ExecOptions::default(),
//!     &mut transport,
//! )
//! .unwrap();
//! assert_eq!(transport.calls(), 1);
//! assert_eq!(
//!     outcome.output(),
//!     &map_value!([{"Key": "env", "Value": "prod"}]),
//! );
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cachectl::{
    CancelToken, CmdError, CmdResult, Endpoint, ErrorKind, IntoEndpoint, Request, Response,
    Transport, Value,
};

/// Helper trait for converting test values into a [`cachectl::Value`]
/// returned from a `MockTransport`.  This exists so scripted responses can
/// be written with plain literals.
pub trait IntoValue {
    /// Convert a value into `cachectl::Value`.
    fn into_value(self) -> Value;
}

macro_rules! into_value_impl_int {
    ($t:ty) => {
        impl IntoValue for $t {
            fn into_value(self) -> Value {
                Value::Int(self as i64)
            }
        }
    };
}

into_value_impl_int!(i8);
into_value_impl_int!(i16);
into_value_impl_int!(i32);
into_value_impl_int!(i64);
into_value_impl_int!(u8);
into_value_impl_int!(u16);
into_value_impl_int!(u32);

macro_rules! into_value_impl_float {
    ($t:ty) => {
        impl IntoValue for $t {
            fn into_value(self) -> Value {
                Value::Double(self as f64)
            }
        }
    };
}

into_value_impl_float!(f32);
into_value_impl_float!(f64);

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl IntoValue for Vec<Value> {
    fn into_value(self) -> Value {
        Value::List(self)
    }
}

impl IntoValue for Vec<(String, Value)> {
    fn into_value(self) -> Value {
        Value::Map(self)
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

/// Build [`cachectl::Value`]s from a JSON-like notation
///
/// This macro handles:
///
/// * `i8`..`i64`, `u8`..`u32`, `f32`, `f64`, `String`, `&str`, `bool` and
///   other types that implement [`IntoValue`]
/// * `nil` - maps to `Value::Nil`
/// * `[element1, element2, ..., elementN]` - maps to `Value::List`
/// * `{"key1": value1, ..., "keyN": valueN}` - maps to `Value::Map`
///
/// # Example
///
/// ```rust
/// use cachectl::Value;
/// use cachectl_test::map_value;
///
/// let actual = map_value!([42, "foo", {"Deep": nil}]);
///
/// let expected = Value::List(vec![
///     Value::Int(42),
///     Value::Str("foo".to_string()),
///     Value::Map(vec![("Deep".to_string(), Value::Nil)]),
/// ]);
/// assert_eq!(actual, expected)
/// ```
#[macro_export]
macro_rules! map_value {
    // Map of fields
    ({$($k:literal: $v:tt),* $(,)*}) => {
        cachectl::Value::Map(vec![$(($k.to_string(), $crate::map_value!($v))),*])
    };

    // List of elements
    ([$($e:tt),* $(,)*]) => {
        cachectl::Value::List(vec![$($crate::map_value!($e)),*])
    };

    // Nil
    (nil) => {
        cachectl::Value::Nil
    };

    // Fallback to primitive conversion
    ($e:expr) => {
        $crate::IntoValue::into_value($e)
    };
}

/// One scripted request/response exchange for a [`MockTransport`].
pub struct MockExchange {
    expected: Option<Request>,
    response: CmdResult<Response>,
}

impl MockExchange {
    /// Creates an exchange that answers with the given response document.
    pub fn new<V: IntoValue>(response: V) -> MockExchange {
        MockExchange {
            expected: None,
            response: Ok(Response::new(response.into_value())),
        }
    }

    /// Creates an exchange that fails with the given error.
    pub fn error(err: CmdError) -> MockExchange {
        MockExchange {
            expected: None,
            response: Err(err),
        }
    }

    /// Additionally asserts that the incoming request equals `request`.
    pub fn expecting(mut self, request: Request) -> MockExchange {
        self.expected = Some(request);
        self
    }
}

/// A mock transport for testing without a reachable service.
///
/// `MockTransport` answers requests from its script in order and records
/// everything it receives.  Running past the end of the script, or sending
/// a request that does not match an expected one, produces an error.
#[derive(Clone)]
pub struct MockTransport {
    endpoint: Endpoint,
    exchanges: Arc<Mutex<VecDeque<MockExchange>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockTransport {
    /// Constructs a mock over the given sequence of exchanges, with a
    /// fixed test endpoint.
    pub fn new<I>(exchanges: I) -> MockTransport
    where
        I: IntoIterator<Item = MockExchange>,
    {
        MockTransport::with_endpoint("https://cache.example.test", exchanges)
    }

    /// Constructs a mock dispatching to the given endpoint.
    pub fn with_endpoint<I>(endpoint: &str, exchanges: I) -> MockTransport
    where
        I: IntoIterator<Item = MockExchange>,
    {
        MockTransport {
            endpoint: endpoint
                .into_endpoint()
                .expect("mock endpoint must be a valid URL"),
            exchanges: Arc::new(Mutex::new(exchanges.into_iter().collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, request: &Request, token: &CancelToken) -> CmdResult<Response> {
        // Mid-flight cancellation: a real transport would observe the
        // token while blocked on the wire.
        if token.is_cancelled() {
            return Err(CmdError::from((
                ErrorKind::Cancelled,
                "Invocation cancelled mid-flight",
            )));
        }
        self.requests.lock().unwrap().push(request.clone());
        let exchange = match self.exchanges.lock().unwrap().pop_front() {
            Some(exchange) => exchange,
            None => {
                return Err(CmdError::from((
                    ErrorKind::Unknown,
                    "Transport received more requests than scripted",
                    format!("unexpected {}", request.operation()),
                )));
            }
        };
        if let Some(expected) = &exchange.expected {
            if expected != request {
                return Err(CmdError::from((
                    ErrorKind::Unknown,
                    "Request does not match the scripted expectation",
                    format!("expected {expected:?}, got {request:?}"),
                )));
            }
        }
        exchange.response
    }

    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_requests_and_plays_the_script() {
        let mut transport = MockTransport::new(vec![MockExchange::new(
            map_value!({"TagList": []}),
        )]);
        let mut request = Request::new("ListTagsForResource");
        request.set_field("ResourceName", "arn");

        let response = transport.send(&request, &CancelToken::new()).unwrap();
        assert_eq!(response.field("TagList"), Some(&Value::List(vec![])));
        assert_eq!(transport.calls(), 1);
        assert_eq!(transport.requests()[0].operation(), "ListTagsForResource");

        let err = transport.send(&request, &CancelToken::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn mismatched_expectation_fails() {
        let mut expected = Request::new("AddTagsToResource");
        expected.set_field("ResourceName", "arn");
        let mut transport =
            MockTransport::new(vec![MockExchange::new(Value::Nil).expecting(expected)]);

        let other = Request::new("AddTagsToResource");
        let err = transport.send(&other, &CancelToken::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }
}
