//! The transport seam and the single-invocation path.
//!
//! A [`Transport`] is the injected capability that performs the actual
//! network call; everything above it treats the wire format as opaque.
//! [`invoke`] is the one place a request crosses that seam: it observes
//! cancellation first and enriches connectivity failures with endpoint and
//! operation context on the way back out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::endpoint::Endpoint;
use crate::errors::{CmdError, ErrorKind};
use crate::request::Request;
use crate::types::{CmdResult, Response};

/// A caller-owned cancellation signal.
///
/// Tokens are cheap clonable handles over one shared flag.  The core
/// checks the token before each dispatch; transports receive it so a
/// blocking call can observe cancellation mid-flight as well.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    /// Signals cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// An injected capability that can dispatch built requests.
///
/// Implementations live outside the core; the one shipped in this
/// workspace is the scripted mock in `cachectl-test`.  A transport is a
/// read-only capability from the core's point of view: executing commands
/// never reconfigures it, and independent invocations may reuse it freely.
pub trait Transport {
    /// Performs the network call for one built request and returns the raw
    /// response.  Transport-level failures surface as [`CmdError`]s; the
    /// caller enriches connectivity failures with call context.
    fn send(&mut self, request: &Request, token: &CancelToken) -> CmdResult<Response>;

    /// The endpoint this transport dispatches to.
    fn endpoint(&self) -> &Endpoint;
}

/// Issues one remote call.
///
/// If the token is already cancelled nothing is dispatched and the call
/// fails with [`ErrorKind::Cancelled`].  Connectivity failures come back
/// carrying the endpoint and operation name, so "can't reach the service"
/// reads differently from "the service declined".  Rejections and unknown
/// failures propagate untouched.
pub fn invoke(
    transport: &mut dyn Transport,
    request: &Request,
    token: &CancelToken,
) -> CmdResult<Response> {
    if token.is_cancelled() {
        fail!(CmdError::from((
            ErrorKind::Cancelled,
            "Invocation cancelled before dispatch",
        )));
    }
    log::debug!(
        "dispatching {} to {}",
        request.operation(),
        transport.endpoint()
    );
    let result = transport.send(request, token);
    match result {
        Ok(response) => Ok(response),
        Err(err) => {
            let endpoint = transport.endpoint().to_string();
            Err(err.with_call_context(&endpoint, request.operation()))
        }
    }
}
