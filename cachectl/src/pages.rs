//! Continuation-token pagination.
//!
//! [`Pages`] lazily walks a paginated operation one page at a time.  In
//! auto mode it keeps requesting while the service hands back a
//! continuation token; in manual mode (caller supplied a starting token,
//! or opted out of auto-iteration) it stops after exactly one page no
//! matter what the service returned.  The sequence is finite, forward-only
//! and restartable only by re-invocation.

use crate::command::PageSpec;
use crate::request::Request;
use crate::transport::{invoke, CancelToken, Transport};
use crate::types::{CmdResult, Response, Value};

enum PageTurn {
    Fetching,
    Done,
}

/// An iterator over the pages of one paginated invocation.
///
/// Each item is one page's raw [`Response`].  A failed page is yielded
/// once as `Err` and finishes the iterator; pages yielded before the
/// failure stay delivered.
pub struct Pages<'a> {
    transport: &'a mut (dyn Transport + 'a),
    request: Request,
    input_token: &'static str,
    output_token: &'static str,
    token: Option<String>,
    auto: bool,
    cancel: CancelToken,
    state: PageTurn,
}

impl<'a> Pages<'a> {
    /// Starts a pagination over `request`.  `starting_token` seeds the
    /// first page and forces manual mode, as does `auto = false`.  An
    /// empty token means the beginning, same as no token at all.
    pub fn new(
        spec: &PageSpec,
        request: Request,
        starting_token: Option<String>,
        auto: bool,
        transport: &'a mut (dyn Transport + 'a),
        cancel: CancelToken,
    ) -> Pages<'a> {
        let starting_token = starting_token.filter(|token| !token.is_empty());
        let auto = auto && starting_token.is_none();
        Pages {
            transport,
            request,
            input_token: spec.input_token,
            output_token: spec.output_token,
            token: starting_token,
            auto,
            cancel,
            state: PageTurn::Fetching,
        }
    }
}

impl Iterator for Pages<'_> {
    type Item = CmdResult<Response>;

    fn next(&mut self) -> Option<Self::Item> {
        if let PageTurn::Done = self.state {
            return None;
        }
        if let Some(token) = &self.token {
            self.request
                .set_field(self.input_token, Value::Str(token.clone()));
        }
        match invoke(&mut *self.transport, &self.request, &self.cancel) {
            Err(err) => {
                self.state = PageTurn::Done;
                Some(Err(err))
            }
            Ok(response) => {
                let next = response
                    .continuation_token(self.output_token)
                    .map(str::to_owned);
                if !self.auto || next.is_none() {
                    self.state = PageTurn::Done;
                }
                self.token = next;
                Some(Ok(response))
            }
        }
    }
}
