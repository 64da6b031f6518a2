//! cachectl is a typed command executor for cache control-plane APIs.
//! It separates the mechanics every remote operation shares — parameter
//! binding, request construction, invocation with cancellation, optional
//! pagination and output selection — from the per-operation metadata that
//! describes one concrete API call.
//!
//! # Basic Operation
//!
//! A [`Command`] is immutable metadata describing one remote operation; a
//! [`Binding`] carries the caller's parameter values for one invocation.
//! [`execute`] drives the whole thing against a [`Transport`], which is
//! the injected capability that performs the actual network call:
//!
//! ```rust,no_run
//! use cachectl::{commands, execute, Binding, ExecOptions};
//! # fn run(transport: &mut dyn cachectl::Transport) -> cachectl::CmdResult<()> {
//! let command = commands::list_tags_for_resource();
//! let mut binding = Binding::new();
//! binding.bind("ResourceName", "arn:aws:elasticache:us-east-1:123:cluster:myCluster");
//!
//! let outcome = execute(&command, &binding, &ExecOptions::default(), transport)?;
//! println!("{}", outcome.output());
//! # Ok(())
//! # }
//! ```
//!
//! Paginated commands loop over continuation tokens transparently; each
//! page's selected output reaches the configured [`OutputSink`] in page
//! order.  Mutating commands pass through a [`ConfirmationGate`] unless
//! the force option is set.
//!
//! # Errors
//!
//! All failures are [`CmdError`]s.  Validation problems (missing required
//! parameters, conflicting selector configuration) are detected before any
//! network call; remote failures distinguish cancellation, connectivity
//! (enriched with endpoint and operation context), service rejections
//! (code and message passed through intact) and everything else.  The
//! library never retries and never downgrades a failure to a partial
//! success.

#![deny(non_camel_case_types)]
#![warn(missing_docs)]

pub use crate::command::{Binding, Command, PageSpec, ParamKind, ParamSpec};
pub use crate::endpoint::{Endpoint, IntoEndpoint};
pub use crate::errors::{CmdError, ErrorKind, ServiceError, ServiceErrorKind};
pub use crate::executor::{
    execute, AlwaysProceed, ConfirmationGate, DiagnosticsSink, DiscardOutput, ExecOptions,
    Executor, LogDiagnostics, Outcome, OutputSink,
};
pub use crate::pages::Pages;
pub use crate::request::{build_request, Request};
pub use crate::selector::{select, Selector, WHOLE_RESPONSE};
pub use crate::transport::{invoke, CancelToken, Transport};
pub use crate::types::{CmdResult, Response, Value};

mod macros;

pub mod commands;

mod command;
mod endpoint;
mod errors;
mod executor;
mod pages;
mod request;
mod selector;
mod transport;
mod types;
