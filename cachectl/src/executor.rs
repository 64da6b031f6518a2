//! Command orchestration.
//!
//! [`Executor::execute`] drives one command invocation end to end:
//! selector resolution, pre-flight diagnostics, request construction, the
//! confirmation gate for mutating operations, then a single invocation or
//! a pagination loop with per-page output selection and emission.  The
//! executor holds no per-invocation state of its own and never retries; a
//! single remote failure is a single reported failure.

use crate::command::{Binding, Command};
use crate::pages::Pages;
use crate::request::build_request;
use crate::selector;
use crate::transport::{invoke, CancelToken, Transport};
use crate::types::{CmdResult, Response, Value};

/// Per-invocation options.
#[derive(Clone, Debug, Default)]
pub struct ExecOptions {
    /// Bypass the confirmation gate for mutating commands.
    pub force: bool,
    /// Caller-owned cancellation signal.
    pub cancel: CancelToken,
    /// Override of the command's default output selector.  `"*"` selects
    /// the whole response; `"^Name"` echoes the bound parameter `Name`.
    pub select: Option<String>,
    /// Echo the named bound parameter instead of selecting from the
    /// response.  Mutually exclusive with `select`.
    pub echo_param: Option<String>,
    /// Start pagination from this continuation token.  Supplying a
    /// non-empty one switches to manual paging: exactly one page is
    /// fetched.  An empty token means the beginning, same as `None`.
    pub starting_token: Option<String>,
    /// Disable auto-iteration; fetch exactly one page.
    pub no_auto_iteration: bool,
}

/// Decides whether a pending mutating action proceeds.
pub trait ConfirmationGate {
    /// Returns whether to proceed with the described action.
    fn confirm(&mut self, action: &str) -> bool;
}

/// A gate that always proceeds.  Also what the force flag amounts to.
pub struct AlwaysProceed;

impl ConfirmationGate for AlwaysProceed {
    fn confirm(&mut self, _action: &str) -> bool {
        true
    }
}

/// Receives success payloads, one per page in page order.
pub trait OutputSink {
    /// Receives one payload.
    fn emit(&mut self, payload: Value);
}

/// A sink that drops everything; callers that only want the [`Outcome`]
/// use this.
pub struct DiscardOutput;

impl OutputSink for DiscardOutput {
    fn emit(&mut self, _payload: Value) {}
}

/// Receives non-fatal informational messages.  Purely observational;
/// nothing here affects control flow.
pub trait DiagnosticsSink {
    /// Receives one message.
    fn notice(&mut self, message: &str);
}

/// A diagnostics sink that forwards to the `log` facade.
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn notice(&mut self, message: &str) {
        log::debug!("{message}");
    }
}

/// The result of one command execution.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    performed: bool,
    output: Value,
    responses: Vec<Response>,
}

impl Outcome {
    fn skipped() -> Outcome {
        Outcome {
            performed: false,
            output: Value::Nil,
            responses: Vec::new(),
        }
    }

    /// Whether the remote operation was actually performed.  False only
    /// when the confirmation gate vetoed a mutating command.
    pub fn was_performed(&self) -> bool {
        self.performed
    }

    /// The selected output.  For paginated commands this is the list of
    /// per-page outputs in page order.
    pub fn output(&self) -> &Value {
        &self.output
    }

    /// Consumes the outcome into its output.
    pub fn into_output(self) -> Value {
        self.output
    }

    /// The raw responses, one per page.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }
}

/// Orchestrates command invocations against injected collaborators.
///
/// An executor borrows its gate and sinks for the duration of a batch of
/// invocations; all per-invocation state lives in the arguments, so one
/// command definition can be executed any number of times, concurrently,
/// through independent executors.
pub struct Executor<'a> {
    gate: &'a mut dyn ConfirmationGate,
    output: &'a mut dyn OutputSink,
    diagnostics: &'a mut dyn DiagnosticsSink,
}

impl<'a> Executor<'a> {
    /// Creates an executor over the given collaborators.
    pub fn new(
        gate: &'a mut dyn ConfirmationGate,
        output: &'a mut dyn OutputSink,
        diagnostics: &'a mut dyn DiagnosticsSink,
    ) -> Executor<'a> {
        Executor {
            gate,
            output,
            diagnostics,
        }
    }

    /// Executes one command invocation.
    ///
    /// Local validation always runs before any network traffic: selector
    /// conflicts and binding problems surface with zero transport calls.
    /// For paginated commands each page's selected output reaches the
    /// output sink as soon as the page arrives; a mid-stream failure is
    /// reported once, after the already-succeeded pages were emitted.
    pub fn execute(
        &mut self,
        command: &Command,
        binding: &Binding,
        options: &ExecOptions,
        transport: &mut dyn Transport,
    ) -> CmdResult<Outcome> {
        let selector = selector::resolve(
            command.default_selector(),
            options.select.as_deref(),
            options.echo_param.as_deref(),
        )?;

        for spec in command.params() {
            if spec.required && binding.get(spec.name) == Some(&Value::Nil) {
                self.diagnostics.notice(&format!(
                    "value bound to required parameter {} was explicitly null",
                    spec.name
                ));
            }
        }

        let request = build_request(command, binding)?;

        if command.is_mutating() && !options.force {
            let action = describe_action(command, binding);
            if !self.gate.confirm(&action) {
                self.diagnostics
                    .notice(&format!("{action} was declined; nothing was performed"));
                return Ok(Outcome::skipped());
            }
        }

        if let Some(spec) = command.page_spec() {
            let auto = !options.no_auto_iteration;
            let pages = Pages::new(
                spec,
                request,
                options.starting_token.clone(),
                auto,
                transport,
                options.cancel.clone(),
            );
            let mut outputs = Vec::new();
            let mut responses = Vec::new();
            for page in pages {
                let response = page?;
                let payload = selector::select(&response, &selector, binding);
                self.output.emit(payload.clone());
                outputs.push(payload);
                responses.push(response);
            }
            Ok(Outcome {
                performed: true,
                output: Value::List(outputs),
                responses,
            })
        } else {
            let response = invoke(transport, &request, &options.cancel)?;
            let payload = selector::select(&response, &selector, binding);
            self.output.emit(payload.clone());
            Ok(Outcome {
                performed: true,
                output: payload,
                responses: vec![response],
            })
        }
    }
}

/// Executes a command with an always-proceeding gate, discarded output and
/// log-backed diagnostics.  The returned [`Outcome`] still carries the
/// selected output.
pub fn execute(
    command: &Command,
    binding: &Binding,
    options: &ExecOptions,
    transport: &mut dyn Transport,
) -> CmdResult<Outcome> {
    let mut gate = AlwaysProceed;
    let mut output = DiscardOutput;
    let mut diagnostics = LogDiagnostics;
    Executor::new(&mut gate, &mut output, &mut diagnostics)
        .execute(command, binding, options, transport)
}

fn describe_action(command: &Command, binding: &Binding) -> String {
    // The first bound string among the declared parameters is the closest
    // thing to a target name the metadata gives us.
    let target = command
        .params()
        .iter()
        .find_map(|spec| binding.get(spec.name).and_then(Value::as_str));
    match target {
        Some(target) => format!("{} on {target:?}", command.name()),
        None => command.name().to_string(),
    }
}
