use std::collections::HashMap;

use crate::errors::ErrorKind;
use crate::selector::Selector;
use crate::types::{CmdResult, Value};

/// The declared shape of one parameter.
///
/// `kind` drives coercion when the request is built; `aliases` are the
/// external spellings that collapse onto `name` before the builder ever
/// sees them.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    /// Canonical parameter name, as it appears in the request.
    pub name: &'static str,
    /// The semantic shape of the parameter.
    pub kind: ParamKind,
    /// Whether the parameter must be bound before a request may be built.
    pub required: bool,
    /// Alternative external names for the parameter.
    pub aliases: &'static [&'static str],
}

/// Semantic parameter shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// A plain string.
    Str,
    /// An integer.
    Int,
    /// A boolean flag.
    Bool,
    /// A string restricted to a fixed set of values.
    Enum(&'static [&'static str]),
    /// A list of strings.  A single string is wrapped into a one-element
    /// list.
    StrList,
    /// A list of map-shaped entries.  A single map is wrapped into a
    /// one-element list.
    MapList,
}

/// Marks an operation as paginated and names its continuation-token
/// fields.
#[derive(Clone, Copy, Debug)]
pub struct PageSpec {
    /// The request field the token is sent in.
    pub input_token: &'static str,
    /// The response field the next token is read from.
    pub output_token: &'static str,
}

/// Immutable metadata for one remote operation.
///
/// A `Command` carries no per-invocation state; it is safe to share one
/// instance across any number of concurrent executions.  Concrete
/// definitions live in the [`crate::commands`] catalog:
///
/// ```rust
/// use cachectl::commands;
///
/// let command = commands::describe_cache_clusters();
/// assert!(command.is_paginated());
/// ```
#[derive(Clone, Debug)]
pub struct Command {
    name: &'static str,
    params: &'static [ParamSpec],
    default_selector: Selector,
    mutating: bool,
    pages: Option<PageSpec>,
}

impl Command {
    /// Creates a new command with the given operation name and declared
    /// parameters.  The default output selector is the whole response.
    pub fn new(name: &'static str, params: &'static [ParamSpec]) -> Command {
        Command {
            name,
            params,
            default_selector: Selector::WholeResponse,
            mutating: false,
            pages: None,
        }
    }

    /// Marks the command as mutating, subjecting it to the confirmation
    /// gate.
    pub fn mutating(mut self) -> Command {
        self.mutating = true;
        self
    }

    /// Declares the named response field as the default output selector.
    pub fn select_field(mut self, field: &'static str) -> Command {
        self.default_selector = Selector::Field(field.to_owned());
        self
    }

    /// Declares the operation as paginated over the given token fields.
    pub fn paginated(mut self, input_token: &'static str, output_token: &'static str) -> Command {
        self.pages = Some(PageSpec {
            input_token,
            output_token,
        });
        self
    }

    /// The remote operation name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared parameters, in request order.
    pub fn params(&self) -> &'static [ParamSpec] {
        self.params
    }

    /// Looks up a parameter by its canonical name.
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }

    /// Resolves an external parameter spelling to its canonical name.
    /// Canonical names resolve to themselves; unknown names come back
    /// unresolved.
    pub fn canonical_name(&self, external: &str) -> Option<&'static str> {
        self.params
            .iter()
            .find(|spec| spec.name == external || spec.aliases.contains(&external))
            .map(|spec| spec.name)
    }

    /// The command's declared default output selector.
    pub fn default_selector(&self) -> &Selector {
        &self.default_selector
    }

    /// Whether the operation changes service state.
    pub fn is_mutating(&self) -> bool {
        self.mutating
    }

    /// The pagination declaration, if the operation is paginated.
    pub fn page_spec(&self) -> Option<&PageSpec> {
        self.pages.as_ref()
    }

    /// Whether the operation is paginated.
    pub fn is_paginated(&self) -> bool {
        self.pages.is_some()
    }
}

/// Resolved input values for one invocation.
///
/// A binding distinguishes three states per parameter: unbound, bound to
/// the explicit null and bound to a value.  All three matter: an unbound
/// optional parameter is omitted from the request, while a bound empty
/// list is sent as-is.
#[derive(Clone, Debug, Default)]
pub struct Binding {
    values: HashMap<String, Value>,
}

impl Binding {
    /// Creates an empty binding.
    pub fn new() -> Binding {
        Binding::default()
    }

    /// Binds a value under its canonical parameter name.  Binding the same
    /// name twice keeps the later value.
    pub fn bind(&mut self, name: &str, value: impl Into<Value>) -> &mut Binding {
        self.values.insert(name.to_owned(), value.into());
        self
    }

    /// Binds a value under an external spelling, resolving aliases against
    /// the command's declared parameters.  A spelling the command does not
    /// declare is refused, so a typoed name cannot silently vanish.
    pub fn bind_alias(
        &mut self,
        command: &Command,
        external: &str,
        value: impl Into<Value>,
    ) -> CmdResult<&mut Binding> {
        match command.canonical_name(external) {
            Some(name) => Ok(self.bind(name, value)),
            None => fail!((
                ErrorKind::InvalidParameter,
                "unknown parameter",
                format!("{} does not accept {external:?}", command.name())
            )),
        }
    }

    /// Looks up the bound value for a canonical parameter name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether the parameter is bound at all, including to the explicit
    /// null.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: &[ParamSpec] = &[
        ParamSpec {
            name: "ResourceName",
            kind: ParamKind::Str,
            required: true,
            aliases: &["Arn", "ResourceArn"],
        },
        ParamSpec {
            name: "Tags",
            kind: ParamKind::MapList,
            required: true,
            aliases: &["Tag"],
        },
    ];

    fn tag_command() -> Command {
        Command::new("AddTagsToResource", PARAMS).mutating()
    }

    #[test]
    fn aliases_collapse_to_the_canonical_name() {
        let command = tag_command();
        assert_eq!(command.canonical_name("Arn"), Some("ResourceName"));
        assert_eq!(command.canonical_name("ResourceName"), Some("ResourceName"));
        assert_eq!(command.canonical_name("Nope"), None);

        let mut binding = Binding::new();
        binding
            .bind_alias(&command, "ResourceArn", "arn:aws:elasticache:us-east-1:123:cluster:c")
            .unwrap();
        assert!(binding.contains("ResourceName"));
        assert!(!binding.contains("ResourceArn"));
    }

    #[test]
    fn unknown_spellings_are_refused() {
        let command = tag_command();
        let mut binding = Binding::new();
        let err = binding.bind_alias(&command, "ResorceName", "arn").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(
            err.detail(),
            Some("AddTagsToResource does not accept \"ResorceName\"")
        );
        assert!(binding.is_empty());
    }

    #[test]
    fn rebinding_keeps_the_later_value() {
        let mut binding = Binding::new();
        binding.bind("ResourceName", "first").bind("ResourceName", "second");
        assert_eq!(binding.get("ResourceName"), Some(&Value::Str("second".into())));
        assert_eq!(binding.len(), 1);
    }

    #[test]
    fn explicit_nil_is_bound() {
        let mut binding = Binding::new();
        binding.bind("Tags", Value::Nil);
        assert!(binding.contains("Tags"));
        assert_eq!(binding.get("Tags"), Some(&Value::Nil));
    }
}
