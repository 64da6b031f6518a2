use cachectl::{
    commands, execute, AlwaysProceed, Binding, CancelToken, DiagnosticsSink, ErrorKind, ExecOptions, Executor,
    LogDiagnostics, Outcome, OutputSink, Request, ServiceError, ServiceErrorKind, Value,
};
use cachectl_test::{map_value, MockExchange, MockTransport};

struct CollectOutput(Vec<Value>);

impl OutputSink for CollectOutput {
    fn emit(&mut self, payload: Value) {
        self.0.push(payload);
    }
}

struct CollectDiagnostics(Vec<String>);

impl DiagnosticsSink for CollectDiagnostics {
    fn notice(&mut self, message: &str) {
        self.0.push(message.to_string());
    }
}

struct Decline;

impl cachectl::ConfirmationGate for Decline {
    fn confirm(&mut self, _action: &str) -> bool {
        false
    }
}

fn forced() -> ExecOptions {
    ExecOptions {
        force: true,
        ..ExecOptions::default()
    }
}

#[test]
fn add_tag_round_trip() {
    let mut expected = Request::new("AddTagsToResource");
    expected.set_field(
        "ResourceName",
        "arn:aws:elasticache:us-east-1:123:cluster:myCluster",
    );
    expected.set_field("Tags", map_value!([{"Key": "env", "Value": "prod"}]));

    let mut transport = MockTransport::new(vec![MockExchange::new(
        map_value!({"TagList": [{"Key": "env", "Value": "prod"}]}),
    )
    .expecting(expected)]);

    let command = commands::add_tags_to_resource();
    let mut binding = Binding::new();
    binding
        .bind_alias(
            &command,
            "ResourceName",
            "arn:aws:elasticache:us-east-1:123:cluster:myCluster",
        )
        .unwrap();
    binding
        .bind_alias(&command, "Tag", map_value!([{"Key": "env", "Value": "prod"}]))
        .unwrap();

    let outcome = execute(&command, &binding, &forced(), &mut transport).unwrap();
    assert!(outcome.was_performed());
    assert_eq!(
        outcome.output(),
        &map_value!([{"Key": "env", "Value": "prod"}])
    );
    assert_eq!(transport.calls(), 1);

    // Exactly the bound fields made it into the request.
    let sent = &transport.requests()[0];
    assert_eq!(sent.fields().len(), 2);
}

#[test]
fn missing_required_parameter_never_reaches_the_transport() {
    let mut transport = MockTransport::new(vec![]);
    let command = commands::add_tags_to_resource();
    let mut binding = Binding::new();
    binding.bind("Tags", map_value!([{"Key": "env", "Value": "prod"}]));

    let err = execute(&command, &binding, &forced(), &mut transport).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingParameter);
    assert_eq!(err.detail(), Some("ResourceName"));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn empty_tag_keys_and_unbound_tag_keys_build_different_requests() {
    let command = commands::remove_tags_from_resource();

    let mut bound_empty = Binding::new();
    bound_empty.bind("ResourceName", "arn").bind("TagKeys", Value::List(vec![]));
    let with_empty = cachectl::build_request(&command, &bound_empty).unwrap();
    assert!(with_empty.has_field("TagKeys"));
    assert_eq!(with_empty.field("TagKeys"), Some(&Value::List(vec![])));

    let mut unbound = Binding::new();
    unbound.bind("ResourceName", "arn");
    let without = cachectl::build_request(&command, &unbound).unwrap();
    assert!(!without.has_field("TagKeys"));
}

#[test]
fn conflicting_selector_configuration_fails_before_any_call() {
    let mut transport = MockTransport::new(vec![]);
    let command = commands::list_tags_for_resource();
    let mut binding = Binding::new();
    binding.bind("ResourceName", "arn");

    let options = ExecOptions {
        select: Some("TagList".to_string()),
        echo_param: Some("ResourceName".to_string()),
        ..ExecOptions::default()
    };
    let err = execute(&command, &binding, &options, &mut transport).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSelectorConfig);
    assert_eq!(transport.calls(), 0);
}

#[test]
fn echo_selector_returns_the_bound_input() {
    let mut transport = MockTransport::new(vec![MockExchange::new(
        map_value!({"CacheCluster": {"CacheClusterId": "myCluster", "CacheClusterStatus": "deleting"}}),
    )]);
    let command = commands::delete_cache_cluster();
    let mut binding = Binding::new();
    binding.bind("CacheClusterId", "myCluster");

    let options = ExecOptions {
        force: true,
        echo_param: Some("CacheClusterId".to_string()),
        ..ExecOptions::default()
    };
    let outcome = execute(&command, &binding, &options, &mut transport).unwrap();
    assert_eq!(outcome.output(), &Value::Str("myCluster".into()));
}

#[test]
fn whole_response_override_round_trips() {
    let doc = map_value!({"TagList": [], "Marker": ""});
    let mut transport = MockTransport::new(vec![MockExchange::new(doc.clone())]);
    let command = commands::list_tags_for_resource();
    let mut binding = Binding::new();
    binding.bind("ResourceName", "arn");

    let options = ExecOptions {
        select: Some("*".to_string()),
        ..ExecOptions::default()
    };
    let outcome = execute(&command, &binding, &options, &mut transport).unwrap();
    assert_eq!(outcome.output(), &doc);
}

#[test]
fn absent_selected_field_yields_nil() {
    let mut transport = MockTransport::new(vec![MockExchange::new(map_value!({}))]);
    let command = commands::list_tags_for_resource();
    let mut binding = Binding::new();
    binding.bind("ResourceName", "arn");

    let outcome = execute(&command, &binding, &ExecOptions::default(), &mut transport).unwrap();
    assert_eq!(outcome.output(), &Value::Nil);
}

#[test]
fn pre_cancelled_token_records_zero_transport_calls() {
    let mut transport = MockTransport::new(vec![MockExchange::new(map_value!({}))]);
    let command = commands::list_tags_for_resource();
    let mut binding = Binding::new();
    binding.bind("ResourceName", "arn");

    let cancel = CancelToken::new();
    cancel.cancel();
    let options = ExecOptions {
        cancel,
        ..ExecOptions::default()
    };
    let err = execute(&command, &binding, &options, &mut transport).unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(transport.calls(), 0);
}

#[test]
fn declined_confirmation_performs_nothing() {
    let mut transport = MockTransport::new(vec![]);
    let command = commands::delete_cache_cluster();
    let mut binding = Binding::new();
    binding.bind("CacheClusterId", "myCluster");

    let mut gate = Decline;
    let mut output = CollectOutput(Vec::new());
    let mut diagnostics = LogDiagnostics;
    let outcome = Executor::new(&mut gate, &mut output, &mut diagnostics)
        .execute(&command, &binding, &ExecOptions::default(), &mut transport)
        .unwrap();

    assert!(!outcome.was_performed());
    assert_eq!(outcome.output(), &Value::Nil);
    assert_eq!(transport.calls(), 0);
    assert!(output.0.is_empty());
}

#[test]
fn explicit_null_on_a_required_parameter_is_noted() {
    let mut transport = MockTransport::new(vec![]);
    let command = commands::list_tags_for_resource();
    let mut binding = Binding::new();
    binding.bind("ResourceName", Value::Nil);

    let mut gate = AlwaysProceed;
    let mut output = CollectOutput(Vec::new());
    let mut diagnostics = CollectDiagnostics(Vec::new());
    let err = Executor::new(&mut gate, &mut output, &mut diagnostics)
        .execute(&command, &binding, &ExecOptions::default(), &mut transport)
        .unwrap_err();

    // The notice is observational; the null still counts as unbound.
    assert_eq!(err.kind(), ErrorKind::MissingParameter);
    assert_eq!(
        diagnostics.0,
        vec!["value bound to required parameter ResourceName was explicitly null".to_string()]
    );
    assert_eq!(transport.calls(), 0);
}

#[test]
fn declined_confirmation_is_noted() {
    let mut transport = MockTransport::new(vec![]);
    let command = commands::delete_cache_cluster();
    let mut binding = Binding::new();
    binding.bind("CacheClusterId", "myCluster");

    let mut gate = Decline;
    let mut output = CollectOutput(Vec::new());
    let mut diagnostics = CollectDiagnostics(Vec::new());
    let outcome = Executor::new(&mut gate, &mut output, &mut diagnostics)
        .execute(&command, &binding, &ExecOptions::default(), &mut transport)
        .unwrap();

    assert!(!outcome.was_performed());
    assert_eq!(
        diagnostics.0,
        vec![
            "DeleteCacheCluster on \"myCluster\" was declined; nothing was performed".to_string()
        ]
    );
}

#[test]
fn unknown_parameter_spellings_never_build_a_request() {
    let command = commands::add_tags_to_resource();
    let mut binding = Binding::new();
    let err = binding.bind_alias(&command, "ResourceNmae", "arn").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert!(err.to_string().contains("ResourceNmae"), "{err}");
}

#[test]
fn force_bypasses_the_gate() {
    let mut transport = MockTransport::new(vec![MockExchange::new(
        map_value!({"CacheCluster": {"CacheClusterStatus": "deleting"}}),
    )]);
    let command = commands::delete_cache_cluster();
    let mut binding = Binding::new();
    binding.bind("CacheClusterId", "myCluster");

    // A gate that would decline is never consulted under force.
    let mut gate = Decline;
    let mut output = CollectOutput(Vec::new());
    let mut diagnostics = LogDiagnostics;
    let outcome = Executor::new(&mut gate, &mut output, &mut diagnostics)
        .execute(&command, &binding, &forced(), &mut transport)
        .unwrap();

    assert!(outcome.was_performed());
    assert_eq!(transport.calls(), 1);
    assert_eq!(output.0.len(), 1);
}

#[test]
fn service_rejections_pass_through_intact() {
    let mut transport = MockTransport::new(vec![MockExchange::error(
        ServiceError::known(
            ServiceErrorKind::ResourceNotFound,
            Some("CacheCluster not found: myCluster".to_string()),
        )
        .into(),
    )]);
    let command = commands::delete_cache_cluster();
    let mut binding = Binding::new();
    binding.bind("CacheClusterId", "myCluster");

    let err = execute(&command, &binding, &forced(), &mut transport).unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(err.code(), Some("ResourceNotFoundFault"));
    assert_eq!(err.detail(), Some("CacheCluster not found: myCluster"));
}

#[test]
fn connectivity_failures_name_endpoint_and_operation() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "name resolution failed");
    let mut transport = MockTransport::with_endpoint(
        "https://cache.eu-west-1.example.test",
        vec![MockExchange::error(io.into())],
    );
    let command = commands::list_tags_for_resource();
    let mut binding = Binding::new();
    binding.bind("ResourceName", "arn");

    let err = execute(&command, &binding, &ExecOptions::default(), &mut transport).unwrap_err();
    assert!(err.is_connectivity_error());
    let msg = err.to_string();
    assert!(msg.contains("cache.eu-west-1.example.test"), "{msg}");
    assert!(msg.contains("ListTagsForResource"), "{msg}");
}

#[test]
fn enum_parameters_are_validated_locally() {
    let mut transport = MockTransport::new(vec![]);
    let command = commands::create_cache_cluster();
    let mut binding = Binding::new();
    binding
        .bind("CacheClusterId", "myCluster")
        .bind("Engine", "mongodb");

    let err = execute(&command, &binding, &forced(), &mut transport).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert_eq!(transport.calls(), 0);
}

#[test]
fn outcome_carries_the_raw_response() {
    let mut transport = MockTransport::new(vec![MockExchange::new(
        map_value!({"TagList": [], "Extra": 7}),
    )]);
    let command = commands::list_tags_for_resource();
    let mut binding = Binding::new();
    binding.bind("ResourceName", "arn");

    let outcome: Outcome =
        execute(&command, &binding, &ExecOptions::default(), &mut transport).unwrap();
    assert_eq!(outcome.responses().len(), 1);
    assert_eq!(outcome.responses()[0].field("Extra"), Some(&Value::Int(7)));
}
