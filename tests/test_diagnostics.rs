mod common;

use cfgcheck::validation::{int_between, string_in_slice, string_len_between};
use cfgcheck::{
    AttributePath, CheckError, DiagnosticsExt, Result, Severity, ValidationOutcome, Value, all,
    any, no_zero_values, shared, to_diag_fn,
};

/// A validator producing two warnings then one error yields W, W, E on the
/// full attribute path.
#[test]
fn warnings_precede_errors() {
    let validator = |_: &Value, key: &str| -> Result<ValidationOutcome> {
        let mut outcome = ValidationOutcome::error(format!("{key} is invalid"));
        outcome.warnings.push(format!("{key} is deprecated"));
        outcome.warnings.push(format!("{key} will be removed"));
        Ok(outcome)
    };
    let path = AttributePath::root("resource").attribute("settings").attribute("mode");

    let diags = to_diag_fn(validator)
        .validate(&Value::from("legacy"), &path)
        .unwrap();

    assert_eq!(diags.len(), 3);
    assert_eq!(diags[0].severity, Severity::Warning);
    assert_eq!(diags[0].summary, "mode is deprecated");
    assert_eq!(diags[1].severity, Severity::Warning);
    assert_eq!(diags[1].summary, "mode will be removed");
    assert_eq!(diags[2].severity, Severity::Error);
    assert_eq!(diags[2].summary, "mode is invalid");
    assert!(diags.iter().all(|d| d.attribute_path == path));
}

/// A realistic composed constraint reports every violated rule at once.
#[test]
fn composed_constraint_reports_all_violations() {
    let protocol = to_diag_fn(all([
        shared(no_zero_values),
        shared(string_len_between(3, 5)),
        shared(string_in_slice(&["tcp", "udp", "icmp"], true)),
    ]));
    let path = AttributePath::root("rule").index(0).attribute("protocol");

    let diags = protocol.validate(&Value::from(""), &path).unwrap();
    let rendered: Vec<String> = diags.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "error: protocol must not be empty, got  at rule[0].protocol",
            "error: expected length of protocol to be in the range (3 - 5), got  at rule[0].protocol",
            r#"error: expected protocol to be one of ["tcp", "udp", "icmp"], got  at rule[0].protocol"#,
        ]
    );

    assert!(protocol.validate(&Value::from("UDP"), &path).unwrap().is_empty());
}

/// `any` lets a value satisfy one of several alternative constraints.
#[test]
fn alternative_constraints() {
    let port = to_diag_fn(any([
        shared(int_between(1, 1023)),
        shared(int_between(8000, 8999)),
    ]));
    let path = AttributePath::root("listener").attribute("port");

    assert!(port.validate(&Value::Int(443), &path).unwrap().is_empty());
    assert!(port.validate(&Value::Int(8080), &path).unwrap().is_empty());

    let diags = port.validate(&Value::Int(5000), &path).unwrap();
    assert_eq!(diags.len(), 2);
    assert!(diags.has_errors());
    assert_eq!(diags.warnings().count(), 0);
}

/// Wiring the adapter to a list element is a precondition fault, not a
/// diagnostic.
#[test]
fn list_element_path_is_rejected() {
    let adapter = to_diag_fn(no_zero_values);
    let path = AttributePath::root("names").index(1);

    let err = adapter.validate(&Value::from(""), &path).unwrap_err();
    assert!(err.is_misuse());
    assert!(matches!(err, CheckError::PathPrecondition { .. }));
    assert!(err.to_string().contains("names[1]"));
}

/// A zero boolean under a text/number constraint surfaces as a fault; a
/// non-zero boolean passes.
#[test]
fn misapplied_constraint_is_a_fault() {
    let adapter = to_diag_fn(no_zero_values);
    let path = AttributePath::root("enabled");

    let err = adapter.validate(&Value::Bool(false), &path).unwrap_err();
    assert!(matches!(err, CheckError::UnsupportedValueKind { .. }));

    assert!(adapter.validate(&Value::Bool(true), &path).unwrap().is_empty());
}

/// Adapters and combinators can be shared across threads.
#[test]
fn adapters_are_thread_safe() {
    let adapter = std::sync::Arc::new(to_diag_fn(all([
        shared(no_zero_values),
        shared(int_between(0, 100)),
    ])));

    let handles: Vec<_> = (0..4_i64)
        .map(|i| {
            let adapter = std::sync::Arc::clone(&adapter);
            std::thread::spawn(move || {
                adapter
                    .validate(&Value::Int(i * 50), &AttributePath::root("pct"))
                    .unwrap()
                    .len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    // 0 → zero value, 50 → ok, 100 → ok, 150 → out of range
    assert_eq!(counts, vec![1, 0, 0, 1]);
}

/// Misuse faults are logged at error level with the validator, value kind
/// and attribute key; a path precondition failure carries the rendered path.
#[test]
fn misuse_is_logged() {
    let (result, events) = common::capture_events(|| {
        to_diag_fn(no_zero_values).validate(&Value::Bool(false), &AttributePath::root("enabled"))
    });
    assert!(result.is_err());

    let errors = common::at_level(&events, "ERROR");
    assert_eq!(errors.len(), 1);
    let fields = &errors[0]["fields"];
    assert_eq!(fields["validator"], "no_zero_values");
    assert_eq!(fields["kind"], "bool");
    assert_eq!(fields["key"], "enabled");

    let (result, events) = common::capture_events(|| {
        to_diag_fn(no_zero_values).validate(&Value::from("x"), &AttributePath::root("tags").index(0))
    });
    assert!(result.is_err());
    let errors = common::at_level(&events, "ERROR");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["fields"]["path"], "tags[0]");
}

/// Ordinary constraint violations are data and never logged as errors.
#[test]
fn violations_are_not_logged_as_errors() {
    let (diags, events) = common::capture_events(|| {
        to_diag_fn(no_zero_values)
            .validate(&Value::Int(0), &AttributePath::root("port"))
            .unwrap()
    });
    assert_eq!(diags.len(), 1);
    assert!(common::at_level(&events, "ERROR").is_empty());
}
