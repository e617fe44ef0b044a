use evalguard::{Check, CheckError, Rule};
use serde_json::{Value, json};

#[test]
fn sql_agent_output_passes_combined_rules() {
    let sql_agent = Check::new()
        .contains(["SELECT"])
        .not_contains(["DROP", "DELETE"])
        .max_length(1000)
        .not_empty()
        .wrap(|name: &str| Value::from(format!("SELECT * FROM users WHERE name = '{name}'")));

    let result = sql_agent("john").expect("valid query");
    let text = result.as_str().expect("string output");
    assert!(text.contains("SELECT"));
    assert!(text.contains("john"));
}

#[test]
fn invalid_json_output_fails_without_a_handler() {
    let agent = Check::new().valid_json().wrap(|_: ()| json!("not json"));
    let failure = agent(()).expect_err("malformed output");
    assert_eq!(failure.rule, Some(Rule::ValidJson));
}

#[test]
fn invalid_json_output_is_replaced_by_the_handler() {
    let agent = Check::new()
        .valid_json()
        .on_fail(|_| json!("fallback"))
        .wrap(|_: ()| json!("not json"));
    assert_eq!(agent(()).expect("handled"), json!("fallback"));
}

#[test]
fn handler_returning_null_discards_the_candidate() {
    let agent = Check::new()
        .contains(["required"])
        .on_fail(|_| Value::Null)
        .wrap(|_: ()| json!("candidate"));
    assert_eq!(agent(()).expect("handled"), Value::Null);
}

#[test]
fn evaluation_order_is_observable_through_the_failure_tag() {
    // The same substring configured both ways: `contains` passes first, so
    // the reported rule must be `not_contains`.
    let check = Check::new().contains(["X"]).not_contains(["X"]);
    let failure = check.apply(json!("value with X")).expect_err("must fail");
    assert_eq!(failure.rule, Some(Rule::NotContains));

    // With `not_empty` configured, an empty output never reaches `contains`.
    let check = Check::new().not_empty().contains(["X"]);
    let failure = check.apply(json!("")).expect_err("must fail");
    assert_eq!(failure.rule, Some(Rule::NotEmpty));
}

#[test]
fn list_items_are_checked_in_configured_order() {
    let check = Check::new().contains(["first", "second"]);
    let failure = check.apply(json!("only second")).expect_err("first is missing");
    assert!(failure.message.contains("first"));
}

#[test]
fn date_format_gate_with_a_single_pattern() {
    let agent = Check::new()
        .matches(r"^\d{4}-\d{2}-\d{2}$")
        .wrap(|_: ()| json!("2026-02-03"));
    assert_eq!(agent(()).expect("valid date"), json!("2026-02-03"));
}

#[test]
fn callable_errors_bypass_rule_evaluation() {
    let agent = Check::new()
        .contains(["unreachable"])
        .wrap_fallible(|fail: bool| {
            if fail {
                Err("upstream unavailable".to_string())
            } else {
                Ok(json!("output with unreachable"))
            }
        });

    match agent(true).expect_err("callable failed") {
        CheckError::Call(error) => assert_eq!(error, "upstream unavailable"),
        CheckError::Validation(failure) => panic!("unexpected validation: {failure}"),
    }
    assert_eq!(agent(false).expect("valid"), json!("output with unreachable"));
}

#[test]
fn unset_and_empty_list_configurations_both_pass() {
    let unset = Check::new();
    assert!(unset.apply(json!("anything")).is_ok());

    let vacuous = Check::new()
        .contains(Vec::<String>::new())
        .not_contains(Vec::<String>::new());
    assert!(vacuous.apply(json!("anything")).is_ok());
}

#[test]
fn invalid_configured_pattern_surfaces_at_call_time() {
    let check = Check::new().matches("[invalid");
    let failure = check.apply(json!("text")).expect_err("compile error");
    assert_eq!(failure.rule, Some(Rule::Matches));
    assert!(failure.message.contains("invalid regex"));
}
