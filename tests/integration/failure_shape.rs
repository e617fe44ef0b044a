use std::error::Error;

use evalguard::{Rule, ValidationFailure, expect};
use serde_json::json;

#[test]
fn display_renders_exactly_the_message() {
    let failure = ValidationFailure::new("failed validation", json!(null), Rule::Contains);
    assert_eq!(failure.to_string(), "failed validation");
}

#[test]
fn debug_additionally_surfaces_the_rule() {
    let failure = expect("hello").contains("missing").expect_err("must fail");
    let rendered = format!("{failure:?}");
    assert!(rendered.contains("Contains"));
}

#[test]
fn offending_value_keeps_its_original_type() {
    let failure = expect(json!([1, 2, 3])).max_length(2).expect_err("projection too long");
    assert_eq!(failure.value, json!([1, 2, 3]));
}

#[test]
fn wrapped_causes_are_reachable_through_source() {
    let failure = expect("{broken").valid_json().expect_err("parse error");
    let cause = failure.source().expect("cause preserved");
    assert!(!cause.to_string().is_empty());

    let failure = expect("x").matches("(unclosed").expect_err("compile error");
    assert!(failure.source().is_some());

    let failure = expect("x")
        .try_satisfies(|_| Err("boom".into()), "check")
        .expect_err("predicate error");
    assert_eq!(failure.source().expect("cause preserved").to_string(), "boom");
}

#[test]
fn plain_rule_failures_carry_no_cause() {
    let failure = expect("abc").contains("z").expect_err("must fail");
    assert!(failure.source().is_none());
}

#[test]
fn report_serializes_the_failure_shape() {
    let failure = expect(json!(0)).not_empty().expect_err("zero is empty");
    assert_eq!(
        failure.report(),
        json!({
            "message": "expected non-empty value, got 0",
            "rule": "not_empty",
            "value": 0,
        })
    );
}
