use core::time::Duration;

use outcome_rail::{ErrorKind, KindSet, Outcome, RetryPolicy, StructuredError};

#[test]
fn structured_error_serializes_with_snake_case_kind() {
    let err = StructuredError::new(ErrorKind::OutOfRange, "index 10 out of range")
        .with_context("index", 10)
        .wrap(ErrorKind::Unknown, "lookup failed");

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "unknown");
    assert_eq!(json["cause"]["kind"], "out_of_range");
    assert_eq!(json["cause"]["context"][0]["key"], "index");

    let back: StructuredError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}

#[test]
fn outcome_serializes_as_tagged_enum() {
    let json = serde_json::to_string(&Outcome::Ok(3)).unwrap();
    assert_eq!(json, r#"{"Ok":3}"#);
}

#[test]
fn kind_set_is_a_list() {
    let set = KindSet::of(&[ErrorKind::Timeout, ErrorKind::NotFound]);
    assert_eq!(serde_json::to_string(&set).unwrap(), r#"["not_found","timeout"]"#);
}

#[test]
fn retry_policy_is_validated_on_deserialize() {
    let policy: RetryPolicy = serde_json::from_str(r#"{"max_attempts": 5}"#).unwrap();
    assert_eq!(policy.max_attempts(), 5);
    assert_eq!(policy.base_delay(), Duration::from_millis(100));

    let rejected = serde_json::from_str::<RetryPolicy>(r#"{"max_attempts": 0}"#);
    assert!(rejected.is_err());
}
