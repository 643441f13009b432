use outcome_rail::{ErrorKind, Outcome, StructuredError};

fn not_found() -> StructuredError {
    StructuredError::new(ErrorKind::NotFound, "key 'x' not found").with_context("key", "x")
}

#[test]
fn map_and_and_then_skip_errors() {
    let ok: Outcome<i32> = Outcome::Ok(2);
    assert_eq!(ok.clone().map(|n| n * 10), Outcome::Ok(20));
    assert_eq!(ok.and_then(|n| Outcome::Ok(n + 1)), Outcome::Ok(3));

    let err: Outcome<i32> = Outcome::Err(not_found());
    let mut called = false;
    let mapped = err.map(|n| {
        called = true;
        n * 10
    });
    assert!(!called);
    assert_eq!(mapped, Outcome::Err(not_found()));
}

#[test]
fn map_err_only_touches_errors() {
    let ok: Outcome<i32> = Outcome::Ok(1);
    assert_eq!(ok.map_err(|e| e.with_context("extra", 1)), Outcome::Ok(1));

    let err: Outcome<i32> = Outcome::Err(not_found());
    let tagged = err.map_err(|e| e.with_context("extra", 1)).unwrap_err();
    assert_eq!(tagged.context_value("extra"), Some("1"));
    assert_eq!(tagged.context_value("key"), Some("x"));
}

#[test]
fn unwrap_or_variants_never_panic() {
    let err: Outcome<String> = Outcome::Err(not_found());
    assert_eq!(err.clone().unwrap_or("fallback".into()), "fallback");
    assert_eq!(err.clone().unwrap_or_else(|e| e.kind().to_string()), "not_found");
    assert_eq!(err.unwrap_or_default(), "");
    assert_eq!(Outcome::Ok(5).unwrap_or(0), 5);
}

#[test]
fn or_else_can_recover() {
    let recovered = Outcome::<i32>::Err(not_found()).or_else(|e| {
        if e.kind() == ErrorKind::NotFound {
            Outcome::Ok(0)
        } else {
            Outcome::Err(e)
        }
    });
    assert_eq!(recovered, Outcome::Ok(0));
}

#[test]
fn converts_to_and_from_result() {
    let outcome: Outcome<u8> = Err(not_found()).into();
    assert!(outcome.is_err());
    let result: Result<u8, StructuredError> = outcome.into();
    assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(Outcome::Ok(3).into_result(), Ok(3));
}

#[test]
fn collect_stops_at_first_error() {
    let all: Outcome<Vec<i32>> = vec![Outcome::Ok(1), Outcome::Ok(2)].into_iter().collect();
    assert_eq!(all, Outcome::Ok(vec![1, 2]));

    let failed: Outcome<Vec<i32>> =
        vec![Outcome::Ok(1), Outcome::Err(not_found()), Outcome::Ok(3)].into_iter().collect();
    assert_eq!(failed.kind(), Some(ErrorKind::NotFound));
}

#[test]
#[should_panic(expected = "key 'x' not found")]
fn unwrap_on_err_reports_the_error() {
    Outcome::<i32>::Err(not_found()).unwrap();
}

#[test]
#[should_panic(expected = "loading settings")]
fn expect_on_err_uses_the_message() {
    Outcome::<i32>::Err(not_found()).expect("loading settings");
}
