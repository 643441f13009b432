use outcome_rail::{ErrorKind, KindSet, StructuredError};

mod formatting;
mod outcome;
#[cfg(feature = "serde")]
mod serialization;

#[test]
fn retryable_defaults_follow_kind() {
    for kind in ErrorKind::ALL {
        let err = StructuredError::new(kind, "x");
        assert_eq!(err.is_retryable(), kind.is_retryable_by_default(), "{kind}");
    }
    assert!(StructuredError::new(ErrorKind::Timeout, "x").is_retryable());
    assert!(!StructuredError::new(ErrorKind::NotFound, "x").is_retryable());
}

#[test]
fn context_keys_stay_unique_and_ordered() {
    let err = StructuredError::new(ErrorKind::OutOfRange, "index 10 out of range")
        .with_context("index", 10)
        .with_context("length", 3)
        .with_context("index", 11);

    let keys: Vec<_> = err.context().iter().map(|entry| entry.key.as_str()).collect();
    assert_eq!(keys, ["index", "length"]);
    assert_eq!(err.context_value("index"), Some("11"));
    assert_eq!(err.context_value("missing"), None);
}

#[test]
fn wrap_builds_a_chain_outermost_first() {
    let err = StructuredError::new(ErrorKind::NotFound, "row 7 missing")
        .wrap(ErrorKind::InvalidFormat, "report incomplete")
        .wrap(ErrorKind::Unknown, "export failed");

    let kinds: Vec<_> = err.chain().map(StructuredError::kind).collect();
    assert_eq!(kinds, [ErrorKind::Unknown, ErrorKind::InvalidFormat, ErrorKind::NotFound]);
    assert_eq!(err.depth(), 3);
    assert_eq!(err.root_cause().message(), "row 7 missing");
}

#[test]
fn append_cause_attaches_at_the_tail() {
    let head = StructuredError::new(ErrorKind::Timeout, "third")
        .with_cause(StructuredError::new(ErrorKind::Timeout, "third-inner"));
    let tail = StructuredError::new(ErrorKind::Timeout, "second");

    let joined = head.append_cause(tail);
    let messages: Vec<_> = joined.chain().map(StructuredError::message).collect();
    assert_eq!(messages, ["third", "third-inner", "second"]);
}

#[test]
fn source_walks_the_cause_chain() {
    use std::error::Error;

    let err = StructuredError::new(ErrorKind::NotFound, "inner").wrap(ErrorKind::Unknown, "outer");
    let source = err.source().expect("cause is exposed as source");
    assert_eq!(source.to_string(), "not_found: inner");
    assert!(source.source().is_none());
}

#[test]
fn set_retryable_overrides_the_default() {
    let err = StructuredError::new(ErrorKind::NotFound, "eventually consistent").set_retryable(true);
    assert!(err.is_retryable());
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn kind_set_collects_and_converts() {
    let set: KindSet = [ErrorKind::Timeout, ErrorKind::Timeout, ErrorKind::Cancelled]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 2);
    assert_eq!(Vec::from(set), vec![ErrorKind::Timeout, ErrorKind::Cancelled]);
    assert_eq!(format!("{set:?}"), "{Timeout, Cancelled}");
    assert!(set.union(KindSet::from(ErrorKind::NotFound)).contains(ErrorKind::NotFound));
}
