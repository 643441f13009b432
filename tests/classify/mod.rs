use std::error::Error;
use std::fmt;
use std::io;

use outcome_rail::access::{self, PathError};
use outcome_rail::classify::kind_of_io;
use outcome_rail::{classify, Classifier, ErrorKind, Rule, StructuredError};

#[derive(Debug)]
struct QuotaExceeded {
    tenant: &'static str,
}

impl fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quota exceeded for {}", self.tenant)
    }
}

impl Error for QuotaExceeded {}

#[derive(Debug)]
struct Wrapped(io::Error);

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sync step failed")
    }
}

impl Error for Wrapped {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

#[test]
fn builtin_table_covers_access_errors() {
    let index = classify(&access::index(&[1, 2, 3], 10).unwrap_err());
    assert_eq!(index.kind(), ErrorKind::OutOfRange);
    assert_eq!(index.context_value("index"), Some("10"));
    assert_eq!(index.context_value("length"), Some("3"));

    let map = std::collections::HashMap::from([("a", 1)]);
    let key = classify(&access::key(&map, "b").unwrap_err());
    assert_eq!(key.kind(), ErrorKind::NotFound);
    assert_eq!(key.context_value("key"), Some("b"));

    let parse = classify(&access::parse_number::<i32>("abc").unwrap_err());
    assert_eq!(parse.kind(), ErrorKind::InvalidFormat);
    assert_eq!(parse.context_value("input"), Some("abc"));
    assert_eq!(parse.context_value("target_type"), Some("i32"));

    let zero = classify(&access::divide(10, 0).unwrap_err());
    assert_eq!(zero.kind(), ErrorKind::ArithmeticDomain);
    assert_eq!(zero.context_value("operation"), Some("divide"));

    let value: Box<dyn std::any::Any> = Box::new(1u8);
    let mismatch = classify(&access::downcast::<String>(&*value).unwrap_err());
    assert_eq!(mismatch.kind(), ErrorKind::TypeMismatch);
    assert_eq!(mismatch.context_value("expected_type"), Some("alloc::string::String"));
    assert_eq!(mismatch.context_value("found_type"), None);

    let mismatch = classify(&access::downcast_value::<String, i64>(&-1).unwrap_err());
    assert_eq!(mismatch.context_value("found_type"), Some("i64"));
}

#[test]
fn std_errors_are_classified() {
    assert_eq!(classify(&"x".parse::<f64>().unwrap_err()).kind(), ErrorKind::InvalidFormat);
    assert_eq!(classify(&"maybe".parse::<bool>().unwrap_err()).kind(), ErrorKind::InvalidFormat);
    assert_eq!(classify(&u8::try_from(300i32).unwrap_err()).kind(), ErrorKind::OutOfRange);

    let utf8 = classify(&String::from_utf8(vec![b'o', b'k', 0xff]).unwrap_err());
    assert_eq!(utf8.kind(), ErrorKind::InvalidFormat);
    assert_eq!(utf8.context_value("valid_up_to"), Some("2"));
}

#[test]
fn io_errors_follow_the_kind_table() {
    let cases = [
        (io::ErrorKind::NotFound, ErrorKind::NotFound),
        (io::ErrorKind::PermissionDenied, ErrorKind::PermissionDenied),
        (io::ErrorKind::TimedOut, ErrorKind::Timeout),
        (io::ErrorKind::ConnectionRefused, ErrorKind::ResourceUnavailable),
        (io::ErrorKind::WouldBlock, ErrorKind::ResourceUnavailable),
        (io::ErrorKind::InvalidData, ErrorKind::InvalidFormat),
        (io::ErrorKind::Unsupported, ErrorKind::Unknown),
    ];

    for (io_kind, expected) in cases {
        assert_eq!(kind_of_io(io_kind), expected, "{io_kind:?}");
        let classified = classify(&io::Error::from(io_kind));
        assert_eq!(classified.kind(), expected, "{io_kind:?}");
        assert_eq!(classified.context_value("io_kind"), Some(format!("{io_kind:?}").as_str()));
    }
}

#[test]
fn file_failures_keep_the_path() {
    let err = access::open("no/such/dir/file.txt").unwrap_err();
    let classified = classify(&err);
    assert_eq!(classified.kind(), ErrorKind::NotFound);
    assert_eq!(classified.context_value("path"), Some("no/such/dir/file.txt"));
    assert_eq!(classified.context_value("operation"), Some("open"));
}

#[test]
fn unrecognised_failures_are_unknown() {
    let classified = classify(&QuotaExceeded { tenant: "acme" });
    assert_eq!(classified.kind(), ErrorKind::Unknown);
    assert_eq!(classified.message(), "quota exceeded for acme");
    assert!(!classified.is_retryable());
}

#[test]
fn structured_errors_pass_through() {
    let original = StructuredError::new(ErrorKind::Cancelled, "stopped").with_context("by", "user");
    assert_eq!(classify(&original), original);
}

#[test]
fn custom_rules_extend_the_table() {
    let classifier = Classifier::default().with_rule(|err: &QuotaExceeded| {
        StructuredError::new(ErrorKind::ResourceUnavailable, err.to_string())
            .with_context("tenant", err.tenant)
    });

    let classified = classifier.classify(&QuotaExceeded { tenant: "acme" });
    assert_eq!(classified.kind(), ErrorKind::ResourceUnavailable);
    assert!(classified.is_retryable());
    assert_eq!(classified.context_value("tenant"), Some("acme"));
    assert!(classifier.rule_names().any(|name| name.ends_with("QuotaExceeded")));
}

#[test]
fn predicate_rules_see_the_raw_failure() {
    let classifier = Classifier::empty().push_rule(Rule::predicate("message", |err| {
        err.to_string()
            .contains("quota")
            .then(|| StructuredError::new(ErrorKind::PermissionDenied, err.to_string()))
    }));

    assert_eq!(
        classifier.classify(&QuotaExceeded { tenant: "a" }).kind(),
        ErrorKind::PermissionDenied
    );
    assert_eq!(classifier.classify(&io::Error::other("boom")).kind(), ErrorKind::Unknown);
}

#[test]
fn source_chain_is_searched_when_the_outer_error_is_unknown() {
    let classified = classify(&Wrapped(io::Error::from(io::ErrorKind::TimedOut)));
    assert_eq!(classified.kind(), ErrorKind::Timeout);
    assert_eq!(classified.message(), "sync step failed");
    assert!(classified.context_value("source").is_some());
    assert!(classified.is_retryable());
}

#[test]
fn classification_is_deterministic() {
    let err = PathError::new("read", "a.txt", io::Error::from(io::ErrorKind::PermissionDenied));
    assert_eq!(classify(&err), classify(&err));
    assert!(Classifier::global().classify_with_retryable(&err, true).is_retryable());
}
