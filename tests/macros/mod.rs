use outcome_rail::traits::ResultExt;
use outcome_rail::{ensure, structured, ErrorKind, Outcome};

#[test]
fn structured_without_context() {
    let err = structured!(PermissionDenied, "write to /etc refused");
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_eq!(err.message(), "write to /etc refused");
    assert!(err.context().is_empty());
}

#[test]
fn structured_with_args_and_context() {
    let index = 10;
    let len = 3;
    let err = structured!(OutOfRange, "index {} out of range for length {}", index, len;
        index = index, length = len,);

    assert_eq!(err.message(), "index 10 out of range for length 3");
    assert_eq!(err.context_value("index"), Some("10"));
    assert_eq!(err.context_value("length"), Some("3"));
    assert!(!err.is_retryable());
}

fn parse_port(raw: &str) -> Outcome<u16> {
    let port = match raw.parse::<u16>().ctx("input", raw) {
        Outcome::Ok(port) => port,
        Outcome::Err(err) => return Outcome::Err(err),
    };
    ensure!(port >= 1024, PermissionDenied, "port {} is privileged", port; port = port);
    Outcome::Ok(port)
}

#[test]
fn ensure_returns_early() {
    assert_eq!(parse_port("8080"), Outcome::Ok(8080));

    let privileged = parse_port("80").unwrap_err();
    assert_eq!(privileged.kind(), ErrorKind::PermissionDenied);
    assert_eq!(privileged.context_value("port"), Some("80"));

    let invalid = parse_port("http").unwrap_err();
    assert_eq!(invalid.kind(), ErrorKind::InvalidFormat);
    assert_eq!(invalid.context_value("input"), Some("http"));
}
