use outcome_rail::{ErrorFormatConfig, ErrorKind, StructuredError};

fn chained() -> StructuredError {
    StructuredError::new(ErrorKind::NotFound, "config.toml missing")
        .with_context("path", "config.toml")
        .wrap(ErrorKind::Unknown, "startup failed")
}

#[test]
fn display_is_kind_and_message() {
    assert_eq!(chained().to_string(), "unknown: startup failed");
}

#[test]
fn error_chain_renders_every_link() {
    assert_eq!(
        chained().error_chain(),
        "[unknown] startup failed -> [not_found] config.toml missing {path=config.toml}"
    );
}

#[test]
fn compact_drops_kind_and_context() {
    assert_eq!(
        chained().fmt().compact().to_string(),
        "startup failed | config.toml missing"
    );
}

#[test]
fn alternate_display_cascades() {
    let rendered = format!("{:#}", chained());
    let lines: Vec<_> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("startup failed"));
    assert!(lines[1].contains("caused by: "));
    assert!(lines[1].contains("config.toml missing"));
}

#[test]
fn custom_config() {
    let config = ErrorFormatConfig { separator: " <= ".into(), ..ErrorFormatConfig::compact() };
    assert_eq!(config.format_chain(&chained()), "startup failed <= config.toml missing");
    assert_eq!(
        chained().fmt().with_separator(" / ").show_context(false).to_string(),
        "[unknown] startup failed / [not_found] config.toml missing"
    );
}
