use core::time::Duration;
use std::collections::HashMap;
use std::io;

use outcome_rail::prelude::*;
use outcome_rail::{access, lookup_or, Retry};

fn load_config() -> Outcome<String> {
    std::fs::read_to_string("config.toml").ctx("file", "config.toml")
}

fn port_from(settings: &HashMap<String, String>) -> Result<Outcome<u16>, access::AccessError> {
    let raw = match safe_call(|| access::key(settings, "port"), expected::KEYED)? {
        Outcome::Ok(raw) => raw,
        Outcome::Err(err) => return Ok(Outcome::Err(err)),
    };
    Ok(outcome_rail::safe_parse::<u16>(raw))
}

fn count_rows(rows: &[&str]) -> Outcome<usize> {
    ensure!(rows.len() > 5, InvalidFormat, "expected more than 5 rows, got {}", rows.len());
    Outcome::Ok(rows.len())
}

fn main() {
    println!("Running Quick Start examples...");

    // 1. Classified failures
    println!("\n1. Classified failures:");
    match load_config() {
        Outcome::Ok(text) => println!("Loaded {} bytes", text.len()),
        Outcome::Err(err) => println!("Error: {err:#}"),
    }

    // 2. Expected vs unexpected
    println!("\n2. Expected failures as values:");
    let list = [1, 2, 3];
    match safe_call(|| access::index(&list, 10), expected::INDEXED) {
        Ok(Outcome::Ok(value)) => println!("Value: {value}"),
        Ok(Outcome::Err(err)) => println!("Recovered: {}", err.error_chain()),
        Err(unexpected) => println!("Unexpected: {unexpected}"),
    }
    let n = with_default(|| access::parse_number::<i32>("abc"), expected::NUMERIC, 0)
        .unwrap_or_default();
    println!("Parsed with default: {n}");

    let mut settings = HashMap::new();
    settings.insert("port".to_string(), "80a".to_string());
    match port_from(&settings) {
        Ok(outcome) => println!("Port: {outcome:?}"),
        Err(err) => println!("Unexpected: {err}"),
    }
    println!("Mode: {}", lookup_or(&settings, "mode", "dev".to_string()));

    // 3. Retry
    println!("\n3. Retry:");
    let policy = RetryPolicy::builder()
        .max_attempts(3)
        .base_delay(Duration::from_millis(10))
        .build()
        .expect("valid policy");
    let mut calls = 0;
    let report = Retry::new(&policy).run_with_report(|| {
        calls += 1;
        if calls < 3 {
            Err(io::Error::new(io::ErrorKind::TimedOut, "upstream slow"))
        } else {
            Ok("payload")
        }
    });
    println!(
        "Outcome: {:?} after {} attempts, waited {:?}",
        report.outcome, report.attempts, report.total_wait
    );

    // 4. Scoped resources
    println!("\n4. Scoped resources:");
    let outcome = with_scope(
        || Ok::<_, io::Error>(vec!["row 1", "row 2"]),
        |rows| count_rows(rows).into_result(),
        |rows| {
            println!("  released {} rows", rows.len());
            Ok::<_, io::Error>(())
        },
    );
    println!("Outcome: {outcome:?}");
}
