//! Terminal output
//!
//! Results go to stdout (raw in text mode so they can be piped, pretty JSON
//! in json mode). Status lines and errors go to stderr.

use credkit_core::Error;
use owo_colors::OwoColorize;
use serde_json::Value;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }
}

/// Print a JSON document to stdout
pub fn json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

/// Print `label: value` to stdout
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("{} {}", format!("{}:", label).dimmed(), value);
}

/// Report a failed command
pub fn report(err: &Error, json: bool) {
    if json {
        match serde_json::to_string(&err.to_report()) {
            Ok(text) => eprintln!("{}", text),
            Err(_) => eprintln!("{}", err),
        }
    } else {
        Status::error(&err.to_string());
    }
}
