//! CLI response formatting and output.
//!
//! Provides the JSON envelope and exit code mapping for `--json` runs.

use gfxmigrate::{Error, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code().to_string(),
                message: err.to_string(),
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) {
    use std::io::{self, Write};

    let payload = match serde_json::to_string_pretty(response) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("Error: failed to serialize response: {}", err);
            return;
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    // Exit gracefully on SIGPIPE; anything else is reported to stderr.
    if let Err(err) = writeln!(handle, "{}", payload) {
        if err.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("Error: failed to write response: {}", err);
        }
    }
}

pub fn print_json_result<T: Serialize>(result: Result<T>) {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

/// Map a command result to (output, exit code), folding error classes into
/// their process exit status.
pub fn split_cmd_result<T: Serialize>(result: Result<(T, i32)>) -> (Result<T>, i32) {
    match result {
        Ok((data, exit_code)) => (Ok(data), exit_code),
        Err(err) => {
            let exit_code = err.exit_code();
            (Err(err), exit_code)
        }
    }
}
