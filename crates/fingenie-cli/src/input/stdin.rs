use serde_json::Value;
use std::io::{self, Read};

/// Read a JSON request piped on stdin.
///
/// Returns `None` when stdin is an interactive terminal or the pipe is empty,
/// so callers fall back to command-line flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    match buffer.trim() {
        "" => Ok(None),
        body => serde_json::from_str(body)
            .map(Some)
            .map_err(|e| format!("Invalid JSON on stdin: {}", e).into()),
    }
}
