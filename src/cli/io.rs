//! JSON I/O handling for CLI
//!
//! - Input: one JSON object per line on stdin
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::io::{self, BufRead, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON request from stdin
pub fn read_request() -> CliResult<Value> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    if line.trim().is_empty() {
        return Err(CliError::bad_request("Empty input"));
    }

    Ok(serde_json::from_str(&line)?)
}

/// JSON requests from `reader`, one per non-blank line.
///
/// The outer error is an I/O failure; the inner one a malformed line.
pub fn read_requests<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<CliResult<Value>>> {
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(|line| line.map(|l| serde_json::from_str(&l).map_err(CliError::from)))
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    write_line(
        out,
        &serde_json::json!({
            "status": "ok",
            "data": data
        }),
    )
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    write_line(
        out,
        &serde_json::json!({
            "status": "error",
            "code": code,
            "message": message
        }),
    )
}

fn write_line<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_requests_skips_blank_lines() {
        let input = Cursor::new("{\"op\":\"join\"}\n\n   \nnot json\n");
        let lines: Vec<_> = read_requests(input).map(|l| l.unwrap()).collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_ref().unwrap()["op"], "join");
        assert_eq!(lines[1].as_ref().unwrap_err().code_str(), "HEIRLOOM_CLI_BAD_REQUEST");
    }

    #[test]
    fn test_responses_are_single_lines() {
        let mut out = Vec::new();
        write_response(&mut out, serde_json::json!({"allowed": true})).unwrap();
        write_error(&mut out, "HEIRLOOM_NOT_INITIALIZED", "no record").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines[0]["status"], "ok");
        assert_eq!(lines[0]["data"]["allowed"], true);
        assert_eq!(lines[1]["status"], "error");
        assert_eq!(lines[1]["code"], "HEIRLOOM_NOT_INITIALIZED");
    }
}
