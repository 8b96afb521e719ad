// Dweve DSV - Delimiter-Separated Values
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parse command - print rows as JSON

use super::row_stream;
use crate::cli::InputArgs;
use crate::error::CliError;
use dsv_core::Row;
use std::io::{self, BufWriter, Write};

/// Parse the input and print its rows as JSON on stdout.
///
/// # Errors
///
/// Returns `Err` if the input cannot be read or parsed, or stdout fails.
/// Rows from chunks read before a parse error have already been printed.
pub fn parse(input: &InputArgs, pretty: bool) -> Result<(), CliError> {
    let rows = row_stream(input)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_rows(rows, pretty, &mut out)?;
    out.flush().map_err(|e| CliError::io_error("<stdout>", e))
}

/// Write rows as JSON: one array per line, or a single pretty array.
///
/// # Errors
///
/// Returns the first row error, or an error if writing fails.
///
/// # Examples
///
/// ```
/// use dsv_cli::commands::write_rows;
/// use dsv_cli::error::CliError;
///
/// let rows: Vec<Result<_, CliError>> = vec![Ok(vec!["a".to_string(), "b".to_string()])];
/// let mut out = Vec::new();
/// write_rows(rows, false, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "[\"a\",\"b\"]\n");
/// ```
pub fn write_rows<I, E, W>(rows: I, pretty: bool, out: &mut W) -> Result<(), CliError>
where
    I: IntoIterator<Item = Result<Row, E>>,
    CliError: From<E>,
    W: Write,
{
    let write_err = |e: io::Error| CliError::io_error("<stdout>", e);

    if pretty {
        let rows = rows.into_iter().collect::<Result<Vec<Row>, E>>()?;
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out).map_err(write_err)?;
        return Ok(());
    }

    for row in rows {
        serde_json::to_writer(&mut *out, &row?)?;
        writeln!(out).map_err(write_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsv_stream::{StreamConfig, StreamError, StreamingParser};
    use std::io::Cursor;

    fn render(input: &str, pretty: bool) -> (String, Result<(), CliError>) {
        let config = StreamConfig {
            buffer_size: 3,
            ..StreamConfig::default()
        };
        let rows = StreamingParser::with_config(Cursor::new(input.to_string()), config).unwrap();
        let mut out = Vec::new();
        let result = write_rows(rows, pretty, &mut out);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn test_json_lines() {
        let (out, result) = render("a,b\n\"c,d\",\"e\"\"f\"\n", false);
        result.unwrap();
        assert_eq!(out, "[\"a\",\"b\"]\n[\"c,d\",\"e\\\"f\"]\n");
    }

    #[test]
    fn test_pretty_array() {
        let (out, result) = render("x\ny\n", true);
        result.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!([["x"], ["y"]]));
        assert!(out.contains("\n  "));
    }

    #[test]
    fn test_empty_input_pretty() {
        let (out, result) = render("", true);
        result.unwrap();
        assert_eq!(out.trim(), "[]");
    }

    #[test]
    fn test_rows_before_error_are_written() {
        let (out, result) = render("ok\n\"bad\"x\n", false);
        assert_eq!(out, "[\"ok\"]\n");
        assert!(matches!(result, Err(CliError::Stream(StreamError::Parse { .. }))));
    }

    #[test]
    fn test_pretty_writes_nothing_on_error() {
        let (out, result) = render("ok\n\"bad\"x\n", true);
        assert!(out.is_empty());
        assert!(result.is_err());
    }
}
