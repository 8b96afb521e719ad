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

//! Resumable parser driver.
//!
//! [`Parser::parse`] turns one buffer into the rows it fully contains plus
//! the carry: the unresolved tail to prepend to the next chunk. Feeding a
//! stream chunk by chunk (with `has_more_data = true` for every chunk but
//! the last) yields exactly the rows a single call over the whole text
//! would.
//!
//! # Examples
//!
//! ```
//! use dsv_core::{Parser, ParserOptions};
//!
//! let mut parser = Parser::new(ParserOptions::default()).unwrap();
//!
//! let first = parser.parse("a,b\nc,", true).unwrap();
//! assert_eq!(first.rows, vec![vec!["a".to_string(), "b".to_string()]]);
//! assert_eq!(first.carry, "c,");
//!
//! let input = format!("{}d\n", first.carry);
//! let second = parser.parse(&input, false).unwrap();
//! assert_eq!(second.rows, vec![vec!["c".to_string(), "d".to_string()]]);
//! assert_eq!(second.carry, "");
//! ```

pub mod column;
mod row;

pub use row::RowParser;

use crate::config::ParserOptions;
use crate::error::{ConfigError, ParseError};
use crate::lex::Scanner;

/// One parsed row: field values in column order.
pub type Row = Vec<String>;

/// Byte order mark, stripped once at the start of a stream.
pub const BOM: char = '\u{FEFF}';

/// Outcome of parsing a structure that may span past the buffer end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress<T> {
    /// The structure is complete.
    Complete(T),
    /// More data is needed; nothing was consumed.
    Incomplete,
}

/// Result of one [`Parser::parse`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChunk<'a> {
    /// Rows completed by this call, in input order.
    pub rows: Vec<Row>,
    /// Unconsumed suffix of the buffer to prepend to the next chunk.
    pub carry: &'a str,
}

/// Top-level parser, constructed once per stream and reused for every chunk.
#[derive(Debug, Clone)]
pub struct Parser {
    options: ParserOptions,
    row_parser: RowParser,
    stream_started: bool,
}

impl Parser {
    /// Create a parser.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `options` fails [`ParserOptions::validate`].
    pub fn new(options: ParserOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            row_parser: RowParser::new(&options),
            options,
            stream_started: false,
        })
    }

    /// The options this parser was built with.
    #[inline]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Forget that a stream has started, so the next buffer may carry a BOM.
    pub fn reset(&mut self) {
        self.stream_started = false;
    }

    /// Parse as many complete rows from `line` as possible.
    ///
    /// `line` is the previous carry followed by the new chunk. With
    /// `has_more_data = false` the whole buffer is consumed and the carry is
    /// empty on success.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for malformed quoting that more data could not
    /// repair. Offsets in the error are relative to `line`.
    pub fn parse<'a>(
        &mut self,
        line: &'a str,
        has_more_data: bool,
    ) -> Result<ParsedChunk<'a>, ParseError> {
        let mut scanner = Scanner::new(line, self.options.delimiter, has_more_data);
        if !self.stream_started && !line.is_empty() {
            self.stream_started = true;
            if line.starts_with(BOM) {
                scanner.advance_to(BOM.len_utf8());
                scanner.truncate_to_cursor();
            }
        }

        let mut rows = Vec::new();
        loop {
            let Some(token) = scanner.next_non_space_token() else {
                if !has_more_data {
                    scanner.advance_to_end();
                }
                break;
            };
            if token.is_opt_char(self.options.comment) {
                if !scanner.advance_past_line() {
                    break;
                }
                scanner.truncate_to_cursor();
                continue;
            }
            match self.row_parser.parse(&mut scanner)? {
                Progress::Complete(row) => {
                    if !(self.options.ignore_empty_row && is_empty_row(&row)) {
                        rows.push(row);
                    }
                }
                Progress::Incomplete => break,
            }
        }

        Ok(ParsedChunk {
            rows,
            carry: scanner.line_from_cursor(),
        })
    }
}

/// A row with no fields, or whose fields are all blank.
pub fn is_empty_row(row: &[String]) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}
