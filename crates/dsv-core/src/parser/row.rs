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

//! Row assembly.
//!
//! A row is a sequence of fields separated by the delimiter and ended by a
//! line terminator, or by the end of input when no more data will follow.
//! Empty fields come from delimiters alone:
//!
//! | input    | fields              |
//! |----------|---------------------|
//! | `,a`     | `["", "a"]`         |
//! | `a,,b`   | `["a", "", "b"]`    |
//! | `a,b,`   | `["a", "b", ""]`    |
//! | `\n`     | `[]`                |

use super::column::ColumnParser;
use super::{Progress, Row};
use crate::config::ParserOptions;
use crate::error::ParseError;
use crate::lex::{Scanner, Token};

/// Assembles fields into one row.
#[derive(Debug, Clone)]
pub struct RowParser {
    delimiter: char,
    strict_column_handling: bool,
    column_parser: ColumnParser,
}

impl RowParser {
    /// Build a row parser for `options`.
    pub fn new(options: &ParserOptions) -> Self {
        Self {
            delimiter: options.delimiter,
            strict_column_handling: options.strict_column_handling,
            column_parser: ColumnParser::new(options),
        }
    }

    /// Parse one row starting at the cursor.
    ///
    /// On [`Progress::Complete`] the scanner is truncated just past the row
    /// terminator. On [`Progress::Incomplete`] the cursor is restored to
    /// where the row started, so the whole row ends up in the carry.
    ///
    /// # Errors
    ///
    /// Propagates [`ParseError`] from quoted fields.
    pub fn parse(&self, scanner: &mut Scanner<'_>) -> Result<Progress<Row>, ParseError> {
        let start = scanner.cursor();
        let has_more = scanner.has_more_data();
        let mut row = Row::new();
        let mut current = self.start_token(scanner, &mut row);

        while let Some(token) = current {
            if token.is_line_terminator() {
                scanner.advance_past_token(&token);
                // CR at the end of the buffer may be the first half of CRLF.
                if !scanner.has_more_characters() && token.is_carriage_return() && has_more {
                    scanner.advance_to(start);
                    return Ok(Progress::Incomplete);
                }
                scanner.truncate_to_cursor();
                return Ok(Progress::Complete(row));
            }
            if !self.skip_column_parse(scanner, &token, &mut row) {
                match self.column_parser.parse(scanner)? {
                    Progress::Complete(field) => row.push(field),
                    Progress::Incomplete => {
                        scanner.advance_to(start);
                        return Ok(Progress::Incomplete);
                    }
                }
            }
            current = scanner.next_non_space_token();
        }

        if has_more {
            scanner.advance_to(start);
            return Ok(Progress::Incomplete);
        }
        scanner.truncate_to_cursor();
        Ok(Progress::Complete(row))
    }

    /// Peek the first token, recording the empty leading field of a row that
    /// starts with the delimiter. The delimiter itself is left unconsumed.
    fn start_token<'a>(&self, scanner: &Scanner<'a>, row: &mut Row) -> Option<Token<'a>> {
        let token = scanner.next_non_space_token()?;
        if token.is_char(self.delimiter) {
            row.push(String::new());
        }
        Some(token)
    }

    /// Consume a delimiter token, adding an empty field when nothing but
    /// another delimiter, a terminator, or the end of input follows it.
    ///
    /// Returns `true` when no column parse is needed for this token.
    fn skip_column_parse(
        &self,
        scanner: &mut Scanner<'_>,
        token: &Token<'_>,
        row: &mut Row,
    ) -> bool {
        if !token.is_char(self.delimiter) {
            return false;
        }
        scanner.advance_past_token(token);
        match scanner.next_character_token() {
            None => {
                if !self.strict_column_handling {
                    row.push(String::new());
                }
                true
            }
            Some(next) if next.is_char('\r') || next.is_char('\n') => {
                if !self.strict_column_handling {
                    row.push(String::new());
                }
                true
            }
            Some(next) if next.is_char(self.delimiter) => {
                row.push(String::new());
                true
            }
            Some(_) => false,
        }
    }
}
