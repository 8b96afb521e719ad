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

//! Cursor over one buffer.
//!
//! A [`Scanner`] is created for every parse call and dropped when the call
//! returns. It holds the buffer, a byte cursor, and the caller's
//! "more data may follow" flag. Lookahead methods never move the cursor;
//! the `advance_*` methods do.
//!
//! # Line terminators
//!
//! CR, LF and CRLF all end a row. A CR that is the very last byte of a
//! buffer while more data may follow is ambiguous (the LF may be in the next
//! chunk), so [`Scanner::advance_past_line`] refuses to consume it and the
//! callers leave it in the carry.
//!
//! # Examples
//!
//! ```
//! use dsv_core::lex::Scanner;
//!
//! let mut scanner = Scanner::new("  a,b\n", ',', false);
//! let token = scanner.next_non_space_token().unwrap();
//! assert_eq!(token.text(), "a");
//! assert_eq!(token.start(), 2);
//!
//! assert!(scanner.advance_past_line());
//! assert!(!scanner.has_more_characters());
//! ```

use super::token::Token;
use memchr::{memchr2, memchr3};

/// Cursor and lookahead over a single buffer.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    line: &'a str,
    cursor: usize,
    consumed: usize,
    delimiter: char,
    has_more_data: bool,
}

impl<'a> Scanner<'a> {
    /// Create a scanner at the start of `line`.
    pub fn new(line: &'a str, delimiter: char, has_more_data: bool) -> Self {
        Self {
            line,
            cursor: 0,
            consumed: 0,
            delimiter,
            has_more_data,
        }
    }

    /// Whether bytes after this buffer may still arrive.
    #[inline]
    pub fn has_more_data(&self) -> bool {
        self.has_more_data
    }

    /// Whether unread characters remain after the cursor.
    #[inline]
    pub fn has_more_characters(&self) -> bool {
        self.cursor < self.line.len()
    }

    /// Cursor position in the current (possibly truncated) buffer.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in the buffer the scanner was created with.
    #[inline]
    pub fn offset(&self) -> usize {
        self.consumed + self.cursor
    }

    /// The configured delimiter.
    #[inline]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// The unread suffix of the buffer.
    #[inline]
    pub fn line_from_cursor(&self) -> &'a str {
        &self.line[self.cursor..]
    }

    /// The character at byte position `pos` of the current buffer.
    #[inline]
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.line.get(pos..).and_then(|rest| rest.chars().next())
    }

    /// The next line terminator, delimiter, or non-whitespace character.
    ///
    /// Whitespace other than CR, LF and the delimiter is skipped. Returns
    /// `None` if only such whitespace remains.
    pub fn next_non_space_token(&self) -> Option<Token<'a>> {
        let rest = self.line_from_cursor();
        for (idx, ch) in rest.char_indices() {
            let start = self.cursor + idx;
            match ch {
                '\r' => {
                    let len = if rest.as_bytes().get(idx + 1) == Some(&b'\n') {
                        2
                    } else {
                        1
                    };
                    return Some(Token::new(&self.line[start..start + len], start));
                }
                '\n' => return Some(Token::new(&self.line[start..start + 1], start)),
                c if c == self.delimiter || !c.is_whitespace() => {
                    return Some(Token::new(&self.line[start..start + c.len_utf8()], start));
                }
                _ => {}
            }
        }
        None
    }

    /// The single character at the cursor.
    pub fn next_character_token(&self) -> Option<Token<'a>> {
        let ch = self.char_at(self.cursor)?;
        let start = self.cursor;
        Some(Token::new(&self.line[start..start + ch.len_utf8()], start))
    }

    /// Byte position of the next delimiter, CR or LF at or after the cursor.
    pub fn find_field_end(&self) -> Option<usize> {
        let rest = self.line_from_cursor();
        let found = if self.delimiter.is_ascii() {
            memchr3(self.delimiter as u8, b'\r', b'\n', rest.as_bytes())
        } else {
            rest.char_indices()
                .find(|&(_, c)| c == self.delimiter || c == '\r' || c == '\n')
                .map(|(idx, _)| idx)
        };
        found.map(|idx| self.cursor + idx)
    }

    /// Move the cursor to byte position `cursor`.
    #[inline]
    pub fn advance_to(&mut self, cursor: usize) {
        debug_assert!(cursor <= self.line.len());
        self.cursor = cursor;
    }

    /// Move the cursor onto the first byte of `token`.
    #[inline]
    pub fn advance_to_token(&mut self, token: &Token<'_>) {
        self.advance_to(token.start());
    }

    /// Move the cursor just past `token`.
    #[inline]
    pub fn advance_past_token(&mut self, token: &Token<'_>) {
        self.advance_to(token.end());
    }

    /// Move the cursor to the end of the buffer.
    #[inline]
    pub fn advance_to_end(&mut self) {
        self.cursor = self.line.len();
    }

    /// Move the cursor past the next line terminator.
    ///
    /// Returns `false`, leaving the cursor untouched, when the rest of the
    /// line may still be arriving: no terminator is present, or the only
    /// terminator is a CR at the very end of the buffer, while more data
    /// may follow. Without more data, a missing terminator moves the cursor
    /// to the end of the buffer.
    pub fn advance_past_line(&mut self) -> bool {
        let bytes = self.line.as_bytes();
        match memchr2(b'\r', b'\n', &bytes[self.cursor..]) {
            None => {
                if self.has_more_data {
                    return false;
                }
                self.cursor = bytes.len();
                true
            }
            Some(idx) => {
                let pos = self.cursor + idx;
                if bytes[pos] == b'\r' {
                    if bytes.get(pos + 1) == Some(&b'\n') {
                        self.cursor = pos + 2;
                    } else if pos + 1 == bytes.len() && self.has_more_data {
                        return false;
                    } else {
                        self.cursor = pos + 1;
                    }
                } else {
                    self.cursor = pos + 1;
                }
                true
            }
        }
    }

    /// Drop the consumed prefix so the cursor returns to zero.
    pub fn truncate_to_cursor(&mut self) {
        self.line = &self.line[self.cursor..];
        self.consumed += self.cursor;
        self.cursor = 0;
    }
}
