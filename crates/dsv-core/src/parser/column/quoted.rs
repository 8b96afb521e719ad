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

//! Quoted fields.
//!
//! A quoted field is read by a small state machine:
//!
//! ```text
//! BeforeQuote --quote--> InsideQuote --closing quote--> AfterQuote --boundary--> done
//!                          |    ^
//!                          +----+ escape + quote (literal quote)
//! ```
//!
//! Inside the quotes, the escape character followed by the quote character
//! produces one literal quote. With the default escape (the quote itself)
//! this is the doubled-quote style `"a""b"`; with a separate escape such as
//! `\` it is `"a\"b"`. Delimiters and line terminators inside the quotes are
//! ordinary content.
//!
//! The closing quote must be followed directly by the delimiter, a line
//! terminator, or the end of input.

use crate::config::TrimMode;
use crate::error::{describe, preview, ParseError};
use crate::lex::Scanner;
use crate::parser::Progress;
use memchr::{memchr, memchr2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    BeforeQuote,
    InsideQuote,
    AfterQuote,
}

/// Parser for a field that starts with the quote character.
#[derive(Debug, Clone, Copy)]
pub struct QuotedColumnParser {
    quote: char,
    escape: char,
    delimiter: char,
    trim: TrimMode,
}

impl QuotedColumnParser {
    /// Create a parser for the given quote, escape and delimiter characters.
    pub fn new(quote: char, escape: char, delimiter: char, trim: TrimMode) -> Self {
        Self {
            quote,
            escape,
            delimiter,
            trim,
        }
    }

    /// The opening and closing quote character.
    #[inline]
    pub fn quote(&self) -> char {
        self.quote
    }

    /// Read one quoted field; the cursor must be on the opening quote.
    ///
    /// On success the cursor is left on the character after the closing
    /// quote. On [`Progress::Incomplete`] or an error the cursor does not
    /// move.
    ///
    /// # Errors
    ///
    /// - [`ParseError::ExpectedOpeningQuote`] if the cursor is not on a quote.
    /// - [`ParseError::MissingClosingQuote`] if the input ends inside the
    ///   quotes and no more data will follow.
    /// - [`ParseError::UnexpectedCharacterAfterQuote`] if anything other than
    ///   a delimiter, terminator, or end of input follows the closing quote.
    pub fn parse(&self, scanner: &mut Scanner<'_>) -> Result<Progress<String>, ParseError> {
        let rest = scanner.line_from_cursor();
        let has_more = scanner.has_more_data();
        let base = scanner.offset();
        let mut value = String::new();
        let mut pos = 0;
        let mut state = QuoteState::BeforeQuote;

        loop {
            let current = rest[pos..].chars().next();
            match state {
                QuoteState::BeforeQuote => match current {
                    Some(c) if c == self.quote => {
                        pos += c.len_utf8();
                        state = QuoteState::InsideQuote;
                    }
                    found => {
                        return Err(ParseError::ExpectedOpeningQuote {
                            expected: self.quote,
                            found: describe(found),
                            offset: base,
                            context: preview(rest),
                        });
                    }
                },
                QuoteState::InsideQuote => {
                    let Some(special) = self.find_special(&rest[pos..]) else {
                        if has_more {
                            return Ok(Progress::Incomplete);
                        }
                        return Err(ParseError::MissingClosingQuote {
                            expected: self.quote,
                            found: describe(None),
                            offset: base,
                            context: preview(rest),
                        });
                    };
                    value.push_str(&rest[pos..pos + special]);
                    pos += special;

                    let c = rest[pos..].chars().next().unwrap_or(self.quote);
                    let after = pos + c.len_utf8();
                    let following = rest[after..].chars().next();
                    if c == self.escape {
                        match following {
                            Some(q) if q == self.quote => {
                                value.push(self.quote);
                                pos = after + q.len_utf8();
                            }
                            None if has_more => return Ok(Progress::Incomplete),
                            _ if c == self.quote => {
                                pos = after;
                                state = QuoteState::AfterQuote;
                            }
                            _ => {
                                value.push(c);
                                pos = after;
                            }
                        }
                    } else {
                        pos = after;
                        state = QuoteState::AfterQuote;
                    }
                }
                QuoteState::AfterQuote => match current {
                    None if has_more => return Ok(Progress::Incomplete),
                    None => break,
                    Some(c) if c == self.delimiter || c == '\r' || c == '\n' => break,
                    Some(c) => {
                        return Err(ParseError::UnexpectedCharacterAfterQuote {
                            found: c,
                            offset: base + pos,
                            context: preview(&rest[pos..]),
                        });
                    }
                },
            }
        }

        scanner.advance_to(scanner.cursor() + pos);
        Ok(Progress::Complete(self.trim.apply(&value).to_string()))
    }

    /// Byte position of the next quote or escape character in `text`.
    fn find_special(&self, text: &str) -> Option<usize> {
        let bytes = text.as_bytes();
        match (self.quote.is_ascii(), self.escape.is_ascii()) {
            (true, true) if self.quote == self.escape => memchr(self.quote as u8, bytes),
            (true, true) => memchr2(self.quote as u8, self.escape as u8, bytes),
            _ => text
                .char_indices()
                .find(|&(_, c)| c == self.quote || c == self.escape)
                .map(|(idx, _)| idx),
        }
    }
}
