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

//! Push-style parsing: the caller feeds text chunks as they arrive.

use crate::error::{StreamError, StreamResult};
use dsv_core::{ConfigError, ParsedChunk, Parser, ParserOptions, Row, BOM};
use tracing::{debug, trace, warn};

/// Owns a [`Parser`] and the carry between chunks.
///
/// # Examples
///
/// ```rust
/// use dsv_stream::PushParser;
/// use dsv_core::ParserOptions;
///
/// let mut parser = PushParser::new(ParserOptions::default()).unwrap();
///
/// assert!(parser.push("id,na").unwrap().is_empty());
/// assert_eq!(parser.push("me\n1,\"x").unwrap(), vec![vec!["id", "name"]]);
/// assert_eq!(parser.carry(), "1,\"x");
///
/// // a closing quote at the end of a chunk may still be an escape
/// assert!(parser.push("\"").unwrap().is_empty());
/// let last = parser.finish().unwrap();
/// assert_eq!(last, vec![vec!["1", "x"]]);
/// ```
#[derive(Debug, Clone)]
pub struct PushParser {
    parser: Parser,
    carry: String,
    /// Stream bytes before the start of `carry`.
    consumed: usize,
    rows_emitted: usize,
    started: bool,
}

impl PushParser {
    /// Create a push parser.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the options are invalid.
    pub fn new(options: ParserOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            parser: Parser::new(options)?,
            carry: String::new(),
            consumed: 0,
            rows_emitted: 0,
            started: false,
        })
    }

    /// The options in use.
    #[inline]
    pub fn options(&self) -> &ParserOptions {
        self.parser.options()
    }

    /// Rows returned so far by [`push`](Self::push) and
    /// [`finish`](Self::finish).
    #[inline]
    pub fn rows_emitted(&self) -> usize {
        self.rows_emitted
    }

    /// Text held back until more input arrives.
    #[inline]
    pub fn carry(&self) -> &str {
        &self.carry
    }

    /// Stream bytes fully consumed into rows, comments or skipped space.
    #[inline]
    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// Parse the carry followed by `chunk`, keeping any incomplete tail.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Parse`] for malformed quoting. The parser
    /// should not be used after an error.
    pub fn push(&mut self, chunk: &str) -> StreamResult<Vec<Row>> {
        self.carry.push_str(chunk);
        let rows = self.parse_carry(true)?;
        debug!(
            chunk_bytes = chunk.len(),
            rows = rows.len(),
            carry_bytes = self.carry.len(),
            "parsed chunk"
        );
        Ok(rows)
    }

    /// Parse whatever is left as the final input.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Parse`] if the carry holds an unterminated
    /// quoted field or other malformed quoting.
    pub fn finish(mut self) -> StreamResult<Vec<Row>> {
        let carry_bytes = self.carry.len();
        let rows = self.parse_carry(false)?;
        trace!(
            carry_bytes,
            rows = rows.len(),
            total_rows = self.rows_emitted,
            "end of stream"
        );
        Ok(rows)
    }

    fn parse_carry(&mut self, has_more_data: bool) -> StreamResult<Vec<Row>> {
        if !self.started && !self.carry.is_empty() {
            self.started = true;
            if self.carry.starts_with(BOM) {
                trace!("skipping byte order mark");
            }
        }

        let mut buffer = std::mem::take(&mut self.carry);
        let (rows, carry_len) = match self.parser.parse(&buffer, has_more_data) {
            Ok(ParsedChunk { rows, carry }) => (rows, carry.len()),
            Err(source) => {
                let err = StreamError::parse(self.rows_emitted, self.consumed, source);
                warn!(error = %err, "parse error terminates stream");
                return Err(err);
            }
        };

        let consumed = buffer.len() - carry_len;
        buffer.drain(..consumed);
        self.carry = buffer;
        self.consumed += consumed;
        self.rows_emitted += rows.len();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_all(chunks: &[&str]) -> StreamResult<Vec<Row>> {
        let mut parser = PushParser::new(ParserOptions::default()).unwrap();
        let mut rows = Vec::new();
        for chunk in chunks {
            rows.extend(parser.push(chunk)?);
        }
        rows.extend(parser.finish()?);
        Ok(rows)
    }

    // ==================== Construction tests ====================

    #[test]
    fn test_new_rejects_invalid_options() {
        let options = ParserOptions {
            quote: Some(';'),
            delimiter: ';',
            ..ParserOptions::default()
        };
        assert!(PushParser::new(options).is_err());
    }

    #[test]
    fn test_options_accessor() {
        let options = ParserOptions::builder().delimiter("\t").build().unwrap();
        let parser = PushParser::new(options).unwrap();
        assert_eq!(parser.options().delimiter, '\t');
    }

    // ==================== Push tests ====================

    #[test]
    fn test_push_split_field() {
        let rows = push_all(&["ab", "c,d", "ef\n"]).unwrap();
        assert_eq!(rows, vec![vec!["abc", "def"]]);
    }

    #[test]
    fn test_push_split_crlf() {
        let mut parser = PushParser::new(ParserOptions::default()).unwrap();
        assert!(parser.push("a,b\r").unwrap().is_empty());
        assert_eq!(parser.carry(), "a,b\r");
        assert_eq!(parser.push("\nc").unwrap(), vec![vec!["a", "b"]]);
        assert_eq!(parser.carry(), "c");
        assert_eq!(parser.finish().unwrap(), vec![vec!["c"]]);
    }

    #[test]
    fn test_push_split_escaped_quote() {
        let rows = push_all(&["\"say \"", "\"hi\"\"\"\n"]).unwrap();
        assert_eq!(rows, vec![vec!["say \"hi\""]]);
    }

    #[test]
    fn test_push_empty_chunks() {
        let rows = push_all(&["", "a", "", "\n", ""]).unwrap();
        assert_eq!(rows, vec![vec!["a"]]);
    }

    #[test]
    fn test_bom_split_from_text() {
        let rows = push_all(&["\u{FEFF}", "x,y\n"]).unwrap();
        assert_eq!(rows, vec![vec!["x", "y"]]);
    }

    // ==================== Bookkeeping tests ====================

    #[test]
    fn test_rows_emitted_and_bytes_consumed() {
        let mut parser = PushParser::new(ParserOptions::default()).unwrap();
        parser.push("a\nb\nc").unwrap();
        assert_eq!(parser.rows_emitted(), 2);
        assert_eq!(parser.bytes_consumed(), 4);
        assert_eq!(parser.carry(), "c");
    }

    // ==================== Error tests ====================

    #[test]
    fn test_error_offset_is_stream_relative() {
        let mut parser = PushParser::new(ParserOptions::default()).unwrap();
        parser.push("a,b\n").unwrap();
        let err = parser.push("\"c\"x\n").unwrap_err();
        match err {
            StreamError::Parse { row, offset, .. } => {
                assert_eq!(row, 1);
                assert_eq!(offset, 7);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_finish_unterminated_quote() {
        let err = push_all(&["a,\"open"]).unwrap_err();
        assert!(matches!(
            err,
            StreamError::Parse {
                source: dsv_core::ParseError::MissingClosingQuote { .. },
                ..
            }
        ));
    }
}
