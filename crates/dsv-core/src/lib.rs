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

//! Resumable delimiter-separated text parsing.
//!
//! This crate turns raw text into rows of fields under configurable
//! delimiter, quote, escape, comment and trimming rules. Input may arrive in
//! arbitrary fragments: a chunk may end in the middle of a field, a quoted
//! section, or a CRLF pair. Each call returns the rows it could complete and
//! a carry (the unresolved tail) to prepend to the next chunk.
//!
//! # Features
//!
//! - **Chunk invariant**: splitting the input differently never changes the rows
//! - **Explicit incompleteness**: "need more data" is never confused with
//!   "no rows" or with an error
//! - **Zero-copy lookahead**: tokens are borrowed ranges over the buffer
//! - **No I/O and no logging**: a pure function of `(carry + chunk, has_more_data)`
//!
//! # Quick Start
//!
//! ```
//! use dsv_core::{parse_str, ParserOptions};
//!
//! let rows = parse_str("name,quote\nada,\"said \"\"hi\"\"\"\n", &ParserOptions::default()).unwrap();
//! assert_eq!(rows[1], vec!["ada".to_string(), "said \"hi\"".to_string()]);
//! ```
//!
//! # Chunked Input
//!
//! ```
//! use dsv_core::{Parser, ParserOptions};
//!
//! let mut parser = Parser::new(ParserOptions::default()).unwrap();
//! let mut carry = String::new();
//! let mut rows = Vec::new();
//!
//! for chunk in ["a,\"b", "\nc\",d\r", "\ne,f"] {
//!     let buffer = format!("{carry}{chunk}");
//!     let parsed = parser.parse(&buffer, true).unwrap();
//!     rows.extend(parsed.rows);
//!     carry = parsed.carry.to_string();
//! }
//! rows.extend(parser.parse(&carry, false).unwrap().rows);
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0], vec!["a".to_string(), "b\nc".to_string(), "d".to_string()]);
//! ```
//!
//! # Module Structure
//!
//! - [`config`] - [`ParserOptions`], its builder and [`TrimMode`]
//! - [`error`] - [`ConfigError`], [`ParseError`] and [`DsvError`]
//! - [`lex`] - [`Token`](lex::Token) and [`Scanner`](lex::Scanner)
//! - [`parser`] - [`Parser`], [`RowParser`] and the column parsers

pub mod config;
pub mod error;
pub mod lex;
pub mod parser;

pub use config::{ParserOptions, ParserOptionsBuilder, TrimMode};
pub use error::{ConfigError, DsvError, DsvResult, ParseError};
pub use parser::column::{ColumnParser, NonQuotedColumnParser, QuotedColumnParser};
pub use parser::{is_empty_row, ParsedChunk, Parser, Progress, Row, RowParser, BOM};

/// Parse one complete buffer.
///
/// Equivalent to a fresh [`Parser`] called once with
/// `has_more_data = false`.
///
/// # Errors
///
/// Returns [`DsvError::Config`] for invalid options and
/// [`DsvError::Parse`] for malformed quoting.
///
/// # Examples
///
/// ```
/// use dsv_core::{parse_str, ParserOptions};
///
/// let options = ParserOptions::builder().delimiter("|").build().unwrap();
/// let rows = parse_str("a|b|\n", &options).unwrap();
/// assert_eq!(rows, vec![vec!["a".to_string(), "b".to_string(), String::new()]]);
/// ```
pub fn parse_str(input: &str, options: &ParserOptions) -> DsvResult<Vec<Row>> {
    let mut parser = Parser::new(options.clone())?;
    Ok(parser.parse(input, false)?.rows)
}
