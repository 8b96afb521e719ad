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

//! Error types for the streaming adapter.
//!
//! Every error terminates the stream it came from: once a
//! [`StreamingParser`](crate::StreamingParser) has yielded an error, it
//! yields nothing further.
//!
//! # Error Categories
//!
//! - **I/O Errors**: Problems reading the byte source
//! - **Encoding Errors**: The byte source is not valid UTF-8
//! - **Configuration Errors**: The parser options were rejected
//! - **Parse Errors**: Malformed quoting in the text
//!
//! # Examples
//!
//! ```rust
//! use dsv_stream::{StreamError, StreamingParser};
//! use std::io::Cursor;
//!
//! let parser = StreamingParser::new(Cursor::new("a,b\n\"c\"d\n")).unwrap();
//!
//! for row in parser {
//!     match row {
//!         Ok(row) => println!("{:?}", row),
//!         Err(StreamError::Parse { row, offset, source }) => {
//!             eprintln!("after {} rows, byte {}: {}", row, offset, source);
//!         }
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use dsv_core::{ConfigError, ParseError};
use thiserror::Error;

/// Errors that can occur while streaming rows.
#[derive(Error, Debug)]
pub enum StreamError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 encoding.
    #[error("Invalid UTF-8 at byte {offset}: {message}")]
    Utf8 {
        /// Byte offset of the first invalid byte in the stream.
        offset: usize,
        /// Decoder message.
        message: String,
    },

    /// Rejected parser options.
    #[error("Invalid options: {0}")]
    Config(#[from] ConfigError),

    /// Malformed input.
    #[error("Parse error at byte {offset} after {row} rows: {source}")]
    Parse {
        /// Rows emitted before the chunk that failed.
        row: usize,
        /// Byte offset of the problem in the stream.
        offset: usize,
        /// The engine error, with offsets relative to the failing buffer.
        #[source]
        source: ParseError,
    },
}

impl StreamError {
    /// Create an encoding error.
    #[inline]
    pub fn utf8(offset: usize, message: impl Into<String>) -> Self {
        StreamError::Utf8 {
            offset,
            message: message.into(),
        }
    }

    /// Wrap an engine error raised by a buffer starting at stream byte
    /// `buffer_start`.
    #[inline]
    pub fn parse(row: usize, buffer_start: usize, source: ParseError) -> Self {
        StreamError::Parse {
            row,
            offset: buffer_start + source.offset(),
            source,
        }
    }

    /// Rows emitted before the failure, if this is a parse error.
    #[inline]
    pub fn row(&self) -> Option<usize> {
        match self {
            StreamError::Parse { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// Stream byte offset of the failure, if known.
    #[inline]
    pub fn offset(&self) -> Option<usize> {
        match self {
            StreamError::Utf8 { offset, .. } | StreamError::Parse { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;
