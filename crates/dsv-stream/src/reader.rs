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

//! Chunk reader for the streaming parser.
//!
//! Frames a byte source into UTF-8 text chunks. A multi-byte character
//! split across two reads is held back and completed by the next read, so
//! every chunk handed to the parser is valid text.

use crate::error::{StreamError, StreamResult};
use std::io::{ErrorKind, Read};
use std::str::Utf8Error;
use tracing::warn;

/// Default read block size (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Reads fixed-size blocks from a byte source and decodes them as UTF-8.
///
/// # Examples
///
/// ```rust
/// use dsv_stream::ChunkReader;
/// use std::io::Cursor;
///
/// // "é" is two bytes; two-byte blocks split it
/// let mut reader = ChunkReader::with_capacity(Cursor::new("aé,b"), 2);
///
/// let mut text = String::new();
/// while let Some(chunk) = reader.read_chunk().unwrap() {
///     text.push_str(&chunk);
/// }
/// assert_eq!(text, "aé,b");
/// ```
#[derive(Debug)]
pub struct ChunkReader<R: Read> {
    reader: R,
    block: Vec<u8>,
    /// Read but not yet decoded bytes.
    pending: Vec<u8>,
    /// Bytes decoded so far.
    offset: usize,
    eof: bool,
    failed: bool,
}

impl<R: Read> ChunkReader<R> {
    /// Create a reader with [`DEFAULT_BUFFER_SIZE`] blocks.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Create a reader with a specific block size (at least one byte).
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            block: vec![0; capacity.max(1)],
            pending: Vec::new(),
            offset: 0,
            eof: false,
            failed: false,
        }
    }

    /// Number of bytes decoded and returned so far.
    #[inline]
    pub fn bytes_decoded(&self) -> usize {
        self.offset
    }

    /// Block size used for each read.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.block.len()
    }

    /// Read the next non-empty text chunk.
    ///
    /// Returns `Ok(None)` once the source is exhausted. After an error the
    /// reader is finished and keeps returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Io`] if the source fails and
    /// [`StreamError::Utf8`] if it contains invalid or truncated UTF-8.
    pub fn read_chunk(&mut self) -> StreamResult<Option<String>> {
        if self.failed {
            return Ok(None);
        }
        let result = self.next_chunk();
        if result.is_err() {
            self.failed = true;
            self.pending.clear();
        }
        result
    }

    fn next_chunk(&mut self) -> StreamResult<Option<String>> {
        loop {
            if let Some(text) = self.decode_pending()? {
                return Ok(Some(text));
            }
            if self.eof {
                return Ok(None);
            }
            let n = loop {
                match self.reader.read(&mut self.block) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            };
            if n == 0 {
                self.eof = true;
            } else {
                self.pending.extend_from_slice(&self.block[..n]);
            }
        }
    }

    /// Split off and return the longest valid prefix of the pending bytes.
    fn decode_pending(&mut self) -> StreamResult<Option<String>> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        let valid = match std::str::from_utf8(&self.pending).map(str::len) {
            Ok(len) => len,
            Err(err) if err.valid_up_to() > 0 => err.valid_up_to(),
            Err(err) if err.error_len().is_some() || self.eof => {
                return Err(self.invalid(err));
            }
            // truncated sequence, wait for the rest
            Err(_) => return Ok(None),
        };

        let rest = self.pending.split_off(valid);
        let bytes = std::mem::replace(&mut self.pending, rest);
        let text = String::from_utf8(bytes).map_err(|e| self.invalid(e.utf8_error()))?;
        self.offset += text.len();
        Ok(Some(text))
    }

    fn invalid(&self, err: Utf8Error) -> StreamError {
        let offset = self.offset + err.valid_up_to();
        let message = match err.error_len() {
            Some(_) => err.to_string(),
            None => "incomplete sequence at end of input".to_string(),
        };
        warn!(offset, %message, "invalid UTF-8 terminates stream");
        StreamError::utf8(offset, message)
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = StreamResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_chunk().transpose()
    }
}
