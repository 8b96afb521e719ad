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

//! Lookahead tokens.

/// A borrowed view of one lookahead result inside a scanner buffer.
///
/// `start` and `end` are byte offsets into the scanner's current buffer,
/// with `end` exclusive. A token is recreated on every lookahead and never
/// owns text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

impl<'a> Token<'a> {
    /// Create a token covering `text`, which starts at byte `start`.
    #[inline]
    pub fn new(text: &'a str, start: usize) -> Self {
        Self {
            text,
            start,
            end: start + text.len(),
        }
    }

    /// The token text.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the first byte of the token.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last byte of the token.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// `true` for CR, LF, or CRLF.
    #[inline]
    pub fn is_line_terminator(&self) -> bool {
        matches!(self.text, "\r" | "\n" | "\r\n")
    }

    /// `true` for a lone CR, the only terminator that may still grow.
    #[inline]
    pub fn is_carriage_return(&self) -> bool {
        self.text == "\r"
    }

    /// `true` if the token is exactly the character `ch`.
    #[inline]
    pub fn is_char(&self, ch: char) -> bool {
        let mut chars = self.text.chars();
        chars.next() == Some(ch) && chars.next().is_none()
    }

    /// `true` if the token is exactly the optional character `ch`.
    #[inline]
    pub fn is_opt_char(&self, ch: Option<char>) -> bool {
        ch.map_or(false, |c| self.is_char(c))
    }
}
