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

//! Error types for the parsing engine.
//!
//! Two failure families exist:
//!
//! - [`ConfigError`] is raised while building a [`Parser`](crate::Parser),
//!   before any input is looked at.
//! - [`ParseError`] is raised for malformed quoting, and only for regions
//!   of the buffer that cannot be completed by more data.
//!
//! Running out of input is never an error. When more data may follow, the
//! engine stops and hands the unresolved tail back as the carry.

use thiserror::Error;

/// Invalid parser configuration.
///
/// # Examples
///
/// ```
/// use dsv_core::{ConfigError, ParserOptions};
///
/// let err = ParserOptions::builder().delimiter("::").build().unwrap_err();
/// assert_eq!(
///     err,
///     ConfigError::NotOneCharacter { option: "delimiter", value: "::".to_string() }
/// );
/// assert!(err.to_string().contains("delimiter option must be one character long"));
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A character option was given as text that is not exactly one character.
    #[error("{option} option must be one character long, got {value:?}")]
    NotOneCharacter {
        /// Name of the option (`delimiter`, `quote`, `escape`, `comment`).
        option: &'static str,
        /// The rejected text.
        value: String,
    },

    /// CR and LF always terminate a row and cannot be reconfigured.
    #[error("{option} option cannot be a line terminator, got {value:?}")]
    LineTerminator {
        /// Name of the option.
        option: &'static str,
        /// The rejected character.
        value: char,
    },

    /// The quote character would be indistinguishable from the delimiter.
    #[error("quote and delimiter options must differ, both are {0:?}")]
    QuoteIsDelimiter(char),

    /// Whitespace before a field is skipped, so a whitespace quote or
    /// comment marker would never be recognised.
    #[error("{option} option cannot be whitespace, got {value:?}")]
    Whitespace {
        /// Name of the option (`quote` or `comment`).
        option: &'static str,
        /// The rejected character.
        value: char,
    },

    /// The comment marker collides with another structural character.
    #[error("comment and {other} options must differ, both are {value:?}")]
    CommentConflict {
        /// Name of the colliding option (`delimiter` or `quote`).
        other: &'static str,
        /// The shared character.
        value: char,
    },
}

/// Malformed quoting in input that can no longer be completed.
///
/// Every variant carries the byte `offset` of the problem inside the buffer
/// handed to the failing [`Parser::parse`](crate::Parser::parse) call, and a
/// short `context` preview of the input found there.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A quoted field reached the end of input without its closing quote.
    #[error("Parse Error: expected closing quote or escape '{expected}', got {found} at offset {offset}: '{context}'")]
    MissingClosingQuote {
        /// The quote character that was expected.
        expected: char,
        /// What was found instead (always the end of input).
        found: String,
        /// Byte offset of the opening quote.
        offset: usize,
        /// Preview of the unterminated field.
        context: String,
    },

    /// A closing quote was followed by something other than a delimiter,
    /// a line terminator, or the end of input.
    #[error("Parse Error: expected delimiter or new line, got '{found}' at offset {offset}: '{context}'")]
    UnexpectedCharacterAfterQuote {
        /// The offending character.
        found: char,
        /// Byte offset of the offending character.
        offset: usize,
        /// Preview starting at the offending character.
        context: String,
    },

    /// A quoted field was requested where no opening quote is present.
    #[error("Parse Error: expected opening quote '{expected}', got {found} at offset {offset}: '{context}'")]
    ExpectedOpeningQuote {
        /// The quote character that was expected.
        expected: char,
        /// What was found instead.
        found: String,
        /// Byte offset where the quote was expected.
        offset: usize,
        /// Preview of the input at that offset.
        context: String,
    },
}

impl ParseError {
    /// Byte offset of the problem inside the buffer of the failing call.
    #[inline]
    pub fn offset(&self) -> usize {
        match self {
            ParseError::MissingClosingQuote { offset, .. }
            | ParseError::UnexpectedCharacterAfterQuote { offset, .. }
            | ParseError::ExpectedOpeningQuote { offset, .. } => *offset,
        }
    }

    /// Short preview of the input where the problem was detected.
    #[inline]
    pub fn context(&self) -> &str {
        match self {
            ParseError::MissingClosingQuote { context, .. }
            | ParseError::UnexpectedCharacterAfterQuote { context, .. }
            | ParseError::ExpectedOpeningQuote { context, .. } => context,
        }
    }
}

/// Any error produced by this crate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DsvError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed input.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for operations that may fail with either error family.
pub type DsvResult<T> = Result<T, DsvError>;

/// Maximum number of characters shown in an error context preview.
pub(crate) const CONTEXT_PREVIEW_CHARS: usize = 10;

/// Render the first few characters of `input` for an error message, with
/// line terminators made visible.
pub(crate) fn preview(input: &str) -> String {
    let mut out = String::new();
    for ch in input.chars().take(CONTEXT_PREVIEW_CHARS) {
        match ch {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Describe an optional character for the `found` part of a message.
pub(crate) fn describe(found: Option<char>) -> String {
    match found {
        Some(ch) => format!("'{}'", ch),
        None => "end of input".to_string(),
    }
}
