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

//! Parser configuration.
//!
//! [`ParserOptions`] is a plain struct that can be filled in directly, or
//! assembled from text with [`ParserOptionsBuilder`], which checks that every
//! character option is exactly one character long.
//!
//! # Examples
//!
//! ```
//! use dsv_core::{ParserOptions, TrimMode};
//!
//! let options = ParserOptions::builder()
//!     .delimiter("\t")
//!     .comment("#")
//!     .trim(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.delimiter, '\t');
//! assert_eq!(options.escape_char(), Some('"'));
//! assert_eq!(options.trim_mode(), TrimMode::Both);
//! ```

use crate::error::ConfigError;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Default quote character.
pub const DEFAULT_QUOTE: char = '"';

/// Options controlling how text is split into rows and fields.
///
/// Options are fixed for the lifetime of a [`Parser`](crate::Parser).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ParserOptions {
    /// Field separator.
    pub delimiter: char,
    /// Quote character, or `None` to take every field literally.
    pub quote: Option<char>,
    /// Escape character inside quoted fields. `None` means the quote
    /// character itself (doubled-quote style).
    pub escape: Option<char>,
    /// Comment marker recognised at the start of a row.
    pub comment: Option<char>,
    /// Strip whitespace on both sides of every field.
    pub trim: bool,
    /// Strip leading whitespace of every field.
    pub ltrim: bool,
    /// Strip trailing whitespace of every field.
    pub rtrim: bool,
    /// Do not add an empty field for a delimiter that ends a row.
    ///
    /// This is the only effect of the flag. Rows are never checked against
    /// a header or against each other, so rows with differing column
    /// counts are returned as they are.
    pub strict_column_handling: bool,
    /// Drop rows whose fields are all blank.
    pub ignore_empty_row: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            quote: Some(DEFAULT_QUOTE),
            escape: None,
            comment: None,
            trim: false,
            ltrim: false,
            rtrim: false,
            strict_column_handling: false,
            ignore_empty_row: false,
        }
    }
}

impl ParserOptions {
    /// Start building options from text values.
    pub fn builder() -> ParserOptionsBuilder {
        ParserOptionsBuilder::new()
    }

    /// The effective escape character: `escape` if set, otherwise the quote.
    #[inline]
    pub fn escape_char(&self) -> Option<char> {
        self.escape.or(self.quote)
    }

    /// Trimming applied to every field, with priority trim > ltrim > rtrim.
    #[inline]
    pub fn trim_mode(&self) -> TrimMode {
        if self.trim {
            TrimMode::Both
        } else if self.ltrim {
            TrimMode::Left
        } else if self.rtrim {
            TrimMode::Right
        } else {
            TrimMode::None
        }
    }

    /// Check the structural rules a hand-built value may have broken.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::LineTerminator`] if any configured character is CR or LF.
    /// - [`ConfigError::QuoteIsDelimiter`] if quote and delimiter coincide.
    /// - [`ConfigError::Whitespace`] if the quote or comment marker is whitespace.
    /// - [`ConfigError::CommentConflict`] if the comment marker equals the
    ///   delimiter or the quote.
    ///
    /// A whitespace delimiter is allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chars = [
            ("delimiter", Some(self.delimiter)),
            ("quote", self.quote),
            ("escape", self.escape),
            ("comment", self.comment),
        ];
        for (option, value) in chars {
            if let Some(value @ ('\r' | '\n')) = value {
                return Err(ConfigError::LineTerminator { option, value });
            }
        }
        if self.quote == Some(self.delimiter) {
            return Err(ConfigError::QuoteIsDelimiter(self.delimiter));
        }
        for (option, value) in [("quote", self.quote), ("comment", self.comment)] {
            if let Some(value) = value.filter(|c| c.is_whitespace()) {
                return Err(ConfigError::Whitespace { option, value });
            }
        }
        if let Some(comment) = self.comment {
            if comment == self.delimiter {
                return Err(ConfigError::CommentConflict {
                    other: "delimiter",
                    value: comment,
                });
            }
            if Some(comment) == self.quote {
                return Err(ConfigError::CommentConflict {
                    other: "quote",
                    value: comment,
                });
            }
        }
        Ok(())
    }
}

/// Field trimming mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimMode {
    /// Keep fields as they are.
    #[default]
    None,
    /// Strip leading whitespace.
    Left,
    /// Strip trailing whitespace.
    Right,
    /// Strip whitespace on both sides.
    Both,
}

impl TrimMode {
    /// Apply the mode to one field value.
    #[inline]
    pub fn apply(self, value: &str) -> &str {
        match self {
            TrimMode::None => value,
            TrimMode::Left => value.trim_start(),
            TrimMode::Right => value.trim_end(),
            TrimMode::Both => value.trim(),
        }
    }
}

/// Builder for [`ParserOptions`] that accepts character options as text.
///
/// Text values are checked in [`build`](Self::build), so a builder chain
/// never fails half way.
#[derive(Debug, Clone, Default)]
pub struct ParserOptionsBuilder {
    delimiter: Option<String>,
    quote: Option<Option<String>>,
    escape: Option<String>,
    comment: Option<String>,
    trim: bool,
    ltrim: bool,
    rtrim: bool,
    strict_column_handling: bool,
    ignore_empty_row: bool,
}

impl ParserOptionsBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiter (default `,`).
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Set the quote character (default `"`).
    pub fn quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(Some(quote.into()));
        self
    }

    /// Disable quoting; quote characters become ordinary field content.
    pub fn no_quote(mut self) -> Self {
        self.quote = Some(None);
        self
    }

    /// Set the escape character used inside quoted fields.
    pub fn escape(mut self, escape: impl Into<String>) -> Self {
        self.escape = Some(escape.into());
        self
    }

    /// Enable comment lines starting with the given character.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Trim both sides of every field.
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Trim the left side of every field.
    pub fn ltrim(mut self, ltrim: bool) -> Self {
        self.ltrim = ltrim;
        self
    }

    /// Trim the right side of every field.
    pub fn rtrim(mut self, rtrim: bool) -> Self {
        self.rtrim = rtrim;
        self
    }

    /// Suppress the empty field produced by a row-ending delimiter.
    ///
    /// Column counts are not validated.
    pub fn strict_column_handling(mut self, strict: bool) -> Self {
        self.strict_column_handling = strict;
        self
    }

    /// Drop rows whose fields are all blank.
    pub fn ignore_empty_row(mut self, ignore: bool) -> Self {
        self.ignore_empty_row = ignore;
        self
    }

    /// Validate the collected values and produce the options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotOneCharacter`] for any character option that
    /// is not exactly one character, and any error from
    /// [`ParserOptions::validate`].
    pub fn build(self) -> Result<ParserOptions, ConfigError> {
        let defaults = ParserOptions::default();
        let delimiter = match self.delimiter {
            Some(text) => single_char("delimiter", &text)?,
            None => defaults.delimiter,
        };
        let quote = match self.quote {
            Some(Some(text)) => Some(single_char("quote", &text)?),
            Some(None) => None,
            None => defaults.quote,
        };
        let escape = self
            .escape
            .map(|text| single_char("escape", &text))
            .transpose()?;
        let comment = self
            .comment
            .map(|text| single_char("comment", &text))
            .transpose()?;

        let options = ParserOptions {
            delimiter,
            quote,
            escape,
            comment,
            trim: self.trim,
            ltrim: self.ltrim,
            rtrim: self.rtrim,
            strict_column_handling: self.strict_column_handling,
            ignore_empty_row: self.ignore_empty_row,
        };
        options.validate()?;
        Ok(options)
    }
}

impl From<ParserOptions> for ParserOptionsBuilder {
    /// Start a builder from existing options, so later setters override them.
    fn from(options: ParserOptions) -> Self {
        Self {
            delimiter: Some(options.delimiter.to_string()),
            quote: Some(options.quote.map(String::from)),
            escape: options.escape.map(String::from),
            comment: options.comment.map(String::from),
            trim: options.trim,
            ltrim: options.ltrim,
            rtrim: options.rtrim,
            strict_column_handling: options.strict_column_handling,
            ignore_empty_row: options.ignore_empty_row,
        }
    }
}

fn single_char(option: &'static str, text: &str) -> Result<char, ConfigError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(ConfigError::NotOneCharacter {
            option,
            value: text.to_string(),
        }),
    }
}
