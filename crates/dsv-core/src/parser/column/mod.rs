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

//! Single-field extraction.
//!
//! [`ColumnParser`] looks at the next non-whitespace character: a quote
//! selects [`QuotedColumnParser`] (leading whitespace is skipped), anything
//! else selects [`NonQuotedColumnParser`] starting at the cursor (leading
//! whitespace is kept unless trimming applies).

mod quoted;
mod unquoted;

pub use quoted::QuotedColumnParser;
pub use unquoted::NonQuotedColumnParser;

use crate::config::ParserOptions;
use crate::error::ParseError;
use crate::lex::Scanner;
use crate::parser::Progress;

/// Dispatches one field to the quoted or unquoted parser.
#[derive(Debug, Clone)]
pub struct ColumnParser {
    quoted: Option<QuotedColumnParser>,
    unquoted: NonQuotedColumnParser,
}

impl ColumnParser {
    /// Build the column parsers for `options`.
    pub fn new(options: &ParserOptions) -> Self {
        let trim = options.trim_mode();
        let quoted = options.quote.map(|quote| {
            let escape = options.escape.unwrap_or(quote);
            QuotedColumnParser::new(quote, escape, options.delimiter, trim)
        });
        Self {
            quoted,
            unquoted: NonQuotedColumnParser::new(trim),
        }
    }

    /// Read one field starting at the cursor.
    ///
    /// # Errors
    ///
    /// Propagates [`ParseError`] from the quoted parser.
    pub fn parse(&self, scanner: &mut Scanner<'_>) -> Result<Progress<String>, ParseError> {
        if let Some(quoted) = &self.quoted {
            if let Some(token) = scanner.next_non_space_token() {
                if token.is_char(quoted.quote()) {
                    scanner.advance_to_token(&token);
                    return quoted.parse(scanner);
                }
            }
        }
        Ok(self.unquoted.parse(scanner))
    }
}
