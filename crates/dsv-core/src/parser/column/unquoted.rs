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

//! Fields taken literally up to the next delimiter or line terminator.

use crate::config::TrimMode;
use crate::lex::Scanner;
use crate::parser::Progress;

/// Parser for a field that does not start with the quote character.
#[derive(Debug, Clone, Copy)]
pub struct NonQuotedColumnParser {
    trim: TrimMode,
}

impl NonQuotedColumnParser {
    /// Create a parser applying `trim` to every value.
    pub fn new(trim: TrimMode) -> Self {
        Self { trim }
    }

    /// Read one field starting exactly at the cursor.
    ///
    /// The delimiter or terminator that ends the field is left for the row
    /// parser. Reaching the end of the buffer while more data may follow
    /// is [`Progress::Incomplete`] and leaves the cursor where it was.
    pub fn parse(&self, scanner: &mut Scanner<'_>) -> Progress<String> {
        let rest = scanner.line_from_cursor();
        let raw = match scanner.find_field_end() {
            Some(end) => &rest[..end - scanner.cursor()],
            None if scanner.has_more_data() => return Progress::Incomplete,
            None => rest,
        };
        scanner.advance_to(scanner.cursor() + raw.len());
        Progress::Complete(self.trim.apply(raw).to_string())
    }
}
