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

//! Check command - validate quoting and encoding

use super::row_stream;
use crate::cli::InputArgs;
use crate::error::CliError;
use colored::Colorize;

/// Check that the input parses cleanly.
///
/// # Errors
///
/// Returns `Err` if the options are invalid, the input cannot be read, or
/// the input is malformed.
///
/// # Output
///
/// Prints `✓ <file> (<n> rows)` on success and `✗ <file>` on failure; the
/// error itself is reported by the caller.
pub fn check(input: &InputArgs) -> Result<(), CliError> {
    let name = input.display_name();
    let result = row_stream(input).and_then(|rows| {
        let mut count = 0usize;
        for row in rows {
            row?;
            count += 1;
        }
        Ok(count)
    });

    match result {
        Ok(count) => {
            println!("{} {} ({} rows)", "✓".green().bold(), name, count);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), name);
            Err(e)
        }
    }
}
