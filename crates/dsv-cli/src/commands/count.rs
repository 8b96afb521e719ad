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

//! Count command - number of rows in the input

use super::row_stream;
use crate::cli::InputArgs;
use crate::error::CliError;

/// Print the number of rows in the input.
///
/// # Errors
///
/// Returns `Err` if the input cannot be read or parsed.
pub fn count(input: &InputArgs) -> Result<(), CliError> {
    let mut rows = 0usize;
    for row in row_stream(input)? {
        row?;
        rows += 1;
    }
    println!("{}", rows);
    Ok(())
}
