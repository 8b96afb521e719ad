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

//! CLI command implementations

mod check;
mod count;
mod parse;

pub use check::check;
pub use count::count;
pub use parse::{parse, write_rows};

use crate::cli::InputArgs;
use crate::error::CliError;
use dsv_stream::StreamingParser;
use std::fs::File;
use std::io::{self, Read};
use tracing::debug;

/// Open the input named by `input`, or stdin.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened.
pub fn open_input(input: &InputArgs) -> Result<Box<dyn Read>, CliError> {
    match &input.file {
        Some(path) => {
            let file = File::open(path).map_err(|e| CliError::io_error(path, e))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Build a streaming parser over the input with the resolved options.
///
/// # Errors
///
/// Returns `Err` if the options are invalid or the input cannot be opened.
pub fn row_stream(input: &InputArgs) -> Result<StreamingParser<Box<dyn Read>>, CliError> {
    let config = input.stream_config()?;
    debug!(input = %input.display_name(), options = ?config.options, "opening input");
    let source = open_input(input)?;
    Ok(StreamingParser::with_config(source, config)?)
}
