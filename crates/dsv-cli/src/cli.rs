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

//! CLI command definitions and argument parsing.
//!
//! Every command reads one input (a file, or stdin when omitted) with the
//! same set of parser options. Options come from an optional JSON file
//! (`--config`) and are then overridden by individual flags.

use crate::commands;
use crate::error::CliError;
use clap::{Args, Subcommand};
use dsv_core::{ParserOptions, ParserOptionsBuilder};
use dsv_stream::{StreamConfig, DEFAULT_BUFFER_SIZE};
use std::fs;
use std::path::{Path, PathBuf};

/// DSV commands.
///
/// - **Parse**: Print rows as JSON
/// - **Count**: Print the number of rows
/// - **Check**: Validate quoting and encoding
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse input and print each row as a JSON array
    ///
    /// Rows are printed one per line. With --pretty, all rows are printed
    /// as a single indented JSON array.
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Print one pretty-printed JSON array instead of one row per line
        #[arg(short, long)]
        pretty: bool,
    },

    /// Count the rows in the input
    Count {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Check that the input parses without errors
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the options are invalid, the input cannot be read,
    /// or the input is malformed.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Parse { input, pretty } => commands::parse(&input, pretty),
            Commands::Count { input } => commands::count(&input),
            Commands::Check { input } => commands::check(&input),
        }
    }
}

/// Input source and parser options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file path (reads stdin if omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Bytes read from the input per chunk
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_BUFFER_SIZE)]
    pub buffer_size: usize,
}

impl InputArgs {
    /// Name used for the input in messages.
    pub fn display_name(&self) -> String {
        match &self.file {
            Some(path) => path.display().to_string(),
            None => "<stdin>".to_string(),
        }
    }

    /// Resolve the streaming configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the configuration file cannot be read or the
    /// resulting options are invalid.
    pub fn stream_config(&self) -> Result<StreamConfig, CliError> {
        Ok(StreamConfig {
            buffer_size: self.buffer_size,
            options: self.options.resolve()?,
        })
    }
}

/// Parser option flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Field delimiter (`\t` is accepted for tab)
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Quote character
    #[arg(short, long, value_name = "CHAR", conflicts_with = "no_quote")]
    pub quote: Option<String>,

    /// Disable quoting; quote characters become literal text
    #[arg(long)]
    pub no_quote: bool,

    /// Escape character for the quote inside quoted fields (defaults to the quote)
    #[arg(short, long, value_name = "CHAR")]
    pub escape: Option<String>,

    /// Comment marker at the start of a row
    #[arg(short, long, value_name = "CHAR")]
    pub comment: Option<String>,

    /// Trim whitespace on both sides of every field
    #[arg(long)]
    pub trim: bool,

    /// Trim leading whitespace of every field
    #[arg(long)]
    pub ltrim: bool,

    /// Trim trailing whitespace of every field
    #[arg(long)]
    pub rtrim: bool,

    /// Do not add an empty field for a delimiter at the end of a row
    #[arg(long)]
    pub strict_columns: bool,

    /// Drop rows whose fields are all blank
    #[arg(long)]
    pub ignore_empty: bool,

    /// JSON file with parser options; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl OptionArgs {
    /// Merge the configuration file (if any) with the flags.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the configuration file cannot be read or parsed, or
    /// the merged options are invalid.
    pub fn resolve(&self) -> Result<ParserOptions, CliError> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => ParserOptions::default(),
        };
        let mut builder = ParserOptionsBuilder::from(base.clone());

        if let Some(delimiter) = &self.delimiter {
            builder = builder.delimiter(unescape(delimiter));
        }
        if self.no_quote {
            builder = builder.no_quote();
        } else if let Some(quote) = &self.quote {
            builder = builder.quote(unescape(quote));
        }
        if let Some(escape) = &self.escape {
            builder = builder.escape(unescape(escape));
        }
        if let Some(comment) = &self.comment {
            builder = builder.comment(unescape(comment));
        }

        let options = builder
            .trim(base.trim || self.trim)
            .ltrim(base.ltrim || self.ltrim)
            .rtrim(base.rtrim || self.rtrim)
            .strict_column_handling(base.strict_column_handling || self.strict_columns)
            .ignore_empty_row(base.ignore_empty_row || self.ignore_empty)
            .build()?;
        Ok(options)
    }
}

fn load_config(path: &Path) -> Result<ParserOptions, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?;
    serde_json::from_str(&text).map_err(|e| CliError::json(format!("{}: {}", path.display(), e)))
}

/// Map the two-character text `\t` to a tab.
fn unescape(value: &str) -> &str {
    match value {
        "\\t" => "\t",
        other => other,
    }
}
