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

//! DSV CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **parse**: Print every row as a JSON array (one per line, or `--pretty`)
//! - **count**: Print the number of rows
//! - **check**: Validate quoting and encoding, reporting ✓ or ✗
//!
//! Every command reads a file, or stdin when no file is given, through the
//! streaming parser, so inputs larger than memory are fine.
//!
//! # Options
//!
//! Parser options can be given as flags (`-d ';'`, `--trim`, …) or in a JSON
//! file passed with `--config`:
//!
//! ```json
//! { "delimiter": ";", "comment": "#", "ignoreEmptyRow": true }
//! ```
//!
//! Flags take precedence over values from the file.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use dsv_cli::cli::Commands;
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(subcommand)]
//!     command: Commands,
//! }
//!
//! let cli = Cli::parse_from(["dsv", "count", "data.csv"]);
//! cli.command.execute().unwrap();
//! ```
//!
//! # Error Handling
//!
//! All commands return `Result<(), CliError>`. Errors carry the file path
//! for I/O failures and the stream byte offset for parse failures.

pub mod cli;
pub mod commands;
pub mod error;
