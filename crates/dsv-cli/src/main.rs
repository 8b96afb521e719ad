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

//! DSV Command Line Interface

use clap::Parser;
use dsv_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// DSV - delimiter-separated values toolkit
///
/// # Examples
///
/// ```bash
/// # Print rows of a semicolon-separated file as JSON lines
/// dsv parse -d ';' export.csv
///
/// # Count rows coming from a pipe
/// gunzip -c big.tsv.gz | dsv count -d '\t'
///
/// # Validate with options from a file
/// dsv check --config options.json data.csv
/// ```
#[derive(Parser)]
#[command(name = "dsv")]
#[command(author, version, about = "DSV - delimiter-separated values toolkit", long_about = None)]
struct Cli {
    /// Log parsing progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,dsv_cli=debug,dsv_stream=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Initialize logging to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
