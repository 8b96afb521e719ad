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

//! Structured error types for the DSV CLI.
//!
//! All commands return `Result<(), CliError>`; `main` prints the error as
//! `Error: …` on stderr and exits with a failure code.

use dsv_core::ConfigError;
use dsv_stream::StreamError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for DSV CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use dsv_cli::error::CliError;
///
/// fn open(path: &str) -> Result<std::fs::File, CliError> {
///     std::fs::File::open(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug)]
pub enum CliError {
    /// I/O operation failed (file open, stdout write).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Parser options were rejected.
    #[error("Invalid options: {0}")]
    Config(#[from] ConfigError),

    /// Reading or parsing the input failed.
    #[error("{0}")]
    Stream(#[from] StreamError),

    /// JSON serialization or configuration file error.
    #[error("JSON error: {message}")]
    Json {
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::json(source.to_string())
    }
}
