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

//! Streaming DSV Parser
//!
//! This crate connects the resumable `dsv-core` engine to real byte
//! sources. Input is read in fixed-size blocks, decoded as UTF-8, and fed
//! to the engine chunk by chunk; the unresolved tail of each chunk is
//! carried into the next. Rows come out one at a time, so files far larger
//! than memory can be processed.
//!
//! # Features
//!
//! - **Memory Efficient**: Bounded by the block size plus the longest incomplete row
//! - **Iterator-based**: [`StreamingParser`] yields `StreamResult<Row>`
//! - **Push-based**: [`PushParser`] accepts text as it arrives (sockets, channels)
//! - **Encoding Safe**: Multi-byte characters split across reads are reassembled
//! - **Stream Offsets**: Errors report the byte offset in the whole stream
//! - **Row Hooks**: Per-row transform and validation, with rejected rows
//!   reported alongside accepted ones
//!
//! # Pull API
//!
//! ```rust,no_run
//! use dsv_stream::{StreamConfig, StreamingParser};
//! use dsv_core::ParserOptions;
//! use std::fs::File;
//!
//! let file = File::open("large-export.tsv").unwrap();
//! let config = StreamConfig {
//!     options: ParserOptions::builder().delimiter("\t").build().unwrap(),
//!     ..StreamConfig::default()
//! };
//!
//! for row in StreamingParser::with_config(file, config).unwrap() {
//!     match row {
//!         Ok(row) => println!("{}", row.join(" | ")),
//!         Err(e) => {
//!             eprintln!("Error: {}", e);
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! # Push API
//!
//! ```rust
//! use dsv_stream::PushParser;
//! use dsv_core::ParserOptions;
//!
//! let mut parser = PushParser::new(ParserOptions::default()).unwrap();
//! let mut rows = Vec::new();
//! for chunk in ["a,b\r", "\nc,", "d"] {
//!     rows.extend(parser.push(chunk).unwrap());
//! }
//! rows.extend(parser.finish().unwrap());
//!
//! assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
//! ```
//!
//! # Logging
//!
//! Progress is reported through `tracing`: one `debug` event per parsed
//! chunk, `trace` events for the byte order mark and end of stream, and a
//! `warn` event when an error terminates the stream. Rows rejected by a
//! validator are logged at `debug`.

mod error;
mod parser;
mod pipeline;
mod push;
mod reader;

pub use error::{StreamError, StreamResult};
pub use parser::{parse_reader, StreamConfig, StreamingParser};
pub use pipeline::{InvalidRow, Record, Validation};
pub use push::PushParser;
pub use reader::{ChunkReader, DEFAULT_BUFFER_SIZE};

/// Re-export core types for convenience.
pub use dsv_core::{ParseError, ParserOptions, Row};
