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

//! Pull-style streaming parser over any [`Read`] source.

use crate::error::StreamResult;
use crate::pipeline::{Record, RowPipeline, Validation};
use crate::push::PushParser;
use crate::reader::{ChunkReader, DEFAULT_BUFFER_SIZE};
use dsv_core::{ParserOptions, Row};
use std::collections::VecDeque;
use std::io::Read;
use tracing::debug;

/// Configuration for [`StreamingParser`].
///
/// # Examples
///
/// ```rust
/// use dsv_stream::StreamConfig;
/// use dsv_core::ParserOptions;
///
/// let config = StreamConfig {
///     buffer_size: 8 * 1024,
///     options: ParserOptions::builder().delimiter("\t").build().unwrap(),
/// };
/// assert_eq!(config.options.delimiter, '\t');
/// ```
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Bytes read from the source per chunk.
    ///
    /// Default: 64KB
    pub buffer_size: usize,

    /// Parser options applied to the whole stream.
    pub options: ParserOptions,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            options: ParserOptions::default(),
        }
    }
}

/// Streaming row parser.
///
/// Reads the source in blocks, feeds each decoded block to a
/// [`PushParser`] and yields rows one at a time. Memory use is bounded by
/// the block size plus the longest incomplete row.
///
/// The first error ends the iteration.
///
/// Rows can be rewritten or dropped with [`transform`](Self::transform)
/// and checked with [`validate`](Self::validate). Iterating the parser
/// yields accepted rows only; [`records`](Self::records) also reports the
/// rejected ones.
///
/// # Examples
///
/// ```rust
/// use dsv_stream::StreamingParser;
/// use std::io::Cursor;
///
/// let input = "name,city\n\"Doe, Jane\",Amsterdam\n";
/// let rows: Vec<_> = StreamingParser::new(Cursor::new(input))
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(rows[1], vec!["Doe, Jane", "Amsterdam"]);
/// ```
///
/// With hooks:
///
/// ```rust
/// use dsv_stream::{Record, StreamingParser};
/// use std::io::Cursor;
///
/// let input = "id,qty\n1,3\n2,x\n3,5\n";
/// let mut parser = StreamingParser::new(Cursor::new(input))
///     .unwrap()
///     .transform(|row| (row[0] != "id").then_some(row))
///     .validate(|row| row[1].parse::<u32>().is_ok());
///
/// let records: Vec<Record> = parser.records().map(Result::unwrap).collect();
/// assert_eq!(records.len(), 3);
/// match &records[1] {
///     Record::Invalid(invalid) => {
///         assert_eq!(invalid.row, vec!["2", "x"]);
///         assert_eq!(invalid.row_number, 2);
///     }
///     Record::Row(_) => unreachable!(),
/// }
/// assert_eq!(parser.rows_yielded(), 2);
/// assert_eq!(parser.rows_invalid(), 1);
/// ```
#[derive(Debug)]
pub struct StreamingParser<R: Read> {
    reader: ChunkReader<R>,
    /// `None` once the carry has been flushed.
    parser: Option<PushParser>,
    queued: VecDeque<Row>,
    pipeline: RowPipeline,
    finished: bool,
}

impl<R: Read> StreamingParser<R> {
    /// Create a streaming parser with default options.
    pub fn new(reader: R) -> StreamResult<Self> {
        Self::with_config(reader, StreamConfig::default())
    }

    /// Create a streaming parser with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Config`](crate::StreamError::Config) if the
    /// options are invalid.
    pub fn with_config(reader: R, config: StreamConfig) -> StreamResult<Self> {
        Ok(Self {
            reader: ChunkReader::with_capacity(reader, config.buffer_size),
            parser: Some(PushParser::new(config.options)?),
            queued: VecDeque::new(),
            pipeline: RowPipeline::default(),
            finished: false,
        })
    }

    /// Rewrite each parsed row before validation. Returning `None` drops
    /// the row; dropped rows are neither yielded nor counted.
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: FnMut(Row) -> Option<Row> + Send + 'static,
    {
        self.pipeline.set_transform(Box::new(transform));
        self
    }

    /// Check each transformed row. The validator may return `bool`,
    /// `Result<(), String>` or a [`Validation`].
    ///
    /// Rejected rows do not end the stream. They are skipped by the
    /// iterator and reported by [`records`](Self::records).
    pub fn validate<F, V>(mut self, mut validator: F) -> Self
    where
        F: FnMut(&Row) -> V + Send + 'static,
        V: Into<Validation>,
    {
        self.pipeline
            .set_validator(Box::new(move |row: &Row| validator(row).into()));
        self
    }

    /// Accepted rows yielded so far.
    #[inline]
    pub fn rows_yielded(&self) -> usize {
        self.pipeline.accepted()
    }

    /// Rows rejected by the validator so far.
    #[inline]
    pub fn rows_invalid(&self) -> usize {
        self.pipeline.rejected()
    }

    /// Next accepted or rejected row.
    ///
    /// Returns `None` at end of input and after the first error.
    pub fn next_record(&mut self) -> Option<StreamResult<Record>> {
        loop {
            if let Some(row) = self.queued.pop_front() {
                match self.pipeline.apply(row) {
                    Some(record) => return Some(Ok(record)),
                    None => continue,
                }
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.fill() {
                self.finished = true;
                self.parser = None;
                self.queued.clear();
                return Some(Err(e));
            }
        }
    }

    /// Iterate over accepted and rejected rows alike.
    pub fn records(&mut self) -> impl Iterator<Item = StreamResult<Record>> + '_ {
        std::iter::from_fn(move || self.next_record())
    }

    /// Pull one chunk through the parser, flushing the carry at end of input.
    fn fill(&mut self) -> StreamResult<()> {
        match self.reader.read_chunk()? {
            Some(chunk) => {
                if let Some(parser) = self.parser.as_mut() {
                    self.queued.extend(parser.push(&chunk)?);
                }
            }
            None => {
                self.finished = true;
                if let Some(parser) = self.parser.take() {
                    let emitted = parser.rows_emitted();
                    let last = parser.finish()?;
                    debug!(
                        bytes = self.reader.bytes_decoded(),
                        rows = emitted + last.len(),
                        "stream exhausted"
                    );
                    self.queued.extend(last);
                }
            }
        }
        Ok(())
    }
}

impl<R: Read> Iterator for StreamingParser<R> {
    type Item = StreamResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.next_record()? {
                Ok(Record::Row(row)) => return Some(Ok(row)),
                Ok(Record::Invalid(_)) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Read every row from `reader`.
///
/// # Errors
///
/// Returns the first configuration, I/O, encoding or parse error.
///
/// # Examples
///
/// ```rust
/// use dsv_stream::parse_reader;
/// use dsv_core::ParserOptions;
///
/// let options = ParserOptions::builder().delimiter(";").build().unwrap();
/// let rows = parse_reader("a;b\nc;d\n".as_bytes(), options).unwrap();
/// assert_eq!(rows.len(), 2);
/// ```
pub fn parse_reader<R: Read>(reader: R, options: ParserOptions) -> StreamResult<Vec<Row>> {
    let config = StreamConfig {
        options,
        ..StreamConfig::default()
    };
    StreamingParser::with_config(reader, config)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StreamError;
    use std::io::Cursor;

    fn small(options: ParserOptions) -> StreamConfig {
        StreamConfig {
            buffer_size: 3,
            options,
        }
    }

    // ==================== Configuration tests ====================

    #[test]
    fn test_default_config() {
        let config = StreamConfig::default();
        assert_eq!(config.buffer_size, 64 * 1024);
        assert_eq!(config.options, ParserOptions::default());
    }

    #[test]
    fn test_invalid_options() {
        let config = StreamConfig {
            options: ParserOptions {
                comment: Some('\r'),
                ..ParserOptions::default()
            },
            ..StreamConfig::default()
        };
        let result = StreamingParser::with_config(Cursor::new(""), config);
        assert!(matches!(result, Err(StreamError::Config(_))));
    }

    // ==================== Iteration tests ====================

    #[test]
    fn test_empty_input() {
        let mut parser = StreamingParser::new(Cursor::new("")).unwrap();
        assert!(parser.next().is_none());
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_rows_across_blocks() {
        let input = "a,\"b\r\nb\"\r\nc,d";
        let parser =
            StreamingParser::with_config(Cursor::new(input), small(ParserOptions::default()))
                .unwrap();
        let rows: Vec<Row> = parser.map(Result::unwrap).collect();
        assert_eq!(rows, vec![vec!["a", "b\r\nb"], vec!["c", "d"]]);
    }

    #[test]
    fn test_rows_yielded() {
        let mut parser = StreamingParser::new(Cursor::new("1\n2\n3\n")).unwrap();
        parser.next();
        parser.next();
        assert_eq!(parser.rows_yielded(), 2);
        assert!(parser.next().is_some());
        assert!(parser.next().is_none());
        assert_eq!(parser.rows_yielded(), 3);
    }

    // ==================== Hook tests ====================

    #[test]
    fn test_transform_drops_rows_without_counting_them() {
        let mut parser = StreamingParser::new(Cursor::new("# note\na,b\n# note\nc,d\n"))
            .unwrap()
            .transform(|row| (!row[0].starts_with('#')).then_some(row));
        assert_eq!(parser.next().unwrap().unwrap(), vec!["a", "b"]);
        assert_eq!(parser.next().unwrap().unwrap(), vec!["c", "d"]);
        assert!(parser.next().is_none());
        assert_eq!(parser.rows_yielded(), 2);
        assert_eq!(parser.rows_invalid(), 0);
    }

    #[test]
    fn test_iterator_skips_invalid_rows() {
        let parser = StreamingParser::with_config(
            Cursor::new("1,2\n3\n4,5\n"),
            small(ParserOptions::default()),
        )
        .unwrap()
        .validate(|row| row.len() == 2);
        let rows: Vec<Row> = parser.map(Result::unwrap).collect();
        assert_eq!(rows, vec![vec!["1", "2"], vec!["4", "5"]]);
    }

    #[test]
    fn test_records_report_invalid_rows() {
        let mut parser = StreamingParser::new(Cursor::new("a,1\nb,\nc,3\n"))
            .unwrap()
            .validate(|row: &Row| {
                if row[1].is_empty() {
                    Validation::invalid("missing value")
                } else {
                    Validation::Valid
                }
            });
        let records: Vec<Record> = parser.records().map(Result::unwrap).collect();
        assert_eq!(
            records[1],
            Record::Invalid(crate::InvalidRow {
                row: vec!["b".to_string(), String::new()],
                row_number: 2,
                reason: Some("missing value".to_string()),
            })
        );
        assert_eq!(records[2], Record::Row(vec!["c".to_string(), "3".to_string()]));
        assert_eq!(parser.rows_yielded(), 2);
        assert_eq!(parser.rows_invalid(), 1);
    }

    #[test]
    fn test_records_stop_after_error() {
        let mut parser = StreamingParser::with_config(
            Cursor::new("ok\n\"bad\"x\n"),
            small(ParserOptions::default()),
        )
        .unwrap()
        .validate(|_: &Row| false);
        let mut records = parser.records();
        assert!(matches!(records.next(), Some(Ok(Record::Invalid(_)))));
        assert!(matches!(records.next(), Some(Err(StreamError::Parse { .. }))));
        assert!(records.next().is_none());
    }

    // ==================== Error tests ====================

    #[test]
    fn test_parse_error_ends_iteration() {
        let input = "ok,1\n\"bad\"x,2\nnever,3\n";
        let mut parser =
            StreamingParser::with_config(Cursor::new(input), small(ParserOptions::default()))
                .unwrap();
        assert_eq!(parser.next().unwrap().unwrap(), vec!["ok", "1"]);
        let err = parser.next().unwrap().unwrap_err();
        assert_eq!(err.row(), Some(1));
        assert_eq!(err.offset(), Some(10));
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_utf8_error_ends_iteration() {
        let bytes = b"a,b\n\xFF,c\n".to_vec();
        let mut parser = StreamingParser::new(Cursor::new(bytes)).unwrap();
        assert_eq!(parser.next().unwrap().unwrap(), vec!["a", "b"]);
        assert!(matches!(
            parser.next(),
            Some(Err(StreamError::Utf8 { offset: 4, .. }))
        ));
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_parse_reader() {
        let options = ParserOptions {
            delimiter: '|',
            ..ParserOptions::default()
        };
        let rows = parse_reader(Cursor::new("x|y\n"), options).unwrap();
        assert_eq!(rows, vec![vec!["x", "y"]]);
    }
}
