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

//! Per-row transform and validation applied to parsed rows.
//!
//! A transform may rewrite a row or drop it by returning `None`. A
//! validator then accepts or rejects the transformed row. Rejected rows are
//! reported as [`InvalidRow`] values instead of stream errors, so the stream
//! carries on after them.

use dsv_core::Row;
use std::fmt;
use tracing::debug;

type TransformFn = Box<dyn FnMut(Row) -> Option<Row> + Send>;
type ValidatorFn = Box<dyn FnMut(&Row) -> Validation + Send>;

/// Verdict returned by a row validator.
///
/// `bool` converts into a verdict without a reason, `Result<(), String>`
/// into one carrying the error text.
///
/// # Examples
///
/// ```rust
/// use dsv_stream::Validation;
///
/// assert_eq!(Validation::from(true), Validation::Valid);
/// assert_eq!(Validation::from(false), Validation::Invalid(None));
/// assert_eq!(
///     Validation::from(Err::<(), _>("too short".to_string())),
///     Validation::invalid("too short")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The row is accepted.
    Valid,
    /// The row is rejected, with an optional reason.
    Invalid(Option<String>),
}

impl Validation {
    /// A rejection with a reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Validation::Invalid(Some(reason.into()))
    }

    /// `true` for [`Validation::Valid`].
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

impl From<bool> for Validation {
    fn from(valid: bool) -> Self {
        if valid {
            Validation::Valid
        } else {
            Validation::Invalid(None)
        }
    }
}

impl From<Result<(), String>> for Validation {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Validation::Valid,
            Err(reason) => Validation::Invalid(Some(reason)),
        }
    }
}

/// A row rejected by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRow {
    /// The row after the transform.
    pub row: Row,
    /// 1-based number the row would have had among accepted rows.
    pub row_number: usize,
    /// Reason given by the validator, if any.
    pub reason: Option<String>,
}

/// One item of [`StreamingParser::records`](crate::StreamingParser::records).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// An accepted row.
    Row(Row),
    /// A row the validator rejected.
    Invalid(InvalidRow),
}

impl Record {
    /// The accepted row, or `None` for an invalid one.
    pub fn into_row(self) -> Option<Row> {
        match self {
            Record::Row(row) => Some(row),
            Record::Invalid(_) => None,
        }
    }
}

/// Transform and validator hooks plus their counters.
#[derive(Default)]
pub(crate) struct RowPipeline {
    transform: Option<TransformFn>,
    validator: Option<ValidatorFn>,
    accepted: usize,
    rejected: usize,
}

impl RowPipeline {
    pub(crate) fn set_transform(&mut self, transform: TransformFn) {
        self.transform = Some(transform);
    }

    pub(crate) fn set_validator(&mut self, validator: ValidatorFn) {
        self.validator = Some(validator);
    }

    /// Rows accepted so far.
    #[inline]
    pub(crate) fn accepted(&self) -> usize {
        self.accepted
    }

    /// Rows rejected by the validator so far.
    #[inline]
    pub(crate) fn rejected(&self) -> usize {
        self.rejected
    }

    /// Run one parsed row through the hooks. `None` means the transform
    /// dropped the row.
    pub(crate) fn apply(&mut self, row: Row) -> Option<Record> {
        let row = match self.transform.as_mut() {
            Some(transform) => transform(row)?,
            None => row,
        };
        let verdict = match self.validator.as_mut() {
            Some(validator) => validator(&row),
            None => Validation::Valid,
        };
        match verdict {
            Validation::Valid => {
                self.accepted += 1;
                Some(Record::Row(row))
            }
            Validation::Invalid(reason) => {
                self.rejected += 1;
                let row_number = self.accepted + 1;
                debug!(row_number, reason = reason.as_deref(), "row rejected by validator");
                Some(Record::Invalid(InvalidRow {
                    row,
                    row_number,
                    reason,
                }))
            }
        }
    }
}

impl fmt::Debug for RowPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowPipeline")
            .field("transform", &self.transform.is_some())
            .field("validator", &self.validator.is_some())
            .field("accepted", &self.accepted)
            .field("rejected", &self.rejected)
            .finish()
    }
}
