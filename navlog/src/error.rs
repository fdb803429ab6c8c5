// SPDX-License-Identifier: Apache-2.0
// Copyright 2025, 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error;
use std::fmt;

use crate::fp::{LegId, PlanId};

pub type Result<T> = std::result::Result<T, Error>;

/// A violation found at the validation boundary.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldError {
    /// Path of the offending field, e.g. `legs[2].tas`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    /// A degenerate or out of range value reached a calculation.
    InvalidInput(String),
    /// The referenced flight plan doesn't exist.
    PlanNotFound(PlanId),
    /// The referenced leg doesn't exist within the flight plan.
    LegNotFound(LegId),
    /// The input was rejected at the validation boundary.
    Validation(Vec<FieldError>),
    /// A string couldn't be parsed into the expected format.
    UnexpectedString,
    /// The value is parsable but can't be right.
    ImplausibleValue,
    /// The plan store failed to read or write.
    Storage(String),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Returns `true` if a plan or leg wasn't found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlanNotFound(_) | Self::LegNotFound(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(reason) => write!(f, "invalid input: {reason}"),
            Self::PlanNotFound(id) => write!(f, "flight plan {id} not found"),
            Self::LegNotFound(id) => write!(f, "leg {id} not found"),
            Self::Validation(errors) => {
                write!(f, "validation failed")?;
                for (i, e) in errors.iter().enumerate() {
                    write!(f, "{} {e}", if i == 0 { ":" } else { ";" })?;
                }
                Ok(())
            }
            Self::UnexpectedString => write!(f, "unexpected string"),
            Self::ImplausibleValue => write!(f, "implausible value"),
            Self::Storage(reason) => write!(f, "plan store failed: {reason}"),
        }
    }
}

impl error::Error for Error {}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite_migration::Error> for Error {
    fn from(e: rusqlite_migration::Error) -> Self {
        Self::Storage(e.to_string())
    }
}
