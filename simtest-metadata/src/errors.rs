// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by simtest-metadata.

use thiserror::Error;

/// Error returned while parsing a recorded duration string.
///
/// Durations are recorded as `MM:SS`, or `HH:MM:SS` for durations of an hour
/// or more. Anything else fails to parse. Consumers summing recorded
/// durations are expected to skip unparseable entries rather than abort.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("invalid duration string: {input}")]
pub struct DurationParseError {
    input: String,
}

impl DurationParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the input that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}
