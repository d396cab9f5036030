// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::DisplayStatus;
use thiserror::Error;

/// An error that occurs while parsing a [`DisplayStatus`] from a string.
///
/// Returned by the [`FromStr`](std::str::FromStr) implementation of [`DisplayStatus`].
#[derive(Clone, Debug, Error)]
#[error(
    "unrecognized test status: {input}\n(known values: {})",
    DisplayStatus::variants().join(", "),
)]
pub struct DisplayStatusParseError {
    input: String,
}

impl DisplayStatusParseError {
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
