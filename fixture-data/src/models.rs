// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data models for fixture information.

use crate::reader::read_test_set;
use tap_report::{TestCounts, TestSet};

/// A TAP stream along with what tapview is expected to make of it.
#[derive(Copy, Clone, Debug)]
pub struct StreamFixture {
    /// The file name the stream is published under.
    pub file_name: &'static str,

    /// The raw TAP text.
    pub text: &'static str,

    /// The expected counters.
    pub expected: ExpectedCounts,

    /// The expected row tags of the rendered table, header first.
    pub row_tags: &'static [&'static str],
}

impl StreamFixture {
    /// Reads the stream into a test set.
    pub fn test_set(&self) -> TestSet {
        read_test_set(self.file_name, self.text)
    }

    /// Reads the stream into a test set published under a different file name.
    pub fn test_set_named(&self, file_name: &str) -> TestSet {
        read_test_set(file_name, self.text)
    }
}

/// Expected counters for a fixture.
///
/// This mirrors [`TestCounts`] so fixtures can be written as constants.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ExpectedCounts {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub todo: usize,
    pub bail_outs: usize,
}

impl ExpectedCounts {
    /// Returns the expected total number of test points.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

impl PartialEq<TestCounts> for ExpectedCounts {
    fn eq(&self, counts: &TestCounts) -> bool {
        self.passed == counts.passed
            && self.failed == counts.failed
            && self.skipped == counts.skipped
            && self.todo == counts.todo
            && self.bail_outs == counts.bail_outs
    }
}
