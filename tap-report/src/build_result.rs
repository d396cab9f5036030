// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{TestCounts, TestSet};
use serde::{Deserialize, Serialize};

/// All TAP test sets published by a single build.
///
/// A `BuildResult` is constructed once, when the build's publishing step completes, and is not
/// modified afterwards. Counters are recomputed from the test sets on every call to
/// [`stats`](Self::stats); nothing is cached.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BuildResult {
    /// The test sets, in the order they were published.
    #[serde(default)]
    pub test_sets: Vec<TestSet>,
}

impl BuildResult {
    /// Creates a new, empty build result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a test set.
    pub fn add_test_set(&mut self, test_set: TestSet) -> &mut Self {
        self.test_sets.push(test_set);
        self
    }

    /// Adds several test sets.
    pub fn add_test_sets(&mut self, test_sets: impl IntoIterator<Item = TestSet>) -> &mut Self {
        self.test_sets.extend(test_sets);
        self
    }

    /// Returns the test set with the given file name, if any.
    pub fn test_set(&self, file_name: &str) -> Option<&TestSet> {
        self.test_sets
            .iter()
            .find(|test_set| test_set.file_name == file_name)
    }

    /// Returns the element-wise sum of the counters of every test set.
    pub fn stats(&self) -> TestCounts {
        self.test_sets.iter().map(TestSet::counts).sum()
    }
}

impl FromIterator<TestSet> for BuildResult {
    fn from_iter<I: IntoIterator<Item = TestSet>>(iter: I) -> Self {
        Self {
            test_sets: iter.into_iter().collect(),
        }
    }
}
