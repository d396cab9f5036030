// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{Directive, DisplayStatus, RawStatus};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// A single TAP test point.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// The test number written after `ok` / `not ok`, if any.
    #[serde(default)]
    pub number: Option<u32>,

    /// The description of the test point.
    ///
    /// This is stored verbatim: leading and trailing whitespace is preserved, since it becomes
    /// part of the generated row identifiers.
    pub description: String,

    /// The raw outcome of the test point.
    pub status: RawStatus,

    /// The `# SKIP` or `# TODO` directive, if the line carried one.
    #[serde(default)]
    pub directive: Option<Directive>,

    /// The YAML-ish detail block following the test line, in emission order.
    #[serde(default)]
    pub output: IndexMap<String, String>,
}

impl TestResult {
    /// Creates a new test result with the given status and description.
    pub fn new(status: RawStatus, description: impl Into<String>) -> Self {
        Self {
            number: None,
            description: description.into(),
            status,
            directive: None,
            output: IndexMap::new(),
        }
    }

    /// Sets the test number.
    pub fn set_number(&mut self, number: u32) -> &mut Self {
        self.number = Some(number);
        self
    }

    /// Sets the directive.
    pub fn set_directive(&mut self, directive: Directive) -> &mut Self {
        self.directive = Some(directive);
        self
    }

    /// Adds a key/value pair to the detail block.
    pub fn add_output(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.output.insert(key.into(), value.into());
        self
    }

    /// Returns the status to display for this test, taking the directive into account.
    pub fn display_status(&self) -> DisplayStatus {
        DisplayStatus::resolve(self.status, self.directive.as_ref())
    }

    /// Returns true if this test point carries at least one detail line.
    #[inline]
    pub fn has_detail_block(&self) -> bool {
        !self.output.is_empty()
    }
}

/// The `1..N` plan line of a TAP stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// The first test number, usually 1.
    pub first: u32,

    /// The last test number.
    pub last: u32,
}

impl Plan {
    /// Creates a new plan.
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// Returns the number of tests the plan announces.
    pub fn expected_count(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first) as usize + 1
        }
    }
}

/// One rendered line of a TAP stream, in emission order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TapLine {
    /// A top-level `#` comment that isn't attached to a test.
    Comment {
        /// The comment text, without the leading `#`.
        text: String,
    },

    /// A test point.
    Test(TestResult),

    /// A `Bail out!` line. Parsing continues past it.
    BailOut {
        /// The reason given after `Bail out!`. May be empty.
        reason: String,
    },
}

/// One parsed TAP stream, typically one file.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TestSet {
    /// The name of the file this stream was read from.
    ///
    /// Unique within a build, and used to match test sets across builds.
    pub file_name: String,

    /// The plan line, if one was present.
    #[serde(default)]
    pub plan: Option<Plan>,

    /// The lines of the stream in emission order.
    #[serde(default)]
    pub lines: Vec<TapLine>,
}

impl TestSet {
    /// Creates a new, empty test set.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            plan: None,
            lines: vec![],
        }
    }

    /// Sets the plan.
    pub fn set_plan(&mut self, plan: Plan) -> &mut Self {
        self.plan = Some(plan);
        self
    }

    /// Appends a comment line.
    pub fn add_comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(TapLine::Comment { text: text.into() });
        self
    }

    /// Appends a test point.
    pub fn add_test_result(&mut self, result: TestResult) -> &mut Self {
        self.lines.push(TapLine::Test(result));
        self
    }

    /// Appends several test points.
    pub fn add_test_results(&mut self, results: impl IntoIterator<Item = TestResult>) -> &mut Self {
        for result in results {
            self.add_test_result(result);
        }
        self
    }

    /// Appends a bail-out line.
    pub fn add_bail_out(&mut self, reason: impl Into<String>) -> &mut Self {
        self.lines.push(TapLine::BailOut {
            reason: reason.into(),
        });
        self
    }

    /// Iterates over the comment lines, in order.
    pub fn comments(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().filter_map(|line| match line {
            TapLine::Comment { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Iterates over the test points, in order.
    pub fn test_results(&self) -> impl Iterator<Item = &TestResult> + '_ {
        self.lines.iter().filter_map(|line| match line {
            TapLine::Test(result) => Some(result),
            _ => None,
        })
    }

    /// Iterates over the bail-out reasons, in order.
    pub fn bail_outs(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().filter_map(|line| match line {
            TapLine::BailOut { reason } => Some(reason.as_str()),
            _ => None,
        })
    }

    /// Returns the first test point whose description is exactly `description`.
    pub fn find_test(&self, description: &str) -> Option<&TestResult> {
        self.test_results()
            .find(|result| result.description == description)
    }

    /// Computes the counters for this test set.
    pub fn counts(&self) -> TestCounts {
        let mut counts = TestCounts::default();
        for line in &self.lines {
            match line {
                TapLine::Test(result) => counts.record(result.display_status()),
                TapLine::BailOut { .. } => counts.bail_outs += 1,
                TapLine::Comment { .. } => {}
            }
        }
        counts
    }
}

/// Counters for a test set or a whole build.
///
/// Every test point lands in exactly one of `passed`, `failed` and `skipped`. Bail-outs are
/// counted separately, since they mark an incomplete run rather than a test outcome.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TestCounts {
    /// The number of tests that passed. Includes `todo`.
    pub passed: usize,

    /// The number of tests that failed.
    pub failed: usize,

    /// The number of tests that were skipped.
    pub skipped: usize,

    /// The number of passed tests that carried a `# TODO` directive.
    pub todo: usize,

    /// The number of `Bail out!` lines.
    pub bail_outs: usize,
}

impl TestCounts {
    /// Returns the total number of test points.
    #[inline]
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// Returns true if any test failed.
    #[inline]
    pub fn any_failed(&self) -> bool {
        self.failed > 0
    }

    fn record(&mut self, status: DisplayStatus) {
        match status {
            DisplayStatus::Pass => self.passed += 1,
            DisplayStatus::Fail => self.failed += 1,
            DisplayStatus::Skip => self.skipped += 1,
            DisplayStatus::Todo => {
                self.passed += 1;
                self.todo += 1;
            }
        }
    }
}

impl AddAssign for TestCounts {
    fn add_assign(&mut self, other: Self) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.todo += other.todo;
        self.bail_outs += other.bail_outs;
    }
}

impl std::iter::Sum for TestCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(TestCounts::default(), |mut acc, counts| {
            acc += counts;
            acc
        })
    }
}
