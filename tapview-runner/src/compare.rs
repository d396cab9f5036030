// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Regression and compatibility detection.
//!
//! Both comparisons use the stats of completed builds. Whenever a build, a result or a counterpart
//! job is missing, the status is [`NotApplicable`](RegressionStatus::NotApplicable) rather than an
//! error.

use crate::{
    config::SubstitutionRule,
    job::{BuildRecord, Job, JobLookup},
};
use regex::Regex;
use serde::Serialize;
use std::{borrow::Cow, fmt};
use tap_report::TestCounts;
use tracing::{debug, warn};

/// How a job's latest completed build compares to the one before it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum RegressionStatus {
    /// Same number of failures and tests.
    #[serde(rename = "STABLE")]
    Stable,

    /// No more failures and no fewer tests.
    #[serde(rename = "IMPROVED")]
    Improved,

    /// Anything else, including a suite that shrank.
    #[serde(rename = "REGRESSED")]
    Regressed,

    /// One of the two builds is missing or has no results.
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl RegressionStatus {
    /// Classifies `now` against `before`.
    ///
    /// A build with fewer failures but also fewer tests is a regression: a shrinking suite is
    /// flagged even if fewer tests failed.
    pub fn classify(now: &TestCounts, before: &TestCounts) -> Self {
        let (failed_now, total_now) = (now.failed, now.total());
        let (failed_before, total_before) = (before.failed, before.total());

        if failed_now == failed_before && total_now == total_before {
            RegressionStatus::Stable
        } else if failed_now <= failed_before && total_now >= total_before {
            RegressionStatus::Improved
        } else {
            RegressionStatus::Regressed
        }
    }

    /// Returns the status string shown in history tables.
    pub fn as_str(self) -> &'static str {
        match self {
            RegressionStatus::Stable => "STABLE",
            RegressionStatus::Improved => "IMPROVED",
            RegressionStatus::Regressed => "REGRESSED",
            RegressionStatus::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for RegressionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a job's latest completed build compares to its counterpart's.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum CompatibilityStatus {
    /// Same number of tests, failures and skips.
    #[serde(rename = "COMPATIBLE")]
    Compatible,

    /// At least one of the counts differs.
    #[serde(rename = "INCOMPATIBLE")]
    Incompatible,

    /// The rule is unset, the counterpart is missing, or either side has no results.
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl CompatibilityStatus {
    /// Classifies two sets of counters.
    pub fn classify(a: &TestCounts, b: &TestCounts) -> Self {
        if a.total() == b.total() && a.failed == b.failed && a.skipped == b.skipped {
            CompatibilityStatus::Compatible
        } else {
            CompatibilityStatus::Incompatible
        }
    }

    /// Returns the status string shown in dashboard columns.
    pub fn as_str(self) -> &'static str {
        match self {
            CompatibilityStatus::Compatible => "COMPATIBLE",
            CompatibilityStatus::Incompatible => "INCOMPATIBLE",
            CompatibilityStatus::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for CompatibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled [`SubstitutionRule`].
#[derive(Clone, Debug)]
pub struct CounterpartRule {
    pattern: Regex,
    new_text: String,
}

impl CounterpartRule {
    /// Compiles a substitution rule.
    ///
    /// Returns `None` if the rule is unset or its pattern isn't a valid regular expression. The
    /// latter is logged, since it's most likely a typo.
    pub fn from_config(rule: &SubstitutionRule) -> Option<Self> {
        if !rule.is_set() {
            debug!("compatibility substitution rule is unset");
            return None;
        }
        match Regex::new(&rule.to_replace) {
            Ok(pattern) => Some(Self {
                pattern,
                new_text: rule.new_text.clone(),
            }),
            Err(error) => {
                warn!(
                    "ignoring invalid compatibility pattern `{}`: {error}",
                    rule.to_replace
                );
                None
            }
        }
    }

    /// Returns the name of the counterpart of the job called `name`.
    ///
    /// Only the first match is replaced. If the pattern doesn't match, the name is returned
    /// unchanged and the job is its own counterpart.
    pub fn counterpart_name<'n>(&self, name: &'n str) -> Cow<'n, str> {
        self.pattern.replacen(name, 1, self.new_text.as_str())
    }
}

/// Compares jobs and builds.
///
/// Jobs are resolved through the lookup passed in at construction.
#[derive(Debug)]
pub struct Comparator<'a, L: ?Sized> {
    lookup: &'a L,
    counterpart_rule: Option<CounterpartRule>,
}

impl<'a, L: JobLookup + ?Sized> Comparator<'a, L> {
    /// Creates a new comparator.
    pub fn new(lookup: &'a L, rule: &SubstitutionRule) -> Self {
        Self {
            lookup,
            counterpart_rule: CounterpartRule::from_config(rule),
        }
    }

    /// Returns the stats of a job's latest completed build, or `None` if it has no results.
    ///
    /// For a matrix job, this folds over the axis builds with the same number.
    pub fn latest_stats(&self, job: &'a Job) -> Option<TestCounts> {
        self.stats_for(job, job.builds.last_completed()?)
    }

    /// Compares a job's latest completed build with the completed build before it.
    pub fn regression(&self, job: &'a Job) -> RegressionStatus {
        let Some(last) = job.builds.last_completed() else {
            return RegressionStatus::NotApplicable;
        };
        let Some(previous) = job.builds.previous_completed(last.number) else {
            debug!("{} has a single completed build", job.name);
            return RegressionStatus::NotApplicable;
        };

        match (self.stats_for(job, last), self.stats_for(job, previous)) {
            (Some(now), Some(before)) => RegressionStatus::classify(&now, &before),
            _ => RegressionStatus::NotApplicable,
        }
    }

    /// Returns the counterpart of a job, if the substitution rule is set and the job exists.
    pub fn counterpart_job(&self, job: &Job) -> Option<&'a Job> {
        let name = self.counterpart_rule.as_ref()?.counterpart_name(&job.name);
        let counterpart = self.lookup.job(&name);
        if counterpart.is_none() {
            debug!("counterpart {name} of {} not found", job.name);
        }
        counterpart
    }

    /// Compares a job's latest completed build with its counterpart's.
    pub fn compatibility(&self, job: &'a Job) -> CompatibilityStatus {
        let Some(counterpart) = self.counterpart_job(job) else {
            return CompatibilityStatus::NotApplicable;
        };

        match (self.latest_stats(job), self.latest_stats(counterpart)) {
            (Some(a), Some(b)) => CompatibilityStatus::classify(&a, &b),
            _ => CompatibilityStatus::NotApplicable,
        }
    }

    fn stats_for(&self, job: &'a Job, record: &BuildRecord) -> Option<TestCounts> {
        self.lookup
            .build_results(job, record.number)
            .map(|results| results.stats())
    }
}
