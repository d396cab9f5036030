// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Walking a job's build history.
//!
//! A history is at most `max_builds` entries long and runs newest first. Matrix axes are a special
//! case: they walk their parent's chain, so every axis of a matrix job shows the same build
//! numbers, and look up their own build for each number.

use crate::job::{BuildChain, BuildNumber, BuildResults, Job, JobLookup, ProjectKind};
use tap_report::DisplayStatus;
use tracing::debug;

/// One build in a history.
#[derive(Clone, Debug)]
pub struct HistoryEntry<'a> {
    /// The build number.
    pub build: BuildNumber,

    /// The position of the entry in the history, starting at 0 for the newest build.
    pub position: usize,

    /// The results of the build, or `None` if it didn't publish any.
    pub result: Option<BuildResults<'a>>,
}

/// The status of one test in one build of a history.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TestStatusEntry {
    /// The build number.
    pub build: BuildNumber,

    /// The resolved status of the test, or `None` if the build has no results, the file is
    /// missing or the test isn't in it.
    pub status: Option<DisplayStatus>,
}

/// The history of one axis of a matrix job.
#[derive(Clone, Debug)]
pub struct AxisHistory<'a> {
    /// The axis job.
    pub job: &'a Job,

    /// The title of the history, `"<parent>: <axis>"`.
    pub title: String,

    /// The entries, newest first.
    pub entries: Vec<HistoryEntry<'a>>,
}

/// Walks build histories.
#[derive(Debug)]
pub struct HistoryWalker<'a, L: ?Sized> {
    lookup: &'a L,
    max_builds: usize,
}

impl<'a, L: JobLookup + ?Sized> HistoryWalker<'a, L> {
    /// Creates a new walker returning at most `max_builds` entries per history.
    pub fn new(lookup: &'a L, max_builds: usize) -> Self {
        Self { lookup, max_builds }
    }

    /// Returns the maximum number of entries per history.
    pub fn max_builds(&self) -> usize {
        self.max_builds
    }

    /// Returns the history of a job, newest first.
    pub fn history(&self, job: &'a Job) -> Vec<HistoryEntry<'a>> {
        match &job.kind {
            ProjectKind::MatrixAxis { parent } => match self.lookup.job(parent) {
                Some(parent_job) => self.walk(&parent_job.builds, |number| {
                    self.lookup.build_results(job, number)
                }),
                None => {
                    debug!(
                        "parent {parent} of axis {} not found, walking the axis's own builds",
                        job.name
                    );
                    self.walk(&job.builds, |number| self.lookup.build_results(job, number))
                }
            },
            ProjectKind::Simple | ProjectKind::MatrixParent { .. } => {
                self.walk(&job.builds, |number| self.lookup.build_results(job, number))
            }
        }
    }

    /// Returns the status of one test across the history of a job.
    ///
    /// The test is looked up by file name and then by exact description. If several tests in the
    /// file share the description, the first one is used. For a matrix job, axes are searched in
    /// order.
    pub fn test_status_history(
        &self,
        job: &'a Job,
        file_name: &str,
        description: &str,
    ) -> Vec<TestStatusEntry> {
        self.history(job)
            .into_iter()
            .map(|entry| TestStatusEntry {
                build: entry.build,
                status: entry.result.as_ref().and_then(|results| {
                    results
                        .test_sets()
                        .filter(|(_, test_set)| test_set.file_name == file_name)
                        .find_map(|(_, test_set)| test_set.find_test(description))
                        .map(|result| result.display_status())
                }),
            })
            .collect()
    }

    /// Returns the history of every axis of a matrix job.
    ///
    /// Returns an empty list for jobs that aren't matrix jobs. Axes that can't be found are
    /// skipped.
    pub fn children_histories(&self, job: &'a Job) -> Vec<AxisHistory<'a>> {
        let ProjectKind::MatrixParent { axes } = &job.kind else {
            return Vec::new();
        };

        axes.iter()
            .filter_map(|axis| {
                let Some(axis_job) = self.lookup.job(axis) else {
                    debug!("axis {axis} of {} not found, skipping", job.name);
                    return None;
                };
                Some(AxisHistory {
                    job: axis_job,
                    title: self.title(axis_job),
                    entries: self.walk(&job.builds, |number| {
                        self.lookup.build_results(axis_job, number)
                    }),
                })
            })
            .collect()
    }

    /// Returns the title of a job's history.
    ///
    /// This is the job's display name, prefixed by the parent's display name for a matrix axis.
    pub fn title(&self, job: &Job) -> String {
        if let ProjectKind::MatrixAxis { parent } = &job.kind
            && let Some(parent_job) = self.lookup.job(parent)
        {
            return format!("{}: {}", parent_job.display_name(), job.display_name());
        }
        job.display_name().to_owned()
    }

    // ---
    // Helper methods
    // ---

    fn walk(
        &self,
        chain: &'a BuildChain,
        mut resolve: impl FnMut(BuildNumber) -> Option<BuildResults<'a>>,
    ) -> Vec<HistoryEntry<'a>> {
        if chain.len() > self.max_builds {
            debug!(
                "history truncated to {} of {} builds",
                self.max_builds,
                chain.len()
            );
        }

        chain
            .iter()
            .take(self.max_builds)
            .enumerate()
            .map(|(position, record)| {
                let result = resolve(record.number);
                if result.is_none() {
                    debug!("build {} has no results", record.number);
                }
                HistoryEntry {
                    build: record.number,
                    position,
                    result,
                }
            })
            .collect()
    }
}
