// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Jobs, their build chains, and the lookup used to resolve jobs by name.
//!
//! All of this is supplied by the host: tapview never creates builds or records results itself.
//! [`JobRegistry`] is a plain in-memory [`JobLookup`] that can be read from a JSON export.

use crate::errors::RegistryReadError;
use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tap_report::{BuildResult, TestCounts, TestSet};
use tracing::debug;

/// The number of a build within its job.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildNumber(u32);

impl BuildNumber {
    /// Creates a new build number.
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the number as an integer.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BuildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A single build of a job.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BuildRecord {
    /// The build number.
    pub number: BuildNumber,

    /// Whether the build has finished running.
    #[serde(default = "default_completed")]
    pub completed: bool,

    /// The TAP results the build published, if any.
    #[serde(default)]
    pub result: Option<BuildResult>,
}

fn default_completed() -> bool {
    true
}

impl BuildRecord {
    /// Creates a completed build that didn't publish any results.
    pub fn new(number: u32) -> Self {
        Self {
            number: BuildNumber::new(number),
            completed: true,
            result: None,
        }
    }

    /// Creates a completed build with the given results.
    pub fn with_result(number: u32, result: BuildResult) -> Self {
        Self {
            result: Some(result),
            ..Self::new(number)
        }
    }

    /// Sets whether the build has completed.
    pub fn set_completed(&mut self, completed: bool) -> &mut Self {
        self.completed = completed;
        self
    }

    /// Sets the published results.
    pub fn set_result(&mut self, result: BuildResult) -> &mut Self {
        self.result = Some(result);
        self
    }
}

/// The builds of a job, newest first.
///
/// Build numbers are strictly decreasing along the chain: records are sorted on construction,
/// and if two records share a number only the first one is kept.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<BuildRecord>", into = "Vec<BuildRecord>")]
pub struct BuildChain {
    builds: Vec<BuildRecord>,
}

impl BuildChain {
    /// Creates a new chain from records in any order.
    pub fn new(records: impl IntoIterator<Item = BuildRecord>) -> Self {
        let mut builds: Vec<_> = records.into_iter().collect();
        // Stable sort, so the first record with a given number wins the dedup.
        builds.sort_by(|a, b| b.number.cmp(&a.number));
        builds.dedup_by_key(|record| record.number);
        Self { builds }
    }

    /// Iterates over the builds, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &BuildRecord> + '_ {
        self.builds.iter()
    }

    /// Returns the number of builds.
    pub fn len(&self) -> usize {
        self.builds.len()
    }

    /// Returns true if the job has never been built.
    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    /// Returns the newest build, completed or not.
    pub fn last_build(&self) -> Option<&BuildRecord> {
        self.builds.first()
    }

    /// Returns the newest completed build.
    pub fn last_completed(&self) -> Option<&BuildRecord> {
        self.builds.iter().find(|record| record.completed)
    }

    /// Returns the newest completed build older than `number`.
    pub fn previous_completed(&self, number: BuildNumber) -> Option<&BuildRecord> {
        self.builds
            .iter()
            .find(|record| record.number < number && record.completed)
    }

    /// Returns the build with the given number.
    pub fn build(&self, number: BuildNumber) -> Option<&BuildRecord> {
        self.builds
            .binary_search_by(|record| number.cmp(&record.number))
            .ok()
            .map(|index| &self.builds[index])
    }
}

impl From<Vec<BuildRecord>> for BuildChain {
    fn from(records: Vec<BuildRecord>) -> Self {
        Self::new(records)
    }
}

impl From<BuildChain> for Vec<BuildRecord> {
    fn from(chain: BuildChain) -> Self {
        chain.builds
    }
}

/// What kind of project a job is.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    /// An ordinary job.
    #[default]
    Simple,

    /// A matrix job, which fans each build out to one build per axis.
    MatrixParent {
        /// The names of the axis jobs, in display order.
        axes: Vec<String>,
    },

    /// One axis of a matrix job.
    MatrixAxis {
        /// The name of the matrix job.
        parent: String,
    },
}

/// A job and its builds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// The full name of the job, unique within a registry.
    pub name: String,

    /// The name shown to users, if different from `name`.
    #[serde(default)]
    pub display_name: Option<String>,

    /// The kind of project.
    #[serde(default)]
    pub kind: ProjectKind,

    /// The builds of the job.
    #[serde(default)]
    pub builds: BuildChain,
}

impl Job {
    /// Creates a new simple job without builds.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            kind: ProjectKind::Simple,
            builds: BuildChain::default(),
        }
    }

    /// Sets the display name.
    pub fn set_display_name(&mut self, display_name: impl Into<String>) -> &mut Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Sets the project kind.
    pub fn set_kind(&mut self, kind: ProjectKind) -> &mut Self {
        self.kind = kind;
        self
    }

    /// Sets the builds.
    pub fn set_builds(&mut self, builds: impl IntoIterator<Item = BuildRecord>) -> &mut Self {
        self.builds = BuildChain::new(builds);
        self
    }

    /// Returns the name shown to users.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// The results of one build, resolved for its kind of project.
///
/// A matrix build has no results of its own. Its results are those of the axis builds with the
/// same number, each kept separately.
#[derive(Clone, Debug)]
pub enum BuildResults<'a> {
    /// The results of a simple job or of a single axis.
    Single(&'a BuildResult),

    /// The results of every axis build that published some, in axis order.
    Matrix(Vec<AxisResult<'a>>),
}

/// The results of one axis of a matrix build.
#[derive(Copy, Clone, Debug)]
pub struct AxisResult<'a> {
    /// The name of the axis job.
    pub axis: &'a str,

    /// The results of the axis build.
    pub result: &'a BuildResult,
}

impl<'a> BuildResults<'a> {
    /// Returns the counters of the build, folded over every axis for a matrix build.
    pub fn stats(&self) -> TestCounts {
        match self {
            BuildResults::Single(result) => result.stats(),
            BuildResults::Matrix(axes) => axes.iter().map(|axis| axis.result.stats()).sum(),
        }
    }

    /// Iterates over every test set, along with the axis that published it.
    pub fn test_sets(&self) -> Box<dyn Iterator<Item = (Option<&'a str>, &'a TestSet)> + '_> {
        match self {
            BuildResults::Single(result) => {
                let result: &'a BuildResult = *result;
                Box::new(result.test_sets.iter().map(|test_set| (None, test_set)))
            }
            BuildResults::Matrix(axes) => Box::new(axes.iter().flat_map(|axis| {
                axis.result
                    .test_sets
                    .iter()
                    .map(move |test_set| (Some(axis.axis), test_set))
            })),
        }
    }
}

/// Resolves jobs by their full name.
///
/// Lookups are exact and case-sensitive.
pub trait JobLookup {
    /// Returns the job with the given name, if it exists.
    fn job(&self, name: &str) -> Option<&Job>;

    /// Returns the results of build `number` of `job`.
    ///
    /// For a matrix job, the results of the axis builds with that number are collected. Returns
    /// `None` if no results were published.
    fn build_results<'a>(&'a self, job: &'a Job, number: BuildNumber) -> Option<BuildResults<'a>> {
        match &job.kind {
            ProjectKind::Simple | ProjectKind::MatrixAxis { .. } => job
                .builds
                .build(number)
                .and_then(|record| record.result.as_ref())
                .map(BuildResults::Single),
            ProjectKind::MatrixParent { axes } => {
                let axes: Vec<_> = axes
                    .iter()
                    .filter_map(|axis| {
                        let Some(axis_job) = self.job(axis) else {
                            debug!("axis {axis} of {} not found", job.name);
                            return None;
                        };
                        let result = axis_job.builds.build(number)?.result.as_ref()?;
                        Some(AxisResult {
                            axis: &axis_job.name,
                            result,
                        })
                    })
                    .collect();
                (!axes.is_empty()).then_some(BuildResults::Matrix(axes))
            }
        }
    }
}

/// An in-memory set of jobs.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "RegistryRepr", into = "RegistryRepr")]
pub struct JobRegistry {
    jobs: IndexMap<String, Job>,
}

impl JobRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job, replacing any job with the same name.
    pub fn add_job(&mut self, job: Job) -> &mut Self {
        self.jobs.insert(job.name.clone(), job);
        self
    }

    /// Iterates over the jobs, in insertion order.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> + '_ {
        self.jobs.values()
    }

    /// Reads a registry from a JSON export.
    pub fn from_json_path(path: &Utf8Path) -> Result<Self, RegistryReadError> {
        let contents = std::fs::read_to_string(path).map_err(|error| RegistryReadError::Read {
            path: path.to_owned(),
            error,
        })?;
        serde_json::from_str(&contents).map_err(|error| RegistryReadError::Parse {
            path: path.to_owned(),
            error,
        })
    }
}

impl JobLookup for JobRegistry {
    fn job(&self, name: &str) -> Option<&Job> {
        self.jobs.get(name)
    }
}

impl FromIterator<Job> for JobRegistry {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        let mut registry = Self::new();
        for job in iter {
            registry.add_job(job);
        }
        registry
    }
}

#[derive(Serialize, Deserialize)]
struct RegistryRepr {
    jobs: Vec<Job>,
}

impl From<RegistryRepr> for JobRegistry {
    fn from(repr: RegistryRepr) -> Self {
        repr.jobs.into_iter().collect()
    }
}

impl From<JobRegistry> for RegistryRepr {
    fn from(registry: JobRegistry) -> Self {
        Self {
            jobs: registry.jobs.into_values().collect(),
        }
    }
}
