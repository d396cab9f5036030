// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Numeric series for the pass/fail/skip trend graph.
//!
//! Drawing the graph is up to the caller. This module only provides one point per build, the
//! link for each point, and the tooltip text for each cell.

use crate::{history::HistoryEntry, job::BuildNumber};
use serde::Serialize;
use std::fmt;
use tap_report::TestCounts;

/// A series of the trend graph, in stacking order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Series {
    /// Failed tests.
    Failures,

    /// Passed tests.
    Passes,

    /// Skipped tests.
    Skips,
}

impl Series {
    /// Every series, in stacking order.
    pub const ALL: [Series; 3] = [Series::Failures, Series::Passes, Series::Skips];

    /// Returns the legend label of this series.
    pub fn label(self) -> &'static str {
        match self {
            Series::Failures => "Failures",
            Series::Passes => "Passes",
            Series::Skips => "Skips",
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One build on the trend graph.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TrendPoint {
    /// The build number.
    pub build: BuildNumber,

    /// The axis label, `#<number>`.
    pub label: String,

    /// The link to the build's results, relative to the job.
    pub link: String,

    /// The build's counters.
    pub counts: TestCounts,
}

impl TrendPoint {
    fn new(build: BuildNumber, counts: TestCounts) -> Self {
        Self {
            build,
            label: format!("#{build}"),
            link: format!("{build}/tapResults/"),
            counts,
        }
    }

    /// Returns the value of the given series at this point.
    pub fn value(&self, series: Series) -> usize {
        match series {
            Series::Failures => self.counts.failed,
            Series::Passes => self.counts.passed,
            Series::Skips => self.counts.skipped,
        }
    }

    /// Returns the tooltip for the given series at this point.
    pub fn tooltip(&self, series: Series) -> String {
        let value = self.value(series);
        match series {
            Series::Failures => format!("{value} Failure(s)"),
            Series::Passes => format!("{value} Pass"),
            Series::Skips => format!("{value} Skip(s)"),
        }
    }
}

/// The points of a trend graph, newest first.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Builds the series from a history.
    ///
    /// Builds without results are left out rather than plotted as zero.
    pub fn from_history(entries: &[HistoryEntry<'_>]) -> Self {
        let points = entries
            .iter()
            .filter_map(|entry| {
                let results = entry.result.as_ref()?;
                Some(TrendPoint::new(entry.build, results.stats()))
            })
            .collect();
        Self { points }
    }

    /// Returns the points, newest first.
    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// Returns true if no build had results.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the values of a series, newest first.
    pub fn values(&self, series: Series) -> Vec<usize> {
        self.points.iter().map(|point| point.value(series)).collect()
    }

    /// Returns the tooltip of the cell at `column` (0 being the newest build) in `series`.
    pub fn tooltip(&self, series: Series, column: usize) -> Option<String> {
        self.points.get(column).map(|point| point.tooltip(series))
    }
}
