// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::registry;
use camino_tempfile::Utf8TempDir;
use camino_tempfile_ext::prelude::*;
use color_eyre::eyre::Result;
use indoc::indoc;
use pretty_assertions::assert_eq;
use tap_report::DisplayStatus;
use tapview_runner::{
    compare::{Comparator, CompatibilityStatus, RegressionStatus},
    config::{SubstitutionRule, TapviewConfig},
    history::HistoryWalker,
    job::{Job, JobLookup, JobRegistry},
    trend::{Series, TrendSeries},
};
use test_case::test_case;

fn job<'a>(registry: &'a JobRegistry, name: &str) -> &'a Job {
    registry
        .job(name)
        .unwrap_or_else(|| panic!("{name} is in the registry"))
}

#[test]
fn history_includes_running_builds() {
    let registry = registry();
    let walker = HistoryWalker::new(&registry, 10);

    let entries: Vec<_> = walker
        .history(job(&registry, "app-linux"))
        .iter()
        .map(|entry| (entry.build.get(), entry.result.is_some()))
        .collect();
    assert_eq!(
        entries,
        vec![(5, true), (4, true), (3, true), (2, false), (1, true)]
    );
}

#[test]
fn trend_follows_history() {
    let registry = registry();
    let walker = HistoryWalker::new(&registry, 4);
    let history = walker.history(job(&registry, "app-linux"));
    assert_eq!(history.len(), 4);

    let trend = TrendSeries::from_history(&history);
    let labels: Vec<_> = trend.points().iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["#5", "#4", "#3"], "build 2 has no results");
    assert_eq!(trend.values(Series::Failures), vec![0, 2, 1]);
    assert_eq!(trend.values(Series::Passes), vec![1, 5, 4]);
    assert_eq!(trend.values(Series::Skips), vec![0, 2, 0]);
    assert_eq!(
        trend.tooltip(Series::Failures, 1).as_deref(),
        Some("2 Failure(s)")
    );
}

#[test]
fn test_status_is_matched_by_file_and_description() {
    let registry = registry();
    let walker = HistoryWalker::new(&registry, 10);

    // suite2.tap has a test with the same description, but only suite1.tap counts.
    let statuses: Vec<_> = walker
        .test_status_history(job(&registry, "app-linux"), "suite1.tap", "- Input file opened")
        .into_iter()
        .map(|entry| (entry.build.get(), entry.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (5, None),
            (4, None),
            (3, Some(DisplayStatus::Pass)),
            (2, None),
            (1, None),
        ]
    );

    let statuses: Vec<_> = walker
        .test_status_history(job(&registry, "app-linux"), "suite2.tap", "-hi no space1")
        .into_iter()
        .map(|entry| entry.status)
        .collect();
    assert_eq!(
        statuses,
        vec![None, Some(DisplayStatus::Fail), None, None, None]
    );
}

#[test]
fn matrix_children_share_parent_builds() {
    let registry = registry();
    let walker = HistoryWalker::new(&registry, 2);

    let children: Vec<_> = walker
        .children_histories(job(&registry, "matrix"))
        .into_iter()
        .map(|child| {
            let entries: Vec<_> = child
                .entries
                .iter()
                .map(|entry| (entry.build.get(), entry.result.is_some()))
                .collect();
            (child.title, entries)
        })
        .collect();
    assert_eq!(
        children,
        vec![
            (
                "Matrix build: jdk17".to_owned(),
                vec![(3, true), (2, true)]
            ),
            (
                "Matrix build: jdk21".to_owned(),
                vec![(3, true), (2, false)]
            ),
        ]
    );

    // The parent's own history folds the axes together.
    let history = walker.history(job(&registry, "matrix"));
    let stats: Vec<_> = history
        .iter()
        .map(|entry| entry.result.as_ref().map(|results| results.stats().total()))
        .collect();
    assert_eq!(stats, vec![Some(15), Some(10)]);
}

#[test_case("app-linux", RegressionStatus::Regressed ; "more failures than build 3")]
#[test_case("app-windows", RegressionStatus::NotApplicable ; "single completed build")]
#[test_case("matrix", RegressionStatus::Improved ; "matrix axes are folded")]
#[test_case("matrix/jdk17", RegressionStatus::Improved ; "axis alone")]
#[test_case("matrix/jdk21", RegressionStatus::NotApplicable ; "axis without previous results")]
fn regression(name: &str, expected: RegressionStatus) {
    let registry = registry();
    let comparator = Comparator::new(&registry, &SubstitutionRule::default());
    assert_eq!(comparator.regression(job(&registry, name)), expected);
}

#[test]
fn compatibility_from_repository_config() -> Result<()> {
    let root = Utf8TempDir::new()?;
    root.child(TapviewConfig::CONFIG_PATH).write_str(indoc! {r#"
        [compatibility]
        to-replace = "-linux$"
        new-text = "-windows"
    "#})?;
    let config = TapviewConfig::from_sources(root.path(), None)?;

    let registry = registry();
    let comparator = Comparator::new(&registry, config.substitution_rule());

    let linux = job(&registry, "app-linux");
    assert_eq!(
        comparator.counterpart_job(linux).map(|job| job.name.as_str()),
        Some("app-windows")
    );
    // Build 4 of app-linux against build 1 of app-windows: build 2 of app-windows is running.
    assert_eq!(
        comparator.compatibility(linux),
        CompatibilityStatus::Compatible
    );
    let windows = job(&registry, "app-windows");
    assert_eq!(
        comparator.counterpart_job(windows).map(|job| job.name.as_str()),
        Some("app-windows"),
        "the pattern doesn't match, so the job is its own counterpart"
    );
    assert_eq!(
        comparator.compatibility(windows),
        CompatibilityStatus::Compatible
    );

    Ok(())
}

#[test]
fn compatibility_with_missing_counterpart() {
    let registry = registry();
    let comparator = Comparator::new(&registry, &SubstitutionRule::new("jdk17", "jdk11"));
    assert_eq!(
        comparator.compatibility(job(&registry, "matrix/jdk17")),
        CompatibilityStatus::NotApplicable
    );

    let comparator = Comparator::new(&registry, &SubstitutionRule::new("jdk17", "jdk21"));
    assert_eq!(
        comparator.compatibility(job(&registry, "matrix/jdk17")),
        CompatibilityStatus::Incompatible
    );
}
