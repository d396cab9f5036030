// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use fixture_data::{models::StreamFixture, streams};
use tap_report::{BuildResult, RawStatus, TestResult, TestSet};
use tapview_runner::job::{BuildRecord, Job, JobRegistry, ProjectKind};

/// Returns a build result made of the given fixture streams.
pub(crate) fn build_result(fixtures: &[&StreamFixture]) -> BuildResult {
    fixtures.iter().map(|fixture| fixture.test_set()).collect()
}

/// Returns a build result with a single test set of `passed` passing and `failed` failing tests.
pub(crate) fn counted_result(passed: usize, failed: usize) -> BuildResult {
    let mut test_set = TestSet::new("counted.tap");
    for index in 0..passed {
        test_set.add_test_result(TestResult::new(RawStatus::Ok, format!("- pass {index}")));
    }
    for index in 0..failed {
        test_set.add_test_result(TestResult::new(RawStatus::NotOk, format!("- fail {index}")));
    }
    [test_set].into_iter().collect()
}

/// A registry with:
///
/// * `app-linux`: builds 1 to 4, with results for 4, 3 and 1.
/// * `app-windows`: builds 1 and 2 (2 still running).
/// * `matrix`, a matrix job with axes `matrix/jdk17` and `matrix/jdk21`.
pub(crate) fn registry() -> JobRegistry {
    let mut linux = Job::new("app-linux");
    let mut running = BuildRecord::with_result(5, counted_result(1, 0));
    running.set_completed(false);
    linux.set_builds([
        running,
        BuildRecord::with_result(4, build_result(&[&streams::INTERACTIVE, &streams::SAMPLE])),
        BuildRecord::with_result(3, build_result(&[&streams::ANCHORS, &streams::SAMPLE])),
        BuildRecord::new(2),
        BuildRecord::with_result(1, build_result(&[&streams::EMPTY])),
    ]);

    let mut windows = Job::new("app-windows");
    let mut windows_running = BuildRecord::new(2);
    windows_running.set_completed(false);
    windows.set_builds([
        windows_running,
        BuildRecord::with_result(1, build_result(&[&streams::INTERACTIVE, &streams::SAMPLE])),
    ]);

    let mut matrix = Job::new("matrix");
    matrix
        .set_display_name("Matrix build")
        .set_kind(ProjectKind::MatrixParent {
            axes: vec!["matrix/jdk17".to_owned(), "matrix/jdk21".to_owned()],
        })
        .set_builds((1..=3).map(BuildRecord::new));

    let mut jdk17 = Job::new("matrix/jdk17");
    jdk17
        .set_display_name("jdk17")
        .set_kind(ProjectKind::MatrixAxis {
            parent: "matrix".to_owned(),
        })
        .set_builds([
            BuildRecord::with_result(3, counted_result(10, 0)),
            BuildRecord::with_result(2, counted_result(9, 1)),
            BuildRecord::with_result(1, counted_result(8, 2)),
        ]);

    let mut jdk21 = Job::new("matrix/jdk21");
    jdk21
        .set_display_name("jdk21")
        .set_kind(ProjectKind::MatrixAxis {
            parent: "matrix".to_owned(),
        })
        .set_builds([
            BuildRecord::with_result(3, counted_result(4, 1)),
            BuildRecord::new(2),
        ]);

    [linux, windows, matrix, jdk17, jdk21].into_iter().collect()
}
