// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{build_result, counted_result, registry};
use fixture_data::streams;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use tap_report::{BuildResult, Directive, DisplayStatus, RawStatus, TestResult, TestSet};
use tapview_runner::{
    job::{BuildNumber, JobLookup},
    view::{
        NavKind, RenderedPage, RenderedTable, RowKind, RowTag, TestRow, ViewFilter, ViewPreset,
        classify_build, classify_results,
    },
};
use test_case::test_case;

fn page(result: &BuildResult) -> RenderedPage {
    classify_build(result).unwrap_or_else(|err| panic!("no identifiers collide: {err}"))
}

fn test_rows(table: &RenderedTable) -> Vec<&TestRow> {
    table
        .rows
        .iter()
        .filter_map(|row| match &row.kind {
            RowKind::Test(test) => Some(test),
            _ => None,
        })
        .collect()
}

fn tag_names(table: &RenderedTable) -> Vec<&'static str> {
    table.tags().into_iter().map(RowTag::as_str).collect()
}

#[test]
fn single_passing_test() {
    let page = page(&build_result(&[&streams::SAMPLE]));
    assert_eq!(page.tables.len(), 1);
    let table = &page.tables[0];
    assert_eq!(table.file_name, "sample.tap");
    assert_eq!(tag_names(table), streams::SAMPLE.row_tags);

    let tests = test_rows(table);
    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0].id.as_str(), "sample.tap_1_-_Sample_test");
    assert_eq!(tests[0].number, Some(1));
    assert_eq!(tests[0].status, DisplayStatus::Pass);
    assert_eq!(tests[0].detail_toggle, None);
}

#[test]
fn empty_stream_renders_header_only() {
    let page = page(&build_result(&[&streams::EMPTY]));
    assert_eq!(tag_names(&page.tables[0]), vec!["header"]);
    assert_eq!(page.ids().count(), 0);

    for preset in [ViewPreset::All, ViewPreset::Failed, ViewPreset::HideComments] {
        let filter = ViewFilter::new(preset);
        assert_eq!(
            filter.visible_rows(&page.tables[0]).count(),
            1,
            "header is visible under {preset}"
        );
    }
}

#[test]
fn every_row_kind_is_tagged() {
    let page = page(&build_result(&[&streams::INTERACTIVE]));
    let table = &page.tables[0];
    assert_eq!(tag_names(table), streams::INTERACTIVE.row_tags);

    let statuses: Vec<_> = test_rows(table).iter().map(|test| test.status).collect();
    assert_eq!(
        statuses,
        vec![
            DisplayStatus::Pass,
            DisplayStatus::Fail,
            DisplayStatus::Todo,
            DisplayStatus::Skip,
            DisplayStatus::Todo,
            DisplayStatus::Skip,
            DisplayStatus::Fail,
            DisplayStatus::Pass,
        ]
    );

    let reasons: Vec<_> = table
        .rows
        .iter()
        .filter_map(|row| match &row.kind {
            RowKind::BailOut { reason } => Some(reason.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(reasons, vec!["", "with reason"]);
}

#[test]
fn anchor_identifiers() {
    let page = page(&build_result(&[&streams::ANCHORS]));
    let tests = test_rows(&page.tables[0]);

    let descriptions: Vec<_> = tests.iter().map(|test| test.description.as_str()).collect();
    assert_eq!(descriptions, streams::ANCHORS_DESCRIPTIONS);

    let anchors: Vec<_> = tests
        .iter()
        .map(|test| (test.anchor_name.as_str(), test.href.as_str()))
        .collect();
    assert_eq!(
        anchors,
        vec![
            (
                "suite1.tap_1_-_Input_file_opened!",
                "#suite1.tap_1_-_Input_file_opened!"
            ),
            (
                "suite1.tap_2_-_First_line_of_the_input_valid.!",
                "#suite1.tap_2_-_First_line_of_the_input_valid.!"
            ),
            (
                "suite1.tap_3_-_Read_the_rest_of_the_file!",
                "#suite1.tap_3_-_Read_the_rest_of_the_file!"
            ),
            (
                "suite1.tap_4_-_Summarized_correctly_!",
                "#suite1.tap_4_-_Summarized_correctly_!"
            ),
        ]
    );
    assert_eq!(tests[3].directive_reason.as_deref(), Some("not written yet"));
}

#[test]
fn detail_identifiers() {
    let page = page(&build_result(&[&streams::INTERACTIVE]));
    let details: Vec<_> = page
        .rows()
        .filter_map(|row| match &row.kind {
            RowKind::Detail(detail) => Some(detail),
            _ => None,
        })
        .collect();
    assert_eq!(details.len(), 4);

    let last = details[3];
    assert_eq!(last.owner.as_str(), "suite2.tap_7_-hi_no_space1");
    assert_eq!(last.id.as_str(), "suite2.tap_7_-hi_no_space1_detail");
    let entries: Vec<_> = last
        .entries
        .iter()
        .map(|entry| (entry.key.as_str(), entry.value.as_str(), entry.body_id.as_str()))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("detailid1", "detail7", "suite2.tap_7_-hi_no_space1_detail_1"),
            ("detailid2", "detail8", "suite2.tap_7_-hi_no_space1_detail_2"),
        ]
    );
}

#[test]
fn every_identifier_is_referenced_once() {
    let page = page(&build_result(&[
        &streams::INTERACTIVE,
        &streams::ANCHORS,
        &streams::SAMPLE,
    ]));

    let mut references: HashMap<&str, Vec<NavKind>> = HashMap::new();
    for link in page.nav_links() {
        references
            .entry(link.target.as_str())
            .or_default()
            .push(link.kind);
    }

    let ids: Vec<_> = page.ids().map(|id| id.as_str()).collect();
    // 13 tests, 4 detail rows with 2 entries each.
    assert_eq!(ids.len(), 25);
    for id in &ids {
        let kinds = references
            .get(id)
            .unwrap_or_else(|| panic!("{id} is referenced"));
        assert_eq!(kinds.len(), 1, "{id} is referenced once, got {kinds:?}");
    }
    assert_eq!(references.len(), ids.len(), "no dangling references");
}

#[test]
fn failed_preset_shows_failures_and_bail_outs() {
    let mut todo = TestResult::new(RawStatus::Ok, "- later");
    todo.set_directive(Directive::todo(""));
    let mut test_set = TestSet::new("d.tap");
    test_set
        .add_test_result(TestResult::new(RawStatus::Ok, "- works"))
        .add_test_result(TestResult::new(RawStatus::NotOk, "- broken"))
        .add_bail_out("out of disk")
        .add_test_result(todo);
    let page = page(&[test_set].into_iter().collect());
    let table = &page.tables[0];
    assert_eq!(
        tag_names(table),
        vec!["header", "test_ok", "test_not_ok", "bailout", "test_ok_TODO"]
    );

    let mut filter = ViewFilter::new(ViewPreset::All);
    assert_eq!(filter.visible_rows(table).count(), 5);

    filter.select(ViewPreset::Failed);
    let classes: Vec<_> = filter
        .visible_rows(table)
        .filter(|row| row.tag != RowTag::Header)
        .map(|row| row.tag.html_class())
        .collect();
    assert_eq!(classes, vec!["test_not_ok", "_bailout_"]);
}

#[test_case(ViewPreset::All, 19 ; "all")]
#[test_case(ViewPreset::Failed, 5 ; "failed")]
#[test_case(ViewPreset::FailedDetails, 7 ; "failed with details")]
#[test_case(ViewPreset::FailedTodo, 6 ; "failed with todo")]
#[test_case(ViewPreset::HideComments, 15 ; "hide comments")]
fn preset_visible_rows(preset: ViewPreset, expected: usize) {
    let page = page(&build_result(&[&streams::INTERACTIVE]));
    let table = &page.tables[0];

    let mut filter = ViewFilter::new(preset);
    assert_eq!(filter.visible_rows(table).count(), expected);
    filter.select(preset);
    assert_eq!(
        filter.visible_rows(table).count(),
        expected,
        "selecting the same preset again changes nothing"
    );
}

#[test]
fn matrix_axes_keep_separate_identifiers() {
    let registry = registry();
    let matrix = registry.job("matrix").expect("matrix is in the registry");
    let results = registry
        .build_results(matrix, BuildNumber::new(3))
        .expect("build 3 has results");

    let page = classify_results(&results).unwrap_or_else(|err| panic!("{err}"));
    let axes: Vec<_> = page
        .tables
        .iter()
        .map(|table| (table.axis.as_deref(), table.file_name.as_str()))
        .collect();
    assert_eq!(
        axes,
        vec![
            (Some("matrix/jdk17"), "counted.tap"),
            (Some("matrix/jdk21"), "counted.tap"),
        ]
    );
    assert_eq!(
        test_rows(&page.tables[1])[0].id.as_str(),
        "matrix/jdk21_counted.tap_1_-_pass_0"
    );

    // Without the axis namespace, the two test sets collide.
    let mut flattened = BuildResult::new();
    for result in [counted_result(1, 0), counted_result(1, 0)] {
        flattened.add_test_sets(result.test_sets);
    }
    let err = classify_build(&flattened).expect_err("identical test sets collide");
    assert_eq!(err.id(), "counted.tap_1_-_pass_0");
    assert_eq!(err.files(), ("counted.tap", "counted.tap"));
}
