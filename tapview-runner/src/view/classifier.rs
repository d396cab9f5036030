// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    DetailEntry, DetailRow, RenderedPage, RenderedTable, Row, RowId, RowKind, RowTag, TestRow,
};
use crate::{errors::RowIdCollisionError, job::BuildResults};
use std::collections::{HashMap, hash_map::Entry};
use tap_report::{BuildResult, TapLine, TestResult, TestSet};
use tracing::debug;

/// Classifies every row of a build's results page.
///
/// Returns an error if two rows on the page end up with the same identifier. Within one test set
/// identifiers are always distinct, since they embed the test's position; a collision needs two
/// test sets whose file names and descriptions happen to line up.
pub fn classify_build(result: &BuildResult) -> Result<RenderedPage, RowIdCollisionError> {
    classify_test_sets(result.test_sets.iter().map(|test_set| (None, test_set)))
}

/// Classifies every row of a build's results page, including each axis of a matrix build.
///
/// Each axis keeps its own namespace: its name is prefixed to the identifiers of its rows.
pub fn classify_results(results: &BuildResults<'_>) -> Result<RenderedPage, RowIdCollisionError> {
    match results {
        BuildResults::Single(result) => classify_build(result),
        BuildResults::Matrix(axes) => classify_test_sets(axes.iter().flat_map(|axis| {
            axis.result
                .test_sets
                .iter()
                .map(move |test_set| (Some(axis.axis), test_set))
        })),
    }
}

/// Classifies the rows of a single test set.
pub fn classify_test_set(axis: Option<&str>, test_set: &TestSet) -> RenderedTable {
    let namespace = match axis {
        Some(axis) => format!("{axis}_{}", test_set.file_name),
        None => test_set.file_name.clone(),
    };

    let mut rows = vec![Row {
        tag: RowTag::Header,
        kind: RowKind::Header {
            file_name: test_set.file_name.clone(),
        },
    }];

    let mut ordinal = 0;
    for line in &test_set.lines {
        match line {
            TapLine::Comment { text } => rows.push(Row {
                tag: RowTag::Comment,
                kind: RowKind::Comment { text: text.clone() },
            }),
            TapLine::BailOut { reason } => rows.push(Row {
                tag: RowTag::BailOut,
                kind: RowKind::BailOut {
                    reason: reason.clone(),
                },
            }),
            TapLine::Test(result) => {
                ordinal += 1;
                push_test_rows(&mut rows, &namespace, ordinal, result);
            }
        }
    }

    debug!(
        "classified {} rows for {namespace} ({ordinal} tests)",
        rows.len()
    );

    RenderedTable {
        axis: axis.map(str::to_owned),
        file_name: test_set.file_name.clone(),
        rows,
    }
}

fn push_test_rows(rows: &mut Vec<Row>, namespace: &str, ordinal: usize, result: &TestResult) {
    let id = RowId::for_test(namespace, ordinal, &result.description);
    let status = result.display_status();
    let detail = result.has_detail_block().then(|| {
        let detail_id = id.detail_row();
        let entries = result
            .output
            .iter()
            .enumerate()
            .map(|(index, (key, value))| DetailEntry {
                key: key.clone(),
                value: value.clone(),
                body_id: detail_id.detail_entry(index + 1),
            })
            .collect();
        DetailRow {
            owner: id.clone(),
            id: detail_id,
            entries,
        }
    });

    rows.push(Row {
        tag: RowTag::for_test(
            result.status,
            result.directive.as_ref().map(|directive| directive.kind),
        ),
        kind: RowKind::Test(TestRow {
            ordinal,
            number: result.number,
            anchor_name: id.anchor_name(),
            href: id.href(),
            id,
            description: result.description.clone(),
            status,
            directive_reason: result
                .directive
                .as_ref()
                .map(|directive| directive.reason.clone()),
            detail_toggle: detail.as_ref().map(|detail| detail.id.clone()),
        }),
    });

    if let Some(detail) = detail {
        rows.push(Row {
            tag: RowTag::for_detail(status),
            kind: RowKind::Detail(detail),
        });
    }
}

fn classify_test_sets<'a>(
    test_sets: impl Iterator<Item = (Option<&'a str>, &'a TestSet)>,
) -> Result<RenderedPage, RowIdCollisionError> {
    // Maps each identifier to the file that produced it.
    let mut seen: HashMap<RowId, String> = HashMap::new();
    let mut page = RenderedPage::default();

    for (axis, test_set) in test_sets {
        let table = classify_test_set(axis, test_set);
        for id in table.rows.iter().flat_map(Row::ids) {
            match seen.entry(id.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(table.file_name.clone());
                }
                Entry::Occupied(entry) => {
                    return Err(RowIdCollisionError::new(
                        id.as_str(),
                        entry.get(),
                        &table.file_name,
                    ));
                }
            }
        }
        page.tables.push(table);
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tap_report::{Directive, RawStatus};

    fn test(status: RawStatus, description: &str) -> TestResult {
        TestResult::new(status, description)
    }

    #[test]
    fn empty_test_set_has_only_header() {
        let table = classify_test_set(None, &TestSet::new("suite1.tap"));
        assert_eq!(table.tags(), vec![RowTag::Header]);
    }

    #[test]
    fn rows_follow_emission_order() {
        let mut test_set = TestSet::new("a.tap");
        let mut with_details = test(RawStatus::NotOk, "- broken");
        with_details.add_output("got", "1").add_output("expected", "2");
        let mut todo = test(RawStatus::NotOk, "- later");
        todo.set_directive(Directive::todo("not yet"));

        test_set
            .add_comment(" top")
            .add_test_result(test(RawStatus::Ok, "- works"))
            .add_test_result(with_details)
            .add_bail_out("stop")
            .add_test_result(todo);

        let table = classify_test_set(None, &test_set);
        assert_eq!(
            table.tags(),
            vec![
                RowTag::Header,
                RowTag::Comment,
                RowTag::TestOk,
                RowTag::TestNotOk,
                RowTag::DetailNotOk,
                RowTag::BailOut,
                RowTag::TestNotOkTodo,
            ]
        );

        let RowKind::Test(broken) = &table.rows[3].kind else {
            panic!("row 3 is a test row");
        };
        assert_eq!(broken.ordinal, 2);
        assert_eq!(broken.id.as_str(), "a.tap_2_-_broken");
        assert_eq!(broken.href, "#a.tap_2_-_broken!");
        assert_eq!(broken.anchor_name, "a.tap_2_-_broken!");

        let RowKind::Detail(detail) = &table.rows[4].kind else {
            panic!("row 4 is a detail row");
        };
        assert_eq!(broken.detail_toggle.as_ref(), Some(&detail.id));
        assert_eq!(detail.owner, broken.id);
        let bodies: Vec<_> = detail.entries.iter().map(|entry| entry.body_id.as_str()).collect();
        assert_eq!(
            bodies,
            vec!["a.tap_2_-_broken_detail_1", "a.tap_2_-_broken_detail_2"]
        );

        let RowKind::Test(later) = &table.rows[6].kind else {
            panic!("row 6 is a test row");
        };
        assert_eq!(later.ordinal, 3);
        assert_eq!(later.directive_reason.as_deref(), Some("not yet"));
        assert_eq!(later.detail_toggle, None);
    }

    #[test]
    fn colliding_ids_across_files() {
        let mut first = TestSet::new("a");
        first.add_test_result(test(RawStatus::Ok, "1 x"));
        let mut second = TestSet::new("a_1");
        second.add_test_result(test(RawStatus::Ok, "x"));
        let result: BuildResult = [first, second].into_iter().collect();

        let err = classify_build(&result).expect_err("ids collide");
        assert_eq!(err.id(), "a_1_1_x");
        assert_eq!(err.files(), ("a", "a_1"));
    }

    #[test]
    fn duplicate_descriptions_in_one_file_are_distinct() {
        let mut test_set = TestSet::new("dup.tap");
        test_set
            .add_test_result(test(RawStatus::Ok, "same"))
            .add_test_result(test(RawStatus::Ok, "same"));
        let result: BuildResult = [test_set].into_iter().collect();
        let page = classify_build(&result).expect("no collision within a file");
        assert_eq!(page.ids().count(), 2);
    }
}
