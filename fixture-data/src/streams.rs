// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture TAP streams.

use crate::models::{ExpectedCounts, StreamFixture};
use indoc::indoc;

/// A single passing test.
pub static SAMPLE: StreamFixture = StreamFixture {
    file_name: "sample.tap",
    text: "1..1\nok 1 - Sample test\n",
    expected: ExpectedCounts {
        passed: 1,
        failed: 0,
        skipped: 0,
        todo: 0,
        bail_outs: 0,
    },
    row_tags: &["header", "test_ok"],
};

/// An empty stream: no plan, no tests.
pub static EMPTY: StreamFixture = StreamFixture {
    file_name: "suite1.tap",
    text: "",
    expected: ExpectedCounts {
        passed: 0,
        failed: 0,
        skipped: 0,
        todo: 0,
        bail_outs: 0,
    },
    row_tags: &["header"],
};

/// Four tests, some with free-form (non-YAML) output and a trailing space in a description.
pub static ANCHORS: StreamFixture = StreamFixture {
    file_name: "suite1.tap",
    text: indoc! {"
        1..4
        ok 1 - Input file opened
        not ok 2 -  First line of the input valid.
            More output from test 2. There can be
            arbitrary number of lines for any output
            so long as there is at least some kind
            of whitespace at beginning of line.
        ok 3 - Read the rest of the file
        #TAP meta information
        not ok 4 - Summarized correctly # TODO: not written yet
    "},
    expected: ExpectedCounts {
        passed: 3,
        failed: 1,
        skipped: 0,
        todo: 1,
        bail_outs: 0,
    },
    row_tags: &[
        "header",
        "test_ok",
        "test_not_ok",
        "test_ok",
        "comment",
        "test_not_ok_TODO",
    ],
};

/// The descriptions used by [`ANCHORS`], in order.
pub static ANCHORS_DESCRIPTIONS: [&str; 4] = [
    "- Input file opened",
    "-  First line of the input valid.",
    "- Read the rest of the file",
    "- Summarized correctly ",
];

/// Every row kind: comments, all directive combinations, detail blocks and bail-outs.
pub static INTERACTIVE: StreamFixture = StreamFixture {
    file_name: "suite2.tap",
    text: indoc! {"
        # cmnt01
        # cmnt02
        # cmnt03
        1..8
        ok 1 - Input file opened
          ---
            detailid1: detail1
            detailid2: detail2
          ...
        not ok 2 -  First line of the input valid.
          ---
            detailid1: detail3
            detailid2: detail4
          ...
        not ok 3 - Read the rest of the file# TODO
        not ok 4 - Summarized correctly1 # skip
            detailid1: incorrect
            detailid2: incorrect
        #in results cmnt
        ok 5 - Summarized correctly2 # TODO Not written yet
          ---
            detailid1: detail5
            detailid2: detail6
          ...
        ok 6 - Summarized correctly3 # skip written yet
        Bail out!
        Bail out! with reason
        not ok 7 -hi no space1
          ---
            detailid1: detail7
            detailid2: detail8
          ...
        ok 8 -hi no space2
            detailid1: incorrect
            detailid2: incorrect
    "},
    expected: ExpectedCounts {
        passed: 4,
        failed: 2,
        skipped: 2,
        todo: 2,
        bail_outs: 2,
    },
    row_tags: &[
        "header",
        "comment",
        "comment",
        "comment",
        "test_ok",
        "detail_ok",
        "test_not_ok",
        "detail_not_ok",
        "test_not_ok_TODO",
        "test_not_ok_SKIP",
        "comment",
        "test_ok_TODO",
        "detail_ok",
        "test_ok_SKIP",
        "bailout",
        "bailout",
        "test_not_ok",
        "detail_not_ok",
        "test_ok",
    ],
};

/// Returns every stream fixture.
pub fn all() -> [&'static StreamFixture; 4] {
    [&SAMPLE, &EMPTY, &ANCHORS, &INTERACTIVE]
}
