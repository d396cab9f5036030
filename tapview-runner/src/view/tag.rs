// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::Serialize;
use std::fmt;
use tap_report::{DirectiveKind, DisplayStatus, RawStatus};

/// The classification of a rendered row.
///
/// Test rows are tagged by their raw status and directive, so that a `not ok # TODO` row can be
/// told apart from an `ok # TODO` row. Detail rows are tagged by the resolved status of the test
/// they belong to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum RowTag {
    /// The header row of a table.
    #[serde(rename = "header")]
    Header,

    /// A comment line.
    #[serde(rename = "comment")]
    Comment,

    /// An `ok` test without a directive.
    #[serde(rename = "test_ok")]
    TestOk,

    /// An `ok` test with a `# TODO` directive.
    #[serde(rename = "test_ok_TODO")]
    TestOkTodo,

    /// An `ok` test with a `# SKIP` directive.
    #[serde(rename = "test_ok_SKIP")]
    TestOkSkip,

    /// A `not ok` test without a directive.
    #[serde(rename = "test_not_ok")]
    TestNotOk,

    /// A `not ok` test with a `# TODO` directive.
    #[serde(rename = "test_not_ok_TODO")]
    TestNotOkTodo,

    /// A `not ok` test with a `# SKIP` directive.
    #[serde(rename = "test_not_ok_SKIP")]
    TestNotOkSkip,

    /// A `Bail out!` line.
    #[serde(rename = "bailout")]
    BailOut,

    /// The detail block of a test that did not fail.
    #[serde(rename = "detail_ok")]
    DetailOk,

    /// The detail block of a failed test.
    #[serde(rename = "detail_not_ok")]
    DetailNotOk,
}

impl RowTag {
    /// Every tag, in taxonomy order.
    pub const ALL: [RowTag; 11] = [
        RowTag::Header,
        RowTag::Comment,
        RowTag::TestOk,
        RowTag::TestOkTodo,
        RowTag::TestOkSkip,
        RowTag::TestNotOk,
        RowTag::TestNotOkTodo,
        RowTag::TestNotOkSkip,
        RowTag::BailOut,
        RowTag::DetailOk,
        RowTag::DetailNotOk,
    ];

    /// Returns the tag for a test row.
    pub fn for_test(status: RawStatus, directive: Option<DirectiveKind>) -> Self {
        match (status, directive) {
            (RawStatus::Ok, None) => RowTag::TestOk,
            (RawStatus::Ok, Some(DirectiveKind::Todo)) => RowTag::TestOkTodo,
            (RawStatus::Ok, Some(DirectiveKind::Skip)) => RowTag::TestOkSkip,
            (RawStatus::NotOk, None) => RowTag::TestNotOk,
            (RawStatus::NotOk, Some(DirectiveKind::Todo)) => RowTag::TestNotOkTodo,
            (RawStatus::NotOk, Some(DirectiveKind::Skip)) => RowTag::TestNotOkSkip,
        }
    }

    /// Returns the tag for the detail row of a test with the given status.
    pub fn for_detail(status: DisplayStatus) -> Self {
        if status.is_failure() {
            RowTag::DetailNotOk
        } else {
            RowTag::DetailOk
        }
    }

    /// Returns true if this tag belongs to a test row.
    pub fn is_test(self) -> bool {
        matches!(
            self,
            RowTag::TestOk
                | RowTag::TestOkTodo
                | RowTag::TestOkSkip
                | RowTag::TestNotOk
                | RowTag::TestNotOkTodo
                | RowTag::TestNotOkSkip
        )
    }

    /// Returns true if this tag belongs to a detail row.
    pub fn is_detail(self) -> bool {
        matches!(self, RowTag::DetailOk | RowTag::DetailNotOk)
    }

    /// Returns the name of this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            RowTag::Header => "header",
            RowTag::Comment => "comment",
            RowTag::TestOk => "test_ok",
            RowTag::TestOkTodo => "test_ok_TODO",
            RowTag::TestOkSkip => "test_ok_SKIP",
            RowTag::TestNotOk => "test_not_ok",
            RowTag::TestNotOkTodo => "test_not_ok_TODO",
            RowTag::TestNotOkSkip => "test_not_ok_SKIP",
            RowTag::BailOut => "bailout",
            RowTag::DetailOk => "detail_ok",
            RowTag::DetailNotOk => "detail_not_ok",
        }
    }

    /// Returns the HTML class the results page gives rows with this tag.
    ///
    /// Header rows carry no class.
    pub fn html_class(self) -> &'static str {
        match self {
            RowTag::Header => "",
            RowTag::Comment => "_comment_",
            RowTag::BailOut => "_bailout_",
            RowTag::DetailOk => "tr_details_ok",
            RowTag::DetailNotOk => "tr_details_not_ok",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for RowTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
