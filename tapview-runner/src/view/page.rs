// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{RowId, RowTag};
use serde::Serialize;
use tap_report::DisplayStatus;

/// A classified results page: one table per test set.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RenderedPage {
    /// The tables, in the order the test sets were published.
    pub tables: Vec<RenderedTable>,
}

impl RenderedPage {
    /// Iterates over every row on the page.
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.tables.iter().flat_map(|table| table.rows.iter())
    }

    /// Iterates over every identifier assigned on the page: test rows, detail rows and detail
    /// cells.
    pub fn ids(&self) -> impl Iterator<Item = &RowId> + '_ {
        self.rows().flat_map(Row::ids)
    }

    /// Iterates over every navigational element on the page.
    pub fn nav_links(&self) -> impl Iterator<Item = NavLink<'_>> + '_ {
        self.rows().flat_map(Row::nav_links)
    }
}

/// The rows rendered for one test set.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RenderedTable {
    /// The matrix axis the test set was published by, if any.
    pub axis: Option<String>,

    /// The file name of the test set.
    pub file_name: String,

    /// The rows, header first, then in emission order.
    pub rows: Vec<Row>,
}

impl RenderedTable {
    /// Returns the tags of every row, in order.
    pub fn tags(&self) -> Vec<RowTag> {
        self.rows.iter().map(|row| row.tag).collect()
    }
}

/// One rendered row.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Row {
    /// The row's classification.
    pub tag: RowTag,

    /// The row's contents.
    pub kind: RowKind,
}

impl Row {
    /// Iterates over the identifiers this row carries.
    pub fn ids(&self) -> impl Iterator<Item = &RowId> + '_ {
        let (own, entries) = match &self.kind {
            RowKind::Test(test) => (Some(&test.id), None),
            RowKind::Detail(detail) => (Some(&detail.id), Some(detail.entries.iter())),
            _ => (None, None),
        };
        own.into_iter()
            .chain(entries.into_iter().flatten().map(|entry| &entry.body_id))
    }

    /// Iterates over the navigational elements on this row.
    pub fn nav_links(&self) -> impl Iterator<Item = NavLink<'_>> + '_ {
        let (anchor, toggle, entries) = match &self.kind {
            RowKind::Test(test) => (
                Some(NavLink {
                    kind: NavKind::Anchor,
                    target: &test.id,
                }),
                test.detail_toggle.as_ref().map(|target| NavLink {
                    kind: NavKind::DetailToggle,
                    target,
                }),
                None,
            ),
            RowKind::Detail(detail) => (None, None, Some(detail.entries.iter())),
            _ => (None, None, None),
        };
        let entries = entries.into_iter().flatten().map(|entry| NavLink {
            kind: NavKind::EntryToggle,
            target: &entry.body_id,
        });
        anchor.into_iter().chain(toggle).chain(entries)
    }
}

/// The contents of a row, by kind.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RowKind {
    /// The table header.
    Header {
        /// The file name shown in the header.
        file_name: String,
    },

    /// A comment line.
    Comment {
        /// The comment text.
        text: String,
    },

    /// A bail-out line.
    BailOut {
        /// The bail-out reason. May be empty.
        reason: String,
    },

    /// A test line.
    Test(TestRow),

    /// The detail block below a test line.
    Detail(DetailRow),
}

/// A rendered test line.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TestRow {
    /// The 1-based position of the test within its file.
    pub ordinal: usize,

    /// The test number from the TAP line, if any.
    pub number: Option<u32>,

    /// The row identifier.
    pub id: RowId,

    /// The anchor name, `<id>!`.
    pub anchor_name: String,

    /// The link to the anchor, `#<id>!`.
    pub href: String,

    /// The test description.
    pub description: String,

    /// The resolved status.
    pub status: DisplayStatus,

    /// The directive reason, if a directive is present.
    pub directive_reason: Option<String>,

    /// The detail row toggled from this row, if the test has a detail block.
    pub detail_toggle: Option<RowId>,
}

/// A rendered detail block.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DetailRow {
    /// The test row this block belongs to.
    pub owner: RowId,

    /// The row identifier.
    pub id: RowId,

    /// One entry per key/value pair, in emission order.
    pub entries: Vec<DetailEntry>,
}

/// One key/value pair of a detail block.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DetailEntry {
    /// The key.
    pub key: String,

    /// The value.
    pub value: String,

    /// The identifier of the collapsible body cell, toggled from the key cell.
    pub body_id: RowId,
}

/// A navigational element: an anchor or a toggle referring to an identifier.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NavLink<'a> {
    /// What kind of element this is.
    pub kind: NavKind,

    /// The identifier it refers to.
    pub target: &'a RowId,
}

/// The kind of a [`NavLink`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NavKind {
    /// The anchor on a test row.
    Anchor,

    /// The toggle on a test row that shows its detail row.
    DetailToggle,

    /// The toggle on a detail key that shows its body cell.
    EntryToggle,
}
