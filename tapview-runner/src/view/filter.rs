// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{RenderedTable, Row, RowTag};
use crate::errors::ViewPresetParseError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A preset view over a results page.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum ViewPreset {
    /// Show every row.
    #[default]
    All,

    /// Show failed tests and bail-outs.
    Failed,

    /// Show failed tests, their detail blocks and bail-outs.
    FailedDetails,

    /// Show failed tests, including those marked `# TODO`, and bail-outs.
    FailedTodo,

    /// Show everything except comments.
    HideComments,
}

impl ViewPreset {
    /// String representations of all known variants.
    pub fn variants() -> &'static [&'static str] {
        &[
            "all",
            "failed",
            "failed-details",
            "failed-todo",
            "hide-comments",
        ]
    }

    /// Returns true if rows with this tag are shown under this preset.
    ///
    /// This doesn't take ownership of detail rows into account: see
    /// [`ViewFilter::visible_rows`].
    pub fn shows(self, tag: RowTag) -> bool {
        match self {
            ViewPreset::All => true,
            ViewPreset::Failed => matches!(tag, RowTag::TestNotOk | RowTag::BailOut),
            ViewPreset::FailedDetails => matches!(
                tag,
                RowTag::TestNotOk | RowTag::BailOut | RowTag::DetailNotOk
            ),
            ViewPreset::FailedTodo => matches!(
                tag,
                RowTag::TestNotOk | RowTag::TestNotOkTodo | RowTag::BailOut
            ),
            ViewPreset::HideComments => tag != RowTag::Comment,
        }
    }

    /// Returns the string representation of this preset.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewPreset::All => "all",
            ViewPreset::Failed => "failed",
            ViewPreset::FailedDetails => "failed-details",
            ViewPreset::FailedTodo => "failed-todo",
            ViewPreset::HideComments => "hide-comments",
        }
    }
}

impl FromStr for ViewPreset {
    type Err = ViewPresetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let val = match s {
            "all" => ViewPreset::All,
            "failed" => ViewPreset::Failed,
            "failed-details" => ViewPreset::FailedDetails,
            "failed-todo" => ViewPreset::FailedTodo,
            "hide-comments" => ViewPreset::HideComments,
            other => return Err(ViewPresetParseError::new(other)),
        };
        Ok(val)
    }
}

impl fmt::Display for ViewPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ViewPreset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;

        impl serde::de::Visitor<'_> for V {
            type Value = ViewPreset;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "one of: {}", ViewPreset::variants().join(", "))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ViewPreset::from_str(v).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(V)
    }
}

/// Row visibility for a results page.
///
/// The only state is the selected preset. Selecting a preset never touches the rows themselves,
/// so selecting the same preset twice is a no-op.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ViewFilter {
    preset: ViewPreset,
}

impl ViewFilter {
    /// Creates a new filter with the given preset selected.
    pub fn new(preset: ViewPreset) -> Self {
        Self { preset }
    }

    /// Returns the selected preset.
    pub fn preset(&self) -> ViewPreset {
        self.preset
    }

    /// Selects a preset.
    pub fn select(&mut self, preset: ViewPreset) -> &mut Self {
        self.preset = preset;
        self
    }

    /// Returns true if a row with this tag passes the filter, ignoring detail row ownership.
    ///
    /// Header rows are always shown.
    pub fn shows(&self, tag: RowTag) -> bool {
        tag == RowTag::Header || self.preset.shows(tag)
    }

    /// Returns the visibility of every row in the table, in order.
    ///
    /// A detail row is only visible if its tag is shown and the test row it belongs to is
    /// visible.
    pub fn row_visibility(&self, table: &RenderedTable) -> Vec<bool> {
        let mut owner_visible = false;
        table
            .rows
            .iter()
            .map(|row| {
                let visible = self.shows(row.tag);
                if row.tag.is_test() {
                    owner_visible = visible;
                    visible
                } else if row.tag.is_detail() {
                    visible && owner_visible
                } else {
                    visible
                }
            })
            .collect()
    }

    /// Iterates over the rows of the table that are visible.
    pub fn visible_rows<'a>(&self, table: &'a RenderedTable) -> impl Iterator<Item = &'a Row> + 'a {
        table
            .rows
            .iter()
            .zip(self.row_visibility(table))
            .filter_map(|(row, visible)| visible.then_some(row))
    }
}
