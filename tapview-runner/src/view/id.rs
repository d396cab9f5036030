// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::Serialize;
use std::fmt;

/// The identifier of a row or cell on a results page.
///
/// A test row's identifier is its file name, its 1-based position among the tests in that file
/// and its description, joined with underscores. Whitespace in the description becomes `_`, and
/// runs of underscores are collapsed into one.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Returns the identifier of a test row.
    pub fn for_test(file_name: &str, ordinal: usize, description: &str) -> Self {
        let description: String = description
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        Self(collapse_underscores(&format!(
            "{file_name}_{ordinal}_{description}"
        )))
    }

    /// Returns the identifier of the detail row belonging to this test row.
    pub fn detail_row(&self) -> Self {
        Self(collapse_underscores(&format!("{}_detail", self.0)))
    }

    /// Returns the identifier of the `index`th (1-based) body cell of this detail row.
    pub fn detail_entry(&self, index: usize) -> Self {
        Self(collapse_underscores(&format!("{}_{index}", self.0)))
    }

    /// Returns the `name` of the anchor placed on this row.
    pub fn anchor_name(&self) -> String {
        format!("{}!", self.0)
    }

    /// Returns the `href` linking to this row's anchor.
    pub fn href(&self) -> String {
        format!("#{}!", self.0)
    }

    /// Returns the identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn collapse_underscores(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}
