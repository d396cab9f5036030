// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::DisplayStatusParseError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The raw outcome of a TAP test point, as written on its `ok` / `not ok` line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum RawStatus {
    /// The line started with `ok`.
    Ok,

    /// The line started with `not ok`.
    NotOk,
}

impl RawStatus {
    /// Returns true if the test point was reported as `ok`.
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, RawStatus::Ok)
    }

    /// Returns the status as it appears in a TAP stream.
    pub fn as_tap_str(self) -> &'static str {
        match self {
            RawStatus::Ok => "ok",
            RawStatus::NotOk => "not ok",
        }
    }
}

/// The kind of a `#` directive on a test line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum DirectiveKind {
    /// `# SKIP`: the test was not run.
    Skip,

    /// `# TODO`: the test is expected to fail for now.
    Todo,
}

impl DirectiveKind {
    /// Returns the directive keyword in its canonical (uppercase) spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKind::Skip => "SKIP",
            DirectiveKind::Todo => "TODO",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `# SKIP` or `# TODO` directive attached to a test point.
///
/// A directive is only present if the TAP line carried one. Its absence means the raw status is
/// authoritative.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    /// Whether this is a skip or a todo directive.
    pub kind: DirectiveKind,

    /// The free-text reason following the keyword. May be empty.
    #[serde(default)]
    pub reason: String,
}

impl Directive {
    /// Creates a new directive.
    pub fn new(kind: DirectiveKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// Creates a `# SKIP` directive.
    pub fn skip(reason: impl Into<String>) -> Self {
        Self::new(DirectiveKind::Skip, reason)
    }

    /// Creates a `# TODO` directive.
    pub fn todo(reason: impl Into<String>) -> Self {
        Self::new(DirectiveKind::Todo, reason)
    }
}

/// The status shown for a test point once its directive has been applied.
///
/// Obtained through [`DisplayStatus::resolve`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum DisplayStatus {
    /// The test passed.
    Pass,

    /// The test failed.
    Fail,

    /// The test was skipped through a `# SKIP` directive.
    Skip,

    /// The test carried a `# TODO` directive.
    Todo,
}

impl DisplayStatus {
    /// Resolves the display status of a test point.
    ///
    /// A `SKIP` directive wins over everything, then a `TODO` directive; only without a
    /// directive does the raw status decide between pass and fail. A test carrying a directive
    /// is therefore never reported as a failure, even if its raw status was `not ok`.
    pub fn resolve(raw: RawStatus, directive: Option<&Directive>) -> Self {
        match directive.map(|directive| directive.kind) {
            Some(DirectiveKind::Skip) => DisplayStatus::Skip,
            Some(DirectiveKind::Todo) => DisplayStatus::Todo,
            None if raw.is_ok() => DisplayStatus::Pass,
            None => DisplayStatus::Fail,
        }
    }

    /// String representations of all known variants.
    pub fn variants() -> &'static [&'static str] {
        &["PASS", "FAIL", "SKIP", "TODO"]
    }

    /// Returns true if this status counts as a failure.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, DisplayStatus::Fail)
    }

    /// Returns the uppercase string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayStatus::Pass => "PASS",
            DisplayStatus::Fail => "FAIL",
            DisplayStatus::Skip => "SKIP",
            DisplayStatus::Todo => "TODO",
        }
    }
}

impl FromStr for DisplayStatus {
    type Err = DisplayStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let val = match s.to_ascii_uppercase().as_str() {
            "PASS" => DisplayStatus::Pass,
            "FAIL" => DisplayStatus::Fail,
            "SKIP" => DisplayStatus::Skip,
            "TODO" => DisplayStatus::Todo,
            _ => return Err(DisplayStatusParseError::new(s)),
        };
        Ok(val)
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
