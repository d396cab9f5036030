// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::view::ViewPreset;
use serde::Deserialize;
use std::num::NonZeroUsize;

const DEFAULT_MAX_BUILDS: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// History table settings, under `[history]`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HistoryConfig {
    /// The maximum number of builds walked, newest first.
    pub max_builds: NonZeroUsize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_builds: DEFAULT_MAX_BUILDS,
        }
    }
}

/// The name substitution used to find a job's counterpart, under `[compatibility]`.
///
/// `to_replace` is a regular expression. Its first match in a job's name is replaced with
/// `new_text` to obtain the counterpart's name.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SubstitutionRule {
    /// The pattern to replace.
    #[serde(default)]
    pub to_replace: String,

    /// The replacement text, in [`regex::Regex::replacen`] syntax.
    ///
    /// Capture groups are referred to as `$1`, `${1}` or `$name`. The longest possible group name
    /// is used, so `$1a` refers to a group named `1a`: write `${1}a` for group 1 followed by `a`.
    /// A literal `$` is written as `$$`.
    #[serde(default)]
    pub new_text: String,
}

impl SubstitutionRule {
    /// Creates a new substitution rule.
    pub fn new(to_replace: impl Into<String>, new_text: impl Into<String>) -> Self {
        Self {
            to_replace: to_replace.into(),
            new_text: new_text.into(),
        }
    }

    /// Returns true if both halves of the rule are non-empty.
    ///
    /// An unset rule is not an error: compatibility is simply not applicable.
    pub fn is_set(&self) -> bool {
        !self.to_replace.is_empty() && !self.new_text.is_empty()
    }
}

/// Results page settings, under `[view]`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ViewConfig {
    /// The preset a new view filter starts with.
    pub default_preset: ViewPreset,
}

/// Trend graph settings, under `[trend]`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrendConfig {
    /// The number of builds plotted.
    pub max_builds: NonZeroUsize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            max_builds: DEFAULT_MAX_BUILDS,
        }
    }
}
