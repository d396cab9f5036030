// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by tapview.
//!
//! Missing builds, results and counterpart jobs are never errors: they surface as `N/A` statuses
//! and absent history entries instead. The types here cover configuration, string parsing, page
//! classification and registry import.

use crate::view::ViewPreset;
use camino::Utf8PathBuf;
use config::ConfigError;
use std::io;
use thiserror::Error;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse tapview config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8PathBuf {
        &self.config_file
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while parsing a config.
///
/// Returned by [`ConfigParseError::kind`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),
}

/// Error returned while parsing a [`ViewPreset`] value from a string.
#[derive(Clone, Debug, Error)]
#[error(
    "unrecognized value for view preset: {input}\n(known values: {})",
    ViewPreset::variants().join(", "),
)]
pub struct ViewPresetParseError {
    input: String,
}

impl ViewPresetParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the input that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Two rows on the same results page were assigned the same identifier.
///
/// Anchors and detail toggles address rows by identifier, so a page with a duplicate can't be
/// rendered correctly.
#[derive(Clone, Debug, Error)]
#[error(
    "row identifier `{id}` generated for both `{first_file}` and `{second_file}`"
)]
pub struct RowIdCollisionError {
    id: String,
    first_file: String,
    second_file: String,
}

impl RowIdCollisionError {
    pub(crate) fn new(
        id: impl Into<String>,
        first_file: impl Into<String>,
        second_file: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_file: first_file.into(),
            second_file: second_file.into(),
        }
    }

    /// Returns the duplicated identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the file names of the two tables that produced the identifier, in page order.
    pub fn files(&self) -> (&str, &str) {
        (&self.first_file, &self.second_file)
    }
}

/// An error that occurred while reading an exported job registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryReadError {
    /// The registry file could not be read.
    #[error("error reading job registry at `{path}`")]
    Read {
        /// The path that was read.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The registry file is not a valid export.
    #[error("error parsing job registry at `{path}`")]
    Parse {
        /// The path that was read.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: serde_json::Error,
    },
}
