// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use owo_colors::OwoColorize;
use std::error::Error;
use tapview_runner::errors::{ConfigParseError, RegistryReadError, RowIdCollisionError};
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// Documented exit codes for `tapview` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum TapviewExitCode {}

impl TapviewExitCode {
    /// No errors occurred and tapview exited normally.
    pub const OK: i32 = 0;

    /// The requested job or build doesn't exist or has no results.
    pub const NOT_FOUND: i32 = 4;

    /// The configuration couldn't be loaded.
    pub const SETUP_ERROR: i32 = 96;

    /// The job registry export couldn't be read.
    pub const REGISTRY_READ_FAILED: i32 = 102;

    /// Two rows on a results page were assigned the same identifier.
    pub const ROW_ID_COLLISION: i32 = 105;

    /// Writing data to stdout produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}

// The #[error()] strings are placeholders: the expected way to print out errors is with the
// display_to_stderr method, which colorizes errors.

/// An expected failure of a tapview invocation.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("registry read error")]
    RegistryReadError {
        #[from]
        err: RegistryReadError,
    },
    #[error("job not found")]
    JobNotFound { name: String },
    #[error("build not found")]
    BuildNotFound { job: String, number: Option<u32> },
    #[error("row identifier collision")]
    RowIdCollision {
        #[from]
        err: RowIdCollisionError,
    },
    #[error("error writing output")]
    WriteError {
        #[from]
        err: std::io::Error,
    },
}

impl ExpectedError {
    pub(crate) fn job_not_found(name: impl Into<String>) -> Self {
        Self::JobNotFound { name: name.into() }
    }

    pub(crate) fn build_not_found(job: impl Into<String>, number: Option<u32>) -> Self {
        Self::BuildNotFound {
            job: job.into(),
            number,
        }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::ConfigParseError { .. } => TapviewExitCode::SETUP_ERROR,
            Self::RegistryReadError { .. } => TapviewExitCode::REGISTRY_READ_FAILED,
            Self::JobNotFound { .. } | Self::BuildNotFound { .. } => TapviewExitCode::NOT_FOUND,
            Self::RowIdCollision { .. } => TapviewExitCode::ROW_ID_COLLISION,
            Self::WriteError { .. } => TapviewExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::ConfigParseError { err } => {
                error!(
                    "failed to parse tapview config at `{}`",
                    err.config_file().style(styles.bold)
                );
                Some(err.kind() as &dyn Error)
            }
            Self::RegistryReadError { err } => {
                error!("{err}");
                err.source()
            }
            Self::JobNotFound { name } => {
                error!("job `{}` not found in registry", name.style(styles.bold));
                None
            }
            Self::BuildNotFound { job, number } => {
                match number {
                    Some(number) => error!(
                        "build {} of `{}` has no results",
                        number.style(styles.bold),
                        job.style(styles.bold)
                    ),
                    None => error!(
                        "`{}` has no completed build with results",
                        job.style(styles.bold)
                    ),
                }
                None
            }
            Self::RowIdCollision { err } => {
                error!("{err}");
                None
            }
            Self::WriteError { err } => {
                error!("failed to write output");
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
