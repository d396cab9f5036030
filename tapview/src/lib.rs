// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inspect TAP test result histories from the command line.
//!
//! `tapview` reads a JSON export of a job registry and prints build stats, histories, trend
//! series, regression and compatibility statuses, and the rows of a results page under a view
//! preset.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::OutputWriter;
