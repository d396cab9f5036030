// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Data model for parsed TAP (Test Anything Protocol) streams.
//!
//! A [`TestSet`] holds the lines of one parsed TAP file, and a [`BuildResult`] holds every test set
//! published by a single build. Counters are always derived from the stored lines through
//! [`DisplayStatus::resolve`], so they can never drift from the data they describe.

mod build_result;
mod errors;
mod status;
mod test_set;

pub use build_result::*;
pub use errors::*;
pub use status::*;
pub use test_set::*;
