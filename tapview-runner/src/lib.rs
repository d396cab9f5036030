// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for [tapview](https://crates.io/crates/tapview): build histories,
//! regression and compatibility detection, trend series, and the results page model.
//!
//! The host supplies jobs, their builds and the [`TestSet`](tap_report::TestSet)s each build
//! published, through a [`JobLookup`](job::JobLookup). Everything here is a pure computation over
//! that snapshot.

pub mod compare;
pub mod config;
pub mod errors;
pub mod history;
pub mod job;
pub mod trend;
pub mod view;
