// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture data for tapview tests.
//!
//! Real TAP parsing is done by the host before results reach tapview. Tests still want to start
//! from TAP text, so [`reader`] implements just enough of the format to turn the fixture streams
//! in [`streams`] into [`TestSet`](tap_report::TestSet)s.

pub mod models;
pub mod reader;
pub mod streams;
