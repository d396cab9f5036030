// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: fixture TAP streams through the history walker, the comparator and the
//! results page model.

mod fixtures;
mod history;
mod page;
mod properties;
