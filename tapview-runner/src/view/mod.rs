// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The results page model.
//!
//! [`classify_build`] turns a build's test sets into a [`RenderedPage`]: one table per test set,
//! every row tagged with a [`RowTag`]. A [`ViewFilter`] then decides which rows are shown under
//! the selected [`ViewPreset`]. Switching presets only re-evaluates the filter over the existing
//! rows; nothing is recomputed from the test sets.

mod classifier;
mod filter;
mod id;
mod page;
mod tag;

pub use classifier::*;
pub use filter::*;
pub use id::*;
pub use page::*;
pub use tag::*;
