// Copyright (c) The tapview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration support for tapview.
//!
//! The embedded default config is always read first, then `.config/tapview.toml` (or a file passed
//! in explicitly) is layered on top.

mod imp;
mod settings;

pub use imp::*;
pub use settings::*;
