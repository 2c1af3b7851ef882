// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A simulated test runner for demo dashboards.
//!
//! For a higher-level overview, see the documentation for the `simtest`
//! binary.

mod dispatch;
mod output;

pub use dispatch::*;
pub use output::*;
