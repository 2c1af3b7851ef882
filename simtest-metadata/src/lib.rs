// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Documented data formats for [simtest](https://crates.io/crates/simtest).
//!
//! simtest writes a JSON report document to disk after every state transition
//! of a simulated test run. This crate defines that document along with the
//! status vocabulary and timing formats it uses, so that external consumers
//! (dashboards, demo UIs) can deserialize the report without depending on the
//! runner itself.

mod errors;
mod report;
mod status;
mod timing;

pub use errors::*;
pub use report::*;
pub use status::*;
pub use timing::*;
