// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time tracking for simulated runs.

mod stopwatch;

pub(crate) use stopwatch::*;
