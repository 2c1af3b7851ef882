// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run events.
//!
//! Events are produced by a [`SimRunner`](crate::runner::SimRunner) and
//! consumed by a [`RunReporter`](crate::reporter::RunReporter).

use crate::{list::TestPlan, runner::RunStats, signal::ShutdownEvent};
use chrono::{DateTime, Local};
use std::{fmt, time::Duration};

/// A run event.
#[derive(Clone, Debug)]
pub struct RunEvent<'a> {
    /// The time at which the event was generated.
    pub timestamp: DateTime<Local>,

    /// The amount of time elapsed since the start of the run.
    pub elapsed: Duration,

    /// The plan this event belongs to, reflecting all state transitions up to
    /// and including this event.
    pub plan: &'a TestPlan,

    /// The kind of event this is.
    pub kind: RunEventKind,
}

/// The kind of run event this is.
///
/// Forms part of [`RunEvent`].
#[derive(Clone, Debug)]
pub enum RunEventKind {
    /// The run started. Emitted once, before any case runs.
    RunStarted,

    /// A case transitioned to in-progress.
    CaseStarted {
        /// Roster index of the case.
        index: usize,

        /// Total number of cases in the roster.
        total: usize,
    },

    /// A case reached its terminal state.
    CaseFinished {
        /// Roster index of the case.
        index: usize,

        /// Total number of cases in the roster.
        total: usize,
    },

    /// A stop was requested. The in-flight case drains before the run ends.
    RunBeginCancel {
        /// Why the run is being cancelled.
        reason: CancelReason,
    },

    /// The run finished, either by exhausting the roster or after a cancel.
    RunFinished {
        /// Statistics for the run.
        stats: RunStats,
    },
}

/// The reason a run is being cancelled.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum CancelReason {
    /// A cooperative stop was requested through a
    /// [`StopSignal`](crate::runner::StopSignal).
    StopRequested,

    /// A termination signal (on Unix, SIGTERM or SIGHUP) was received.
    Signal,

    /// An interrupt (on Unix, Ctrl-C) was received.
    Interrupt,
}

impl CancelReason {
    pub(crate) fn to_static_str(self) -> &'static str {
        match self {
            CancelReason::StopRequested => "stop requested",
            CancelReason::Signal => "signal",
            CancelReason::Interrupt => "interrupt",
        }
    }
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_static_str())
    }
}

impl From<ShutdownEvent> for CancelReason {
    fn from(event: ShutdownEvent) -> Self {
        match event {
            #[cfg(unix)]
            ShutdownEvent::Hangup | ShutdownEvent::Term => CancelReason::Signal,
            ShutdownEvent::Interrupt => CancelReason::Interrupt,
        }
    }
}
