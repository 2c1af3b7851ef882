// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints out and persists run state.
//!
//! The main structure in this module is [`RunReporter`]: it consumes the
//! [`RunEvent`]s a runner produces, prints a human-readable progress line for
//! each, and writes a full [`RunReport`](simtest_metadata::RunReport)
//! snapshot to the report file after every state transition.

mod aggregator;
mod displayer;
mod events;

pub use aggregator::DEFAULT_REPORT_FILE;
pub use events::*;

use crate::errors::WriteEventError;
use aggregator::{ReportAggregator, snapshot_report};
use camino::Utf8PathBuf;
use displayer::RunDisplayer;
use simtest_metadata::RunReport;
use std::io::Write;

/// Builder for [`RunReporter`].
#[derive(Clone, Debug)]
pub struct RunReporterBuilder {
    colorize: bool,
    report_path: Utf8PathBuf,
}

impl Default for RunReporterBuilder {
    fn default() -> Self {
        Self {
            colorize: false,
            report_path: DEFAULT_REPORT_FILE.into(),
        }
    }
}

impl RunReporterBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether console output should be colorized.
    pub fn set_colorize(&mut self, colorize: bool) -> &mut Self {
        self.colorize = colorize;
        self
    }

    /// Sets the report file location, overriding
    /// [`DEFAULT_REPORT_FILE`].
    pub fn set_report_path(&mut self, report_path: impl Into<Utf8PathBuf>) -> &mut Self {
        self.report_path = report_path.into();
        self
    }

    /// Creates a new reporter writing console output to `writer`.
    pub fn build<W: Write>(&self, writer: W) -> RunReporter<W> {
        RunReporter {
            displayer: RunDisplayer::new(self.colorize),
            aggregator: ReportAggregator::new(self.report_path.clone()),
            writer,
        }
    }
}

/// Consumes run events, mirroring them to the console and the report file.
#[derive(Debug)]
pub struct RunReporter<W> {
    displayer: RunDisplayer,
    aggregator: ReportAggregator,
    writer: W,
}

impl<W: Write> RunReporter<W> {
    /// Handles one event.
    pub fn write_event(&mut self, event: &RunEvent<'_>) -> Result<(), WriteEventError> {
        match &event.kind {
            RunEventKind::RunStarted => {
                let report = self.snapshot(event);
                self.displayer
                    .write_run_started(event.plan, &report, &mut self.writer)
                    .map_err(WriteEventError::Io)?;
                self.aggregator.write_snapshot(&report)
            }
            RunEventKind::CaseStarted { index, total } => {
                let report = self.snapshot(event);
                self.displayer
                    .write_case_started(event.plan, *index, *total, &report, &mut self.writer)
                    .map_err(WriteEventError::Io)?;
                self.aggregator.write_snapshot(&report)
            }
            RunEventKind::CaseFinished { .. } => {
                let report = self.snapshot(event);
                self.displayer
                    .write_case_finished(&report, &mut self.writer)
                    .map_err(WriteEventError::Io)?;
                self.aggregator.write_snapshot(&report)
            }
            RunEventKind::RunBeginCancel { reason } => self
                .displayer
                .write_cancel(*reason, &mut self.writer)
                .map_err(WriteEventError::Io),
            RunEventKind::RunFinished { stats } => {
                let report = self.snapshot(event);
                self.aggregator.write_snapshot(&report)?;
                self.displayer
                    .write_run_finished(stats, &mut self.writer)
                    .map_err(WriteEventError::Io)
            }
        }
    }

    /// Consumes the reporter, returning the console writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn snapshot(&self, event: &RunEvent<'_>) -> RunReport {
        // The event timestamp is the stopwatch start plus the elapsed time,
        // so subtracting recovers the run start exactly.
        let start_time = event.timestamp - event.elapsed;
        snapshot_report(event.plan, start_time, event.elapsed, event.timestamp)
    }
}
