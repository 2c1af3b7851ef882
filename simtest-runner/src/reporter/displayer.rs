// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints human-readable progress for a simulated run.

use crate::{
    list::{MARKERS, TestPlan},
    reporter::events::CancelReason,
    runner::RunStats,
};
use owo_colors::{OwoColorize, Style};
use simtest_metadata::{RunReport, RunStatus};
use std::io::{self, Write};
use swrite::{SWrite, swrite};

/// Writes console output for run events.
///
/// One line per snapshot write, plus the startup banner and terminal
/// messages. The report file carries the full state; the console is a
/// human-scale summary of it.
#[derive(Debug, Default)]
pub(crate) struct RunDisplayer {
    styles: Styles,
    cancel_seen: bool,
}

impl RunDisplayer {
    pub(crate) fn new(colorize: bool) -> Self {
        let mut styles = Styles::default();
        if colorize {
            styles.colorize();
        }
        Self {
            styles,
            cancel_seen: false,
        }
    }

    pub(crate) fn write_run_started(
        &self,
        plan: &TestPlan,
        report: &RunReport,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(writer, "Available markers:")?;
        for marker in &MARKERS {
            let selected = plan
                .selected_markers()
                .iter()
                .any(|label| label == marker.name);
            write!(
                writer,
                "  {}: {}",
                marker.name.style(self.styles.marker),
                marker.description,
            )?;
            if selected {
                write!(writer, " {}", "[SELECTED]".style(self.styles.selected))?;
            }
            writeln!(writer)?;
        }
        writeln!(writer)?;

        if plan.selected_markers().is_empty() {
            writeln!(writer, "Starting test execution for all tests...")?;
        } else {
            writeln!(
                writer,
                "Starting test execution for markers: {}",
                plan.selected_markers().join(", "),
            )?;
        }

        self.write_progress_line(report, writer)
    }

    pub(crate) fn write_case_started(
        &self,
        plan: &TestPlan,
        index: usize,
        total: usize,
        report: &RunReport,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        let case = plan.case(index);
        writeln!(
            writer,
            "Running test {}/{}: {} (markers: {})",
            index + 1,
            total,
            case.name().style(self.styles.count),
            case.marker().name,
        )?;
        self.write_progress_line(report, writer)
    }

    pub(crate) fn write_case_finished(
        &self,
        report: &RunReport,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        self.write_progress_line(report, writer)
    }

    pub(crate) fn write_cancel(
        &mut self,
        reason: CancelReason,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        self.cancel_seen = true;
        writeln!(
            writer,
            "\n{} ({reason})...",
            "Stopping test execution".style(self.styles.fail),
        )
    }

    pub(crate) fn write_run_finished(
        &self,
        stats: &RunStats,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        if self.cancel_seen {
            writeln!(
                writer,
                "{}: {}/{} tests completed",
                "Test run stopped".style(self.styles.fail),
                stats.finished_count.style(self.styles.count),
                stats.initial_run_count.style(self.styles.count),
            )
        } else {
            writeln!(
                writer,
                "{}",
                "All selected tests completed!".style(self.styles.pass),
            )
        }
    }

    /// The one-line progress summary accompanying every snapshot write.
    fn write_progress_line(&self, report: &RunReport, writer: &mut dyn Write) -> io::Result<()> {
        let mut line = String::new();
        if report.status == RunStatus::Running {
            swrite!(
                line,
                "Updated: {} passed, {} failed, {} errors, {} skipped, {} in progress, {} not started",
                report.passed.style(self.styles.pass),
                report.failed.style(self.styles.fail),
                report.error.style(self.styles.error),
                report.skipped.style(self.styles.skip),
                report.inprogress.style(self.styles.count),
                report.not_started().style(self.styles.count),
            );
            swrite!(
                line,
                " ({} selected, {} not tested) - Elapsed: {}",
                report.selected_count(),
                report.not_tested,
                report.overall_time,
            );
        } else {
            swrite!(
                line,
                "Completed: {} passed, {} failed, {} errors, {} skipped",
                report.passed.style(self.styles.pass),
                report.failed.style(self.styles.fail),
                report.error.style(self.styles.error),
                report.skipped.style(self.styles.skip),
            );
            swrite!(
                line,
                " ({} total selected, {} not tested) - Total execution time: {}",
                report.selected_count(),
                report.not_tested,
                report.overall_time,
            );
        }
        writeln!(writer, "{line}")
    }
}

#[derive(Debug, Default)]
struct Styles {
    count: Style,
    pass: Style,
    fail: Style,
    error: Style,
    skip: Style,
    marker: Style,
    selected: Style,
}

impl Styles {
    fn colorize(&mut self) {
        self.count = Style::new().bold();
        self.pass = Style::new().green().bold();
        self.fail = Style::new().red().bold();
        self.error = Style::new().magenta().bold();
        self.skip = Style::new().yellow().bold();
        self.marker = Style::new().blue().bold();
        self.selected = Style::new().green().bold();
    }
}
