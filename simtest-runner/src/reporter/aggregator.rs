// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report-file management: deriving snapshots and writing them to disk.

use crate::{errors::WriteEventError, list::TestPlan};
use camino::Utf8PathBuf;
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use simtest_metadata::{
    CaseReport, MarkerStats, RunReport, RunStatus, format_duration, format_timestamp,
    parse_duration,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    time::Duration,
};

/// The well-known report file location, relative to the working directory.
pub const DEFAULT_REPORT_FILE: &str = "results.json";

/// Writes run snapshots to the report file.
///
/// The report file is overwritten on every write. The runner is the sole
/// writer; external readers poll the file and must tolerate reading a stale
/// snapshot.
#[derive(Clone, Debug)]
pub(crate) struct ReportAggregator {
    report_path: Utf8PathBuf,
}

impl ReportAggregator {
    pub(crate) fn new(report_path: Utf8PathBuf) -> Self {
        Self { report_path }
    }

    pub(crate) fn write_snapshot(&self, report: &RunReport) -> Result<(), WriteEventError> {
        let file = File::create(&self.report_path).map_err(|error| WriteEventError::Report {
            path: self.report_path.clone(),
            error,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, report).map_err(|error| WriteEventError::Json {
            path: self.report_path.clone(),
            error,
        })?;
        writer.flush().map_err(|error| WriteEventError::Report {
            path: self.report_path.clone(),
            error,
        })
    }
}

/// Projects the plan into a full report snapshot.
///
/// `start_time` is when the run began, `elapsed` the monotonic time since
/// then, and `now` the snapshot timestamp. Snapshots are derived fresh on
/// every write; nothing here is stored state.
pub(crate) fn snapshot_report(
    plan: &TestPlan,
    start_time: DateTime<Local>,
    elapsed: Duration,
    now: DateTime<Local>,
) -> RunReport {
    let tests: Vec<CaseReport> = plan.cases().iter().map(|case| case.to_report()).collect();

    let mut global = MarkerStats::default();
    for case in plan.cases() {
        global.record(case.status());
    }

    let mut available_markers = IndexMap::new();
    let mut marker_statistics = IndexMap::new();
    for marker in &crate::list::MARKERS {
        available_markers.insert(marker.name.to_owned(), marker.description.to_owned());

        let mut stats = MarkerStats::default();
        for case in plan.cases() {
            if case.marker().name == marker.name {
                stats.record(case.status());
            }
        }
        marker_statistics.insert(marker.name.to_owned(), stats);
    }

    let status = if global.not_started > 0 || global.in_progress > 0 {
        RunStatus::Running
    } else {
        RunStatus::Completed
    };

    // Sum the recorded per-case duration strings. A malformed entry is
    // skipped rather than failing the snapshot.
    let total_execution_seconds: u64 = tests
        .iter()
        .filter(|test| test.status.is_terminal() && !test.execution_time.is_empty())
        .filter_map(|test| parse_duration(&test.execution_time).ok())
        .sum();

    let overall_time = if status == RunStatus::Completed && total_execution_seconds > 0 {
        format_duration(total_execution_seconds)
    } else {
        format!("{} (elapsed)", format_duration(elapsed.as_secs()))
    };

    let end_time = match status {
        RunStatus::Completed => format_timestamp(now),
        RunStatus::Running => String::new(),
    };

    RunReport {
        status,
        start_time: format_timestamp(start_time),
        end_time,
        overall_time,
        total_execution_seconds: match status {
            RunStatus::Completed => total_execution_seconds,
            RunStatus::Running => 0,
        },
        passed: global.passed,
        failed: global.failed,
        error: global.error,
        skipped: global.skipped,
        inprogress: global.in_progress,
        not_tested: global.not_tested,
        selected_markers: plan.selected_markers().to_vec(),
        available_markers,
        marker_statistics,
        tests,
    }
}
