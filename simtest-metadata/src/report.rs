// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The report document written to disk after every state transition.
//!
//! The document is a full snapshot, not a delta: each write overwrites the
//! previous file. Field names and value strings are consumed by external
//! dashboards and must stay stable.

use crate::status::{CaseStatus, RunStatus, ScheduledOutcome};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of a simulated test run.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct RunReport {
    /// Overall run status.
    pub status: RunStatus,

    /// When the run started, as `YYYY-MM-DD HH:MM:SS`.
    pub start_time: String,

    /// When the run completed, as `YYYY-MM-DD HH:MM:SS`. Empty while the run
    /// is still in progress.
    pub end_time: String,

    /// Human-readable overall time. While running this is wall-clock time
    /// since the run began, suffixed with ` (elapsed)`; once completed it is
    /// the sum of individual case durations, formatted `MM:SS` or
    /// `HH:MM:SS`.
    pub overall_time: String,

    /// Sum of individual case durations in seconds. Zero while running.
    pub total_execution_seconds: u64,

    /// Number of cases that passed.
    pub passed: usize,

    /// Number of cases that failed.
    pub failed: usize,

    /// Number of cases that finished with an execution error.
    pub error: usize,

    /// Number of cases that were skipped.
    pub skipped: usize,

    /// Number of cases currently in progress.
    pub inprogress: usize,

    /// Number of cases excluded from this run by marker selection.
    pub not_tested: usize,

    /// The marker labels this run was restricted to. Empty means every marker
    /// was selected.
    pub selected_markers: Vec<String>,

    /// The full marker catalogue: label to human description, in catalogue
    /// order.
    pub available_markers: IndexMap<String, String>,

    /// Per-marker status counts, in catalogue order.
    pub marker_statistics: IndexMap<String, MarkerStats>,

    /// Every case in the plan, in roster order.
    pub tests: Vec<CaseReport>,
}

impl RunReport {
    /// Number of cases still waiting to start, summed over all markers.
    ///
    /// Not recorded as a top-level field of the document, but needed for
    /// progress reporting.
    pub fn not_started(&self) -> usize {
        self.marker_statistics
            .values()
            .map(|stats| stats.not_started)
            .sum()
    }

    /// Number of cases selected to run in this report: everything except the
    /// `Not Tested` ones.
    pub fn selected_count(&self) -> usize {
        self.passed + self.failed + self.error + self.skipped + self.inprogress
            + self.not_started()
    }
}

/// Status counts scoped to one marker.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct MarkerStats {
    /// Total cases carrying this marker.
    pub total: usize,

    /// Cases that passed.
    pub passed: usize,

    /// Cases that failed.
    pub failed: usize,

    /// Cases that finished with an execution error.
    pub error: usize,

    /// Cases that were skipped.
    pub skipped: usize,

    /// Cases currently in progress.
    pub in_progress: usize,

    /// Cases waiting to start.
    pub not_started: usize,

    /// Cases excluded by marker selection.
    pub not_tested: usize,
}

impl MarkerStats {
    /// Records one case with the given status.
    pub fn record(&mut self, status: CaseStatus) {
        self.total += 1;
        match status {
            CaseStatus::Passed => self.passed += 1,
            CaseStatus::Failed => self.failed += 1,
            CaseStatus::Error => self.error += 1,
            CaseStatus::Skipped => self.skipped += 1,
            CaseStatus::InProgress => self.in_progress += 1,
            CaseStatus::NotStarted => self.not_started += 1,
            CaseStatus::NotTested => self.not_tested += 1,
        }
    }
}

/// One test case as recorded in the report document.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct CaseReport {
    /// The case name, `test_<marker>_<n>`.
    pub name: String,

    /// Current lifecycle status.
    pub status: CaseStatus,

    /// Marker labels for this case. Always a single-element list in the
    /// current plan shape, kept as a list for consumer compatibility.
    pub markers: Vec<String>,

    /// The outcome this case was scheduled to report.
    pub predetermined_outcome: ScheduledOutcome,

    /// When the case started, as `YYYY-MM-DD HH:MM:SS`. Empty until it runs.
    pub start_time: String,

    /// When the case finished, as `YYYY-MM-DD HH:MM:SS`. Empty until
    /// terminal.
    pub end_time: String,

    /// End time minus start time, formatted `MM:SS` or `HH:MM:SS`. Empty
    /// until terminal.
    pub execution_time: String,

    /// Fabricated diagnostic text. Non-empty exactly when the status is
    /// `Failed` or `Error`.
    pub exception_log: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_case(name: &str, marker: &str, status: CaseStatus) -> CaseReport {
        CaseReport {
            name: name.to_owned(),
            status,
            markers: vec![marker.to_owned()],
            predetermined_outcome: ScheduledOutcome::Passed,
            start_time: String::new(),
            end_time: String::new(),
            execution_time: String::new(),
            exception_log: String::new(),
        }
    }

    fn sample_report() -> RunReport {
        let mut smoke = MarkerStats::default();
        smoke.record(CaseStatus::Passed);
        smoke.record(CaseStatus::InProgress);
        smoke.record(CaseStatus::NotStarted);
        let mut ui = MarkerStats::default();
        ui.record(CaseStatus::NotTested);

        RunReport {
            status: RunStatus::Running,
            start_time: "2024-03-09 14:00:00".to_owned(),
            end_time: String::new(),
            overall_time: "00:12 (elapsed)".to_owned(),
            total_execution_seconds: 0,
            passed: 1,
            failed: 0,
            error: 0,
            skipped: 0,
            inprogress: 1,
            not_tested: 1,
            selected_markers: vec!["smoke".to_owned()],
            available_markers: [
                ("smoke".to_owned(), "Quick smoke tests".to_owned()),
                ("ui".to_owned(), "User interface tests".to_owned()),
            ]
            .into_iter()
            .collect(),
            marker_statistics: [("smoke".to_owned(), smoke), ("ui".to_owned(), ui)]
                .into_iter()
                .collect(),
            tests: vec![
                sample_case("test_smoke_1", "smoke", CaseStatus::Passed),
                sample_case("test_smoke_2", "smoke", CaseStatus::InProgress),
                sample_case("test_smoke_3", "smoke", CaseStatus::NotStarted),
                sample_case("test_ui_1", "ui", CaseStatus::NotTested),
            ],
        }
    }

    #[test]
    fn derived_counts() {
        let report = sample_report();
        assert_eq!(report.not_started(), 1);
        assert_eq!(report.selected_count(), 3);
    }

    #[test]
    fn document_shape() {
        let report = sample_report();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["status"], "Running");
        assert_eq!(value["start_time"], "2024-03-09 14:00:00");
        assert_eq!(value["end_time"], "");
        assert_eq!(value["total_execution_seconds"], 0);
        assert_eq!(value["inprogress"], 1);
        assert_eq!(value["selected_markers"], serde_json::json!(["smoke"]));
        assert_eq!(value["available_markers"]["ui"], "User interface tests");
        assert_eq!(value["marker_statistics"]["smoke"]["in_progress"], 1);
        assert_eq!(value["marker_statistics"]["ui"]["not_tested"], 1);
        assert_eq!(value["tests"][1]["status"], "In Progress");
        assert_eq!(value["tests"][1]["markers"], serde_json::json!(["smoke"]));

        // Round-trips through the wire form.
        let parsed: RunReport = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn marker_maps_preserve_catalogue_order() {
        let report = sample_report();
        let keys: Vec<&String> = report.available_markers.keys().collect();
        assert_eq!(keys, ["smoke", "ui"]);
    }
}
