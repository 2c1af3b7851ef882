// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The test plan: the fixed roster of simulated cases for a run.
//!
//! A plan is built once at startup and then mutated only by the runner as
//! cases progress through their lifecycle. Report snapshots are projections
//! of the plan, never separate state.

use chrono::{DateTime, Local};
use rand::{Rng, seq::SliceRandom};
use simtest_metadata::{
    CaseReport, CaseStatus, ScheduledOutcome, format_duration, format_timestamp,
};
use std::ops::RangeInclusive;

/// Number of cases generated for each marker.
pub const TESTS_PER_MARKER: usize = 5;

/// A marker: a label grouping related test cases, with a human description
/// and the simulated latency band for cases carrying it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarkerDef {
    /// The marker label.
    pub name: &'static str,

    /// Human-readable description, shown in the startup banner and recorded
    /// in the report catalogue.
    pub description: &'static str,

    /// Simulated per-case execution time, in whole seconds. UI and
    /// performance cases take longer than smoke cases.
    pub latency_secs: RangeInclusive<u64>,
}

impl MarkerDef {
    /// Looks a marker up by label.
    pub fn find(name: &str) -> Option<&'static MarkerDef> {
        MARKERS.iter().find(|marker| marker.name == name)
    }
}

/// The fixed marker catalogue, in the order markers appear in reports.
pub static MARKERS: [MarkerDef; 5] = [
    MarkerDef {
        name: "smoke",
        description: "Quick smoke tests for basic functionality",
        latency_secs: 1..=3,
    },
    MarkerDef {
        name: "regression",
        description: "Comprehensive regression tests",
        latency_secs: 2..=6,
    },
    MarkerDef {
        name: "ui",
        description: "User interface tests",
        latency_secs: 5..=10,
    },
    MarkerDef {
        name: "performance",
        description: "Performance and load tests",
        latency_secs: 8..=15,
    },
    MarkerDef {
        name: "security",
        description: "Security and authentication tests",
        latency_secs: 2..=6,
    },
];

/// One simulated test case.
#[derive(Clone, Debug)]
pub struct TestCase {
    name: String,
    marker: &'static MarkerDef,
    status: CaseStatus,
    outcome: ScheduledOutcome,
    start_time: Option<DateTime<Local>>,
    end_time: Option<DateTime<Local>>,
    exception_log: Option<String>,
}

impl TestCase {
    /// The case name, `test_<marker>_<n>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The marker this case carries.
    pub fn marker(&self) -> &'static MarkerDef {
        self.marker
    }

    /// Current lifecycle status.
    pub fn status(&self) -> CaseStatus {
        self.status
    }

    /// The outcome this case is scheduled to report.
    pub fn outcome(&self) -> ScheduledOutcome {
        self.outcome
    }

    /// Returns true if this case will run: its marker was selected.
    pub fn is_eligible(&self) -> bool {
        self.status != CaseStatus::NotTested
    }

    /// End time minus start time in whole seconds, defined once the case is
    /// terminal.
    ///
    /// Computed over epoch seconds so it agrees exactly with the
    /// second-resolution timestamps recorded in the report.
    pub fn duration_secs(&self) -> Option<u64> {
        let (start, end) = (self.start_time?, self.end_time?);
        self.status
            .is_terminal()
            .then(|| (end.timestamp() - start.timestamp()).max(0) as u64)
    }

    /// Marks the case in progress.
    pub(crate) fn begin(&mut self, now: DateTime<Local>) {
        self.status = CaseStatus::InProgress;
        self.start_time = Some(now);
    }

    /// Applies the scheduled outcome as the final status.
    pub(crate) fn finish(&mut self, now: DateTime<Local>, exception_log: Option<String>) {
        debug_assert_eq!(
            exception_log.is_some(),
            self.outcome.has_diagnostics(),
            "diagnostics accompany exactly the Failed/Error outcomes",
        );
        self.status = self.outcome.to_status();
        self.end_time = Some(now);
        self.exception_log = exception_log;
    }

    /// Projects the case into its report form.
    pub fn to_report(&self) -> CaseReport {
        CaseReport {
            name: self.name.clone(),
            status: self.status,
            markers: vec![self.marker.name.to_owned()],
            predetermined_outcome: self.outcome,
            start_time: self.start_time.map(format_timestamp).unwrap_or_default(),
            end_time: self.end_time.map(format_timestamp).unwrap_or_default(),
            execution_time: self
                .duration_secs()
                .map(format_duration)
                .unwrap_or_default(),
            exception_log: self.exception_log.clone().unwrap_or_default(),
        }
    }
}

/// The full roster of cases for one run, plus the marker selection that
/// produced it.
#[derive(Clone, Debug)]
pub struct TestPlan {
    cases: Vec<TestCase>,
    selected_markers: Vec<String>,
}

impl TestPlan {
    /// Builds the plan for a run restricted to `selection`.
    ///
    /// An empty selection means every marker runs. For each marker in the
    /// catalogue, exactly [`TESTS_PER_MARKER`] cases are generated with a
    /// shuffled assignment of two passes, two failures and one error; cases
    /// of unselected markers are permanently `Not Tested`. Selection labels
    /// that don't name a catalogue marker select nothing and are logged.
    pub fn build(selection: &[String], rng: &mut impl Rng) -> Self {
        for label in selection {
            if MarkerDef::find(label).is_none() {
                tracing::warn!("selected marker `{label}` is not in the catalogue");
            }
        }

        let mut cases = Vec::with_capacity(MARKERS.len() * TESTS_PER_MARKER);
        for marker in &MARKERS {
            let mut outcomes = [
                ScheduledOutcome::Passed,
                ScheduledOutcome::Passed,
                ScheduledOutcome::Failed,
                ScheduledOutcome::Failed,
                ScheduledOutcome::Error,
            ];
            outcomes.shuffle(rng);

            let eligible =
                selection.is_empty() || selection.iter().any(|label| label == marker.name);
            for (index, &outcome) in outcomes.iter().enumerate() {
                cases.push(TestCase {
                    name: format!("test_{}_{}", marker.name, index + 1),
                    marker,
                    status: if eligible {
                        CaseStatus::NotStarted
                    } else {
                        CaseStatus::NotTested
                    },
                    outcome: if eligible {
                        outcome
                    } else {
                        ScheduledOutcome::NotTested
                    },
                    start_time: None,
                    end_time: None,
                    exception_log: None,
                });
            }
        }

        Self {
            cases,
            selected_markers: selection.to_vec(),
        }
    }

    /// All cases, in roster order.
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// One case by roster index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn case(&self, index: usize) -> &TestCase {
        &self.cases[index]
    }

    pub(crate) fn case_mut(&mut self, index: usize) -> &mut TestCase {
        &mut self.cases[index]
    }

    /// Total number of cases in the roster.
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Number of cases eligible to run under this plan's selection.
    pub fn run_count(&self) -> usize {
        self.cases.iter().filter(|case| case.is_eligible()).count()
    }

    /// The marker labels this run was restricted to, as given. Empty means
    /// everything runs.
    pub fn selected_markers(&self) -> &[String] {
        &self.selected_markers
    }
}
