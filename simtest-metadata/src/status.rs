// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status vocabulary for simulated test runs.
//!
//! The serialized forms are Title Case strings ("Not Started", "In Progress",
//! ...) because that is what report consumers key off of. Keep them stable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle status of a single simulated test case.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum CaseStatus {
    /// The case is eligible to run but hasn't started yet.
    #[serde(rename = "Not Started")]
    NotStarted,

    /// The case's marker was not selected for this run. Permanent.
    #[serde(rename = "Not Tested")]
    NotTested,

    /// The case is currently executing.
    #[serde(rename = "In Progress")]
    InProgress,

    /// The case finished and passed.
    Passed,

    /// The case finished and failed.
    Failed,

    /// The case finished with an execution error.
    Error,

    /// The case was skipped.
    Skipped,
}

impl CaseStatus {
    /// String representations of all known variants.
    pub fn variants() -> &'static [&'static str] {
        &[
            "Not Started",
            "Not Tested",
            "In Progress",
            "Passed",
            "Failed",
            "Error",
            "Skipped",
        ]
    }

    /// Returns true if this status is terminal: the case finished running and
    /// will not transition again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            CaseStatus::Passed | CaseStatus::Failed | CaseStatus::Error | CaseStatus::Skipped
        )
    }

    /// Returns true if the case still counts towards an in-flight run: it is
    /// waiting to run or currently running.
    pub fn is_pending(self) -> bool {
        matches!(self, CaseStatus::NotStarted | CaseStatus::InProgress)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CaseStatus::NotStarted => "Not Started",
            CaseStatus::NotTested => "Not Tested",
            CaseStatus::InProgress => "In Progress",
            CaseStatus::Passed => "Passed",
            CaseStatus::Failed => "Failed",
            CaseStatus::Error => "Error",
            CaseStatus::Skipped => "Skipped",
        };
        write!(f, "{s}")
    }
}

/// The outcome a case is scheduled to report, fixed at plan construction time
/// rather than determined by running anything.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum ScheduledOutcome {
    /// The case will report success.
    Passed,

    /// The case will report an assertion-style failure.
    Failed,

    /// The case will report an execution error.
    Error,

    /// The case will never run because its marker wasn't selected.
    #[serde(rename = "Not Tested")]
    NotTested,
}

impl ScheduledOutcome {
    /// Converts the outcome into the terminal [`CaseStatus`] a finished case
    /// reports.
    pub fn to_status(self) -> CaseStatus {
        match self {
            ScheduledOutcome::Passed => CaseStatus::Passed,
            ScheduledOutcome::Failed => CaseStatus::Failed,
            ScheduledOutcome::Error => CaseStatus::Error,
            ScheduledOutcome::NotTested => CaseStatus::NotTested,
        }
    }

    /// Returns true if a case with this outcome carries a diagnostic log once
    /// it finishes.
    pub fn has_diagnostics(self) -> bool {
        matches!(self, ScheduledOutcome::Failed | ScheduledOutcome::Error)
    }
}

impl fmt::Display for ScheduledOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScheduledOutcome::Passed => "Passed",
            ScheduledOutcome::Failed => "Failed",
            ScheduledOutcome::Error => "Error",
            ScheduledOutcome::NotTested => "Not Tested",
        };
        write!(f, "{s}")
    }
}

/// The overall status of a simulated run.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum RunStatus {
    /// At least one case is waiting to run or currently running.
    Running,

    /// No case is pending: the run is over.
    Completed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Running => write!(f, "Running"),
            RunStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(CaseStatus::NotStarted, "\"Not Started\"")]
    #[test_case(CaseStatus::NotTested, "\"Not Tested\"")]
    #[test_case(CaseStatus::InProgress, "\"In Progress\"")]
    #[test_case(CaseStatus::Passed, "\"Passed\"")]
    #[test_case(CaseStatus::Failed, "\"Failed\"")]
    #[test_case(CaseStatus::Error, "\"Error\"")]
    #[test_case(CaseStatus::Skipped, "\"Skipped\"")]
    fn case_status_wire_strings(status: CaseStatus, expected: &str) {
        assert_eq!(serde_json::to_string(&status).unwrap(), expected);
        let parsed: CaseStatus = serde_json::from_str(expected).unwrap();
        assert_eq!(parsed, status);
    }

    #[test]
    fn wire_strings_match_display() {
        for (status, s) in [
            (CaseStatus::NotStarted, "Not Started"),
            (CaseStatus::InProgress, "In Progress"),
            (CaseStatus::Skipped, "Skipped"),
        ] {
            assert_eq!(status.to_string(), s);
        }
        assert_eq!(RunStatus::Running.to_string(), "Running");
        assert_eq!(RunStatus::Completed.to_string(), "Completed");
        assert_eq!(ScheduledOutcome::NotTested.to_string(), "Not Tested");
    }

    #[test]
    fn terminal_and_pending_are_disjoint() {
        for s in [
            CaseStatus::NotStarted,
            CaseStatus::NotTested,
            CaseStatus::InProgress,
            CaseStatus::Passed,
            CaseStatus::Failed,
            CaseStatus::Error,
            CaseStatus::Skipped,
        ] {
            assert!(!(s.is_terminal() && s.is_pending()), "{s} is both");
        }
    }

    #[test]
    fn outcome_to_status() {
        assert_eq!(ScheduledOutcome::Passed.to_status(), CaseStatus::Passed);
        assert_eq!(ScheduledOutcome::Error.to_status(), CaseStatus::Error);
        assert!(ScheduledOutcome::Failed.has_diagnostics());
        assert!(!ScheduledOutcome::Passed.has_diagnostics());
    }
}
