// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving a full simulated run through the reporter.
//!
//! All runs here use a zero time scale (no real sleeping) and the no-op
//! signal handler, with seeded RNGs for deterministic outcome placement.

use camino_tempfile::Utf8TempDir;
use pretty_assertions::assert_eq;
use rand::{SeedableRng, rngs::StdRng};
use simtest_metadata::{CaseStatus, RunReport, RunStatus};
use simtest_runner::{
    list::TestPlan,
    reporter::{RunEventKind, RunReporter, RunReporterBuilder},
    runner::{SimRunner, SimRunnerBuilder},
    signal::SignalHandlerKind,
};

struct Harness {
    dir: Utf8TempDir,
    runner: SimRunner<StdRng>,
    reporter: RunReporter<Vec<u8>>,
}

fn harness(selection: &[&str], seed: u64) -> Harness {
    let selection: Vec<String> = selection.iter().map(|s| s.to_string()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    let plan = TestPlan::build(&selection, &mut rng);

    let dir = Utf8TempDir::new().unwrap();
    let reporter = RunReporterBuilder::new()
        .set_report_path(dir.path().join("results.json"))
        .build(Vec::new());

    let runner = SimRunnerBuilder::new()
        .set_time_scale(0.0)
        .build(plan, SignalHandlerKind::Noop, rng)
        .unwrap();

    Harness {
        dir,
        runner,
        reporter,
    }
}

fn read_report(dir: &Utf8TempDir) -> RunReport {
    let raw = std::fs::read_to_string(dir.path().join("results.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn full_run_reaches_expected_outcome_distribution() {
    let Harness {
        dir,
        runner,
        mut reporter,
    } = harness(&[], 1);

    let stats = runner
        .try_execute(|event| reporter.write_event(&event))
        .unwrap();

    assert_eq!(stats.initial_run_count, 25);
    assert_eq!(stats.finished_count, 25);
    assert_eq!((stats.passed, stats.failed, stats.errors), (10, 10, 5));

    let report = read_report(&dir);
    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.passed, 10);
    assert_eq!(report.failed, 10);
    assert_eq!(report.error, 5);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.inprogress, 0);
    assert_eq!(report.not_tested, 0);
    assert!(!report.end_time.is_empty());
    assert_eq!(report.tests.len(), 25);

    // Every terminal case carries stamps; diagnostics exactly on failures
    // and errors.
    for test in &report.tests {
        assert!(test.status.is_terminal(), "{}", test.name);
        assert!(!test.start_time.is_empty(), "{}", test.name);
        assert!(!test.end_time.is_empty(), "{}", test.name);
        assert!(!test.execution_time.is_empty(), "{}", test.name);
        assert_eq!(
            !test.exception_log.is_empty(),
            matches!(test.status, CaseStatus::Failed | CaseStatus::Error),
            "{}",
            test.name,
        );
    }

    let console = String::from_utf8(reporter.into_writer()).unwrap();
    assert!(console.contains("Starting test execution for all tests..."));
    assert!(console.contains("Running test 1/25: test_smoke_1 (markers: smoke)"));
    assert!(console.contains("Completed: 10 passed, 10 failed, 5 errors, 0 skipped"));
    assert!(console.trim_end().ends_with("All selected tests completed!"));
}

#[test]
fn marker_selection_leaves_other_cases_untouched() {
    let Harness {
        dir,
        runner,
        mut reporter,
    } = harness(&["smoke"], 2);

    let stats = runner
        .try_execute(|event| reporter.write_event(&event))
        .unwrap();

    assert_eq!(stats.initial_run_count, 5);
    assert_eq!(stats.finished_count, 5);
    assert_eq!((stats.passed, stats.failed, stats.errors), (2, 2, 1));

    let report = read_report(&dir);
    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.not_tested, 20);
    assert_eq!(report.selected_count(), 5);
    assert_eq!(report.selected_markers, ["smoke"]);

    for test in report.tests.iter().filter(|t| t.markers != ["smoke"]) {
        assert_eq!(test.status, CaseStatus::NotTested);
        assert_eq!(test.start_time, "");
        assert_eq!(test.end_time, "");
        assert_eq!(test.execution_time, "");
        assert_eq!(test.exception_log, "");
    }
}

#[test]
fn midrun_snapshot_reports_running_state() {
    let Harness {
        dir,
        runner,
        mut reporter,
    } = harness(&[], 3);

    let mut checked = false;
    runner
        .try_execute(|event| {
            let kind = event.kind.clone();
            reporter.write_event(&event)?;
            // Right after the first case starts, the file on disk must show
            // a running snapshot with that case in progress.
            if !checked && matches!(kind, RunEventKind::CaseStarted { .. }) {
                checked = true;
                let report = read_report(&dir);
                assert_eq!(report.status, RunStatus::Running);
                assert_eq!(report.inprogress, 1);
                assert_eq!(report.end_time, "");
                assert_eq!(report.total_execution_seconds, 0);
                assert!(report.overall_time.ends_with(" (elapsed)"));
            }
            Ok::<(), simtest_runner::errors::WriteEventError>(())
        })
        .unwrap();
    assert!(checked);
}

#[test]
fn stop_request_drains_current_case_and_halts() {
    let Harness {
        dir,
        runner,
        mut reporter,
    } = harness(&["smoke"], 4);

    let stop = runner.stop_signal();
    let mut finished = 0;
    let mut cancel_events = 0;
    let stats = runner
        .try_execute(|event| {
            match event.kind {
                RunEventKind::CaseFinished { .. } => {
                    finished += 1;
                    if finished == 3 {
                        stop.request();
                    }
                }
                RunEventKind::RunBeginCancel { .. } => cancel_events += 1,
                _ => {}
            }
            reporter.write_event(&event)
        })
        .unwrap();

    assert_eq!(stats.finished_count, 3);
    assert_eq!(stats.initial_run_count, 5);
    assert!(!stats.is_complete());
    assert_eq!(cancel_events, 1);

    let report = read_report(&dir);
    // The interrupted run never completes: two smoke cases stay waiting.
    assert_eq!(report.status, RunStatus::Running);
    assert_eq!(report.not_started(), 2);
    assert_eq!(report.inprogress, 0);
    let terminal = report
        .tests
        .iter()
        .filter(|t| t.status.is_terminal())
        .count();
    assert_eq!(terminal, 3);

    let console = String::from_utf8(reporter.into_writer()).unwrap();
    assert!(console.contains("Stopping test execution (stop requested)..."));
    assert!(console.trim_end().ends_with("Test run stopped: 3/5 tests completed"));
}
