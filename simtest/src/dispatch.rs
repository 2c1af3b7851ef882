// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::OutputOpts;
use clap::Parser;
use color_eyre::Result;
use simtest_runner::{
    list::TestPlan,
    reporter::RunReporterBuilder,
    runner::SimRunnerBuilder,
    signal::SignalHandlerKind,
};
use std::io;

/// Simulates a pytest-style test run and streams a JSON status report.
///
/// A fixed roster of test cases with predetermined outcomes is "executed"
/// with artificial delays. After every state transition the full run state is
/// written to `results.json` in the working directory, so a dashboard polling
/// that file sees a live run. An interrupt stops the run at the next case
/// boundary; the in-flight case drains first.
#[derive(Debug, Parser)]
#[command(name = "simtest", version)]
pub struct SimtestApp {
    /// Comma-separated list of markers to run (e.g. "smoke,ui,security").
    /// Absent or empty means every marker runs.
    #[arg(short = 'm', long, value_name = "MARKERS")]
    markers: Option<String>,

    #[command(flatten)]
    output: OutputOpts,
}

impl SimtestApp {
    /// Executes the app.
    pub fn exec(self) -> Result<()> {
        let output = self.output.init();
        let selection = parse_selection(self.markers.as_deref());

        let mut rng = rand::rng();
        let plan = TestPlan::build(&selection, &mut rng);

        let mut reporter = RunReporterBuilder::new()
            .set_colorize(output.color.should_colorize())
            .build(io::stdout());

        let runner = SimRunnerBuilder::new().build(plan, SignalHandlerKind::Standard, rng)?;
        let stats = runner.try_execute(|event| reporter.write_event(&event))?;

        tracing::debug!(
            finished = stats.finished_count,
            passed = stats.passed,
            failed = stats.failed,
            errors = stats.errors,
            complete = stats.is_complete(),
            "run finished",
        );
        Ok(())
    }
}

/// Splits the `--markers` value into individual labels, trimming whitespace
/// and dropping empty segments.
fn parse_selection(markers: Option<&str>) -> Vec<String> {
    markers
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_owned)
        .collect()
}
