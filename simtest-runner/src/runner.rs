// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The sequential runner: drives eligible cases through their lifecycle.
//!
//! Cases run strictly one at a time, in roster order, with simulated
//! latencies. The runner is the sole mutator of the plan; everything
//! observable happens through the [`RunEvent`]s it emits.

use crate::{
    diagnostics::synthesize_exception_log,
    errors::SimRunnerBuildError,
    list::TestPlan,
    reporter::{CancelReason, RunEvent, RunEventKind},
    signal::{SignalHandler, SignalHandlerKind},
    time::{StopwatchStart, stopwatch},
};
use chrono::Local;
use futures::future::FutureExt;
use rand::{Rng, RngExt};
use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
    time::Duration,
};

/// The pause inserted between consecutive cases, in seconds, before time
/// scaling.
const INTER_CASE_PAUSE_SECS: std::ops::RangeInclusive<f64> = 0.5..=2.0;

/// Builder for [`SimRunner`].
#[derive(Clone, Debug)]
pub struct SimRunnerBuilder {
    time_scale: f64,
}

impl Default for SimRunnerBuilder {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}

impl SimRunnerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scales every simulated delay (case latencies and inter-case pauses)
    /// by the given factor. `0.0` disables delays entirely, which is what
    /// tests and impatient demos want. Negative values are treated as zero.
    pub fn set_time_scale(&mut self, time_scale: f64) -> &mut Self {
        self.time_scale = time_scale.max(0.0);
        self
    }

    /// Creates a new runner over `plan`.
    pub fn build<R: Rng>(
        &self,
        plan: TestPlan,
        signal_handler: SignalHandlerKind,
        rng: R,
    ) -> Result<SimRunner<R>, SimRunnerBuildError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("simtest-runner-worker")
            .build()
            .map_err(SimRunnerBuildError::TokioRuntimeCreate)?;
        let _guard = runtime.enter();

        // signal_handler.build() must be called from within the guard.
        let signal_handler = signal_handler.build()?;

        Ok(SimRunner {
            plan,
            runtime,
            signal_handler,
            stop_signal: StopSignal::new(),
            rng,
            time_scale: self.time_scale,
        })
    }
}

/// Context for simulating a test run.
///
/// Created using [`SimRunnerBuilder::build`].
#[derive(Debug)]
pub struct SimRunner<R> {
    plan: TestPlan,
    runtime: tokio::runtime::Runtime,
    signal_handler: SignalHandler,
    stop_signal: StopSignal,
    rng: R,
    time_scale: f64,
}

impl<R: Rng> SimRunner<R> {
    /// Returns a handle that can be used to request a cooperative stop from
    /// outside the run.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop_signal.clone()
    }

    /// Simulates the run, blocking until it finishes or is cancelled.
    ///
    /// The callback is called with every event.
    pub fn execute<F>(self, mut callback: F) -> RunStats
    where
        F: FnMut(RunEvent<'_>),
    {
        self.try_execute::<Infallible, _>(|event| {
            callback(event);
            Ok(())
        })
        .expect("Err branch is infallible")
    }

    /// Simulates the run, blocking until it finishes or is cancelled.
    ///
    /// Accepts a callback that is called with every event. If the callback
    /// returns an error, the run stops and the error is propagated.
    pub fn try_execute<E, F>(self, mut callback: F) -> Result<RunStats, E>
    where
        F: FnMut(RunEvent<'_>) -> Result<(), E>,
    {
        let Self {
            mut plan,
            runtime,
            signal_handler,
            stop_signal,
            mut rng,
            time_scale,
        } = self;
        let mut signals = SignalSource {
            handler: signal_handler,
            done: false,
        };

        runtime.block_on(execute_loop(
            &mut plan,
            &mut signals,
            &stop_signal,
            &mut rng,
            time_scale,
            &mut callback,
        ))
    }
}

/// A cloneable handle for requesting a cooperative stop.
///
/// The runner observes stop requests at case boundaries only: an in-flight
/// case always drains to its terminal state first, and already-completed
/// cases are never rolled back.
#[derive(Clone, Debug, Default)]
pub struct StopSignal {
    requested: Arc<Mutex<Option<CancelReason>>>,
}

impl StopSignal {
    fn new() -> Self {
        Self::default()
    }

    /// Requests that the run stop at the next case boundary.
    pub fn request(&self) {
        self.request_with(CancelReason::StopRequested);
    }

    pub(crate) fn request_with(&self, reason: CancelReason) {
        let mut guard = self.requested.lock().expect("stop signal lock poisoned");
        // The first request wins.
        guard.get_or_insert(reason);
    }

    pub(crate) fn requested(&self) -> Option<CancelReason> {
        *self.requested.lock().expect("stop signal lock poisoned")
    }
}

/// Statistics for a simulated run.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct RunStats {
    /// The number of cases that were expected to run at the beginning.
    ///
    /// If the run is cancelled, this will be more than `finished_count` at
    /// the end.
    pub initial_run_count: usize,

    /// The number of cases that finished running.
    pub finished_count: usize,

    /// The number of cases that passed.
    pub passed: usize,

    /// The number of cases that failed.
    pub failed: usize,

    /// The number of cases that finished with an execution error.
    pub errors: usize,
}

impl RunStats {
    /// Returns true if every case that was expected to run finished.
    pub fn is_complete(&self) -> bool {
        self.finished_count == self.initial_run_count
    }

    fn on_case_finished(&mut self, outcome: simtest_metadata::ScheduledOutcome) {
        use simtest_metadata::ScheduledOutcome;

        self.finished_count += 1;
        match outcome {
            ScheduledOutcome::Passed => self.passed += 1,
            ScheduledOutcome::Failed => self.failed += 1,
            ScheduledOutcome::Error => self.errors += 1,
            // Not-tested cases never finish.
            ScheduledOutcome::NotTested => {}
        }
    }
}

/// A signal handler plus the knowledge that its streams have been exhausted,
/// so exhausted handlers can be disabled in `select!` guards instead of
/// spinning.
struct SignalSource {
    handler: SignalHandler,
    done: bool,
}

impl SignalSource {
    async fn recv(&mut self) -> Option<CancelReason> {
        if self.done {
            return None;
        }
        match self.handler.recv().await {
            Some(event) => Some(event.into()),
            None => {
                self.done = true;
                None
            }
        }
    }
}

async fn execute_loop<R, E, F>(
    plan: &mut TestPlan,
    signals: &mut SignalSource,
    stop_signal: &StopSignal,
    rng: &mut R,
    time_scale: f64,
    callback: &mut F,
) -> Result<RunStats, E>
where
    R: Rng,
    F: FnMut(RunEvent<'_>) -> Result<(), E>,
{
    let watch = stopwatch();
    let mut stats = RunStats {
        initial_run_count: plan.run_count(),
        ..RunStats::default()
    };
    let mut cancel_state: Option<CancelReason> = None;

    emit(plan, &watch, callback, RunEventKind::RunStarted)?;

    let total = plan.case_count();
    for index in 0..total {
        // Stop requests are observed at case boundaries only.
        if cancel_state.is_none() {
            if let Some(reason) = stop_signal.requested() {
                cancel_state = Some(reason);
                emit(plan, &watch, callback, RunEventKind::RunBeginCancel { reason })?;
            } else if let Some(Some(reason)) = signals.recv().now_or_never() {
                cancel_state = Some(reason);
                emit(plan, &watch, callback, RunEventKind::RunBeginCancel { reason })?;
            }
        }
        if cancel_state.is_some() {
            break;
        }

        if !plan.case(index).is_eligible() {
            continue;
        }

        let latency_secs = {
            let case = plan.case_mut(index);
            let band = case.marker().latency_secs.clone();
            case.begin(Local::now());
            rng.random_range(band)
        };
        emit(plan, &watch, callback, RunEventKind::CaseStarted { index, total })?;

        let latency = Duration::from_secs(latency_secs).mul_f64(time_scale);
        sleep_and_watch_signals(latency, plan, signals, &mut cancel_state, &watch, callback)
            .await?;

        {
            let now = Local::now();
            let case = plan.case_mut(index);
            let outcome = case.outcome();
            let exception_log = outcome.has_diagnostics().then(|| {
                synthesize_exception_log(case.marker(), outcome, case.name(), now, rng)
            });
            case.finish(now, exception_log);
            stats.on_case_finished(outcome);
        }
        emit(plan, &watch, callback, RunEventKind::CaseFinished { index, total })?;

        if cancel_state.is_none() {
            let pause = Duration::from_secs_f64(rng.random_range(INTER_CASE_PAUSE_SECS))
                .mul_f64(time_scale);
            sleep_and_watch_signals(pause, plan, signals, &mut cancel_state, &watch, callback)
                .await?;
        }
    }

    emit(plan, &watch, callback, RunEventKind::RunFinished { stats })?;
    Ok(stats)
}

/// Sleeps for `duration` while keeping an eye on the signal streams.
///
/// A shutdown signal observed mid-sleep records the cancel state and emits
/// the cancellation event immediately, but the sleep still runs to
/// completion: the in-flight case drains.
async fn sleep_and_watch_signals<E, F>(
    duration: Duration,
    plan: &TestPlan,
    signals: &mut SignalSource,
    cancel_state: &mut Option<CancelReason>,
    watch: &StopwatchStart,
    callback: &mut F,
) -> Result<(), E>
where
    F: FnMut(RunEvent<'_>) -> Result<(), E>,
{
    let sleep = tokio::time::sleep(duration);
    tokio::pin!(sleep);
    loop {
        let signals_active = !signals.done && cancel_state.is_none();
        tokio::select! {
            () = &mut sleep => return Ok(()),
            received = signals.recv(), if signals_active => {
                if let Some(reason) = received {
                    *cancel_state = Some(reason);
                    emit(plan, watch, callback, RunEventKind::RunBeginCancel { reason })?;
                }
            }
        }
    }
}

fn emit<E, F>(
    plan: &TestPlan,
    watch: &StopwatchStart,
    callback: &mut F,
    kind: RunEventKind,
) -> Result<(), E>
where
    F: FnMut(RunEvent<'_>) -> Result<(), E>,
{
    let snapshot = watch.snapshot();
    callback(RunEvent {
        timestamp: snapshot.end_time(),
        elapsed: snapshot.duration,
        plan,
        kind,
    })
}
