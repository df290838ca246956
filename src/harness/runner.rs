//! Timed, isolated execution of single instances.
//!
//! Each instance is solved on its own worker thread. The runner waits up to
//! the configured timeout; a worker that overruns is left detached and the
//! run is recorded as a timeout. A panic in the worker is caught through the
//! join handle and recorded as a crash. Either way the next run starts with
//! a fresh thread.

use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::engine::{MatchOutcome, MatchingEngine};
use crate::error::{MatchingError, Result};
use crate::harness::verifier::{verify, VerificationFailure};
use crate::types::{GroupId, Instance, MatchingReceipt, Quota};

/// Verdict for one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Solved within the budget and verified
    Success {
        elapsed: Duration,
        receipt: MatchingReceipt,
    },
    /// No answer within the budget
    Timeout { limit: Duration },
    /// The worker panicked or could not be started
    Crashed { message: String },
    /// The engine returned an error
    Rejected(MatchingError),
    /// The engine returned an allocation that failed verification
    Invalid(VerificationFailure),
}

impl RunOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }
}

/// Solver executed on the worker thread.
type Solver = fn(&Instance) -> Result<MatchOutcome>;

fn solve_batch(instance: &Instance) -> Result<MatchOutcome> {
    MatchingEngine::new().run(instance)
}

/// Runs instances one at a time and keeps the tally.
#[derive(Clone)]
pub struct Runner {
    solver: Solver,
    timeout: Duration,
    stop_on_failure: bool,
    /// Instances below this population are logged in full on failure
    dump_below: u64,
    successes: u64,
    failures: u64,
}

impl Runner {
    pub fn new(timeout: Duration, stop_on_failure: bool, dump_below: u64) -> Self {
        Self {
            solver: solve_batch,
            timeout,
            stop_on_failure,
            dump_below,
            successes: 0,
            failures: 0,
        }
    }

    /// Replace the batch engine with another solver
    #[cfg(test)]
    pub(crate) fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    #[inline]
    pub fn successes(&self) -> u64 {
        self.successes
    }

    #[inline]
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// True once a failure occurred and the runner was asked to stop on it
    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop_on_failure && self.failures > 0
    }

    /// Build an instance from raw parts and run it.
    ///
    /// An instance that does not validate counts as a rejected run.
    pub fn run_parts(
        &mut self,
        men_capacity: &[Quota],
        women_capacity: &[Quota],
        men_prefs: Vec<Vec<GroupId>>,
        women_prefs: Vec<Vec<GroupId>>,
    ) -> RunOutcome {
        match Instance::new(
            men_capacity.to_vec(),
            women_capacity.to_vec(),
            men_prefs,
            women_prefs,
        ) {
            Ok(instance) => self.run(instance),
            Err(err) => {
                let outcome = RunOutcome::Rejected(err.into());
                warn!(
                    "m = {}, w = {}: FAILURE: {:?}",
                    men_capacity.len(),
                    women_capacity.len(),
                    outcome
                );
                self.failures += 1;
                outcome
            }
        }
    }

    /// Solve `instance` on a worker thread, then verify the result.
    pub fn run(&mut self, instance: Instance) -> RunOutcome {
        let instance = Arc::new(instance);
        let outcome = self.execute(Arc::clone(&instance));

        match &outcome {
            RunOutcome::Success { elapsed, receipt } => {
                self.successes += 1;
                info!(
                    "n = {}, m = {}, w = {}: SUCCESS in {:?} ({} steps, {} epochs)",
                    instance.population(),
                    instance.men_groups(),
                    instance.women_groups(),
                    elapsed,
                    receipt.steps,
                    receipt.epochs
                );
            }
            failure => {
                self.failures += 1;
                warn!(
                    "n = {}, m = {}, w = {}: FAILURE: {}",
                    instance.population(),
                    instance.men_groups(),
                    instance.women_groups(),
                    describe(failure)
                );
                if instance.population() < self.dump_below {
                    warn!("failing instance: {:?}", instance);
                }
            }
        }
        outcome
    }

    fn execute(&self, instance: Arc<Instance>) -> RunOutcome {
        let (tx, rx) = mpsc::channel::<(Result<MatchOutcome>, Duration)>();
        let worker = Arc::clone(&instance);
        let solver = self.solver;

        let handle = thread::Builder::new()
            .name("matching-worker".to_string())
            .spawn(move || {
                let start = Instant::now();
                let result = solver(&worker);
                // The runner may have given up already
                let _ = tx.send((result, start.elapsed()));
            });
        let handle = match handle {
            Ok(handle) => handle,
            Err(err) => {
                return RunOutcome::Crashed {
                    message: format!("failed to spawn worker: {}", err),
                }
            }
        };

        match rx.recv_timeout(self.timeout) {
            Ok((Ok(outcome), elapsed)) => {
                debug!("worker finished in {:?}", elapsed);
                match verify(&instance, &outcome.allocation) {
                    Ok(()) => RunOutcome::Success {
                        elapsed,
                        receipt: MatchingReceipt::new(&outcome.allocation, outcome.population, &outcome.stats),
                    },
                    Err(failure) => RunOutcome::Invalid(failure),
                }
            }
            Ok((Err(err), _)) => RunOutcome::Rejected(err),
            Err(RecvTimeoutError::Timeout) => {
                // Threads cannot be cancelled; the worker is detached
                drop(handle);
                RunOutcome::Timeout { limit: self.timeout }
            }
            Err(RecvTimeoutError::Disconnected) => {
                let message = match handle.join() {
                    Err(payload) => panic_message(payload.as_ref()),
                    Ok(()) => "worker exited without a result".to_string(),
                };
                RunOutcome::Crashed { message }
            }
        }
    }
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("timeout", &self.timeout)
            .field("stop_on_failure", &self.stop_on_failure)
            .field("dump_below", &self.dump_below)
            .field("successes", &self.successes)
            .field("failures", &self.failures)
            .finish()
    }
}

fn describe(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Success { elapsed, .. } => format!("success in {:?}", elapsed),
        RunOutcome::Timeout { limit } => format!("timeout after {:?}", limit),
        RunOutcome::Crashed { message } => format!("crashed: {}", message),
        RunOutcome::Rejected(err) => format!("rejected: {}", err),
        RunOutcome::Invalid(failure) => format!("invalid result: {}", failure),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
