//! Matching engine: the deferred-acceptance loop over groups.
//!
//! ## State machine
//!
//! ```text
//! SELECT ──> PROPOSE ──┬──> MATCH     (open seats at j)
//!   ^                  ├──> DISPLACE  (j full, j prefers i over its worst k)
//!   │                  └──> REJECT    (j full, worst k at least as good as i)
//!   └──────────────────────────┘      until single_men == 0
//! ```
//!
//! Each step moves bulk quota, never individuals. A REJECT advances the
//! proposer's cursor, so there are at most `m·w` of them.

use std::marker::PhantomData;

use log::debug;

use crate::engine::{BatchScheduler, LinearScanScheduler, ProposalScheduler};
use crate::error::{MatchingError, Result};
use crate::ledger::{EngagementRegistry, PreferenceIndex, QuotaLedger, QuotaSource};
use crate::types::instance::check_capacities;
use crate::types::{AllocationMatrix, GroupId, Instance, Quota};

/// Outcome of a single proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Quota moved into open seats
    Match,
    /// Quota taken over from a less preferred men-group
    Displace,
    /// Proposal refused; the proposer moves down its list
    Reject,
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Proposals processed
    pub steps: u64,
    pub matches: u64,
    pub displacements: u64,
    pub rejections: u64,
    /// Full scheduler scans
    pub epochs: u64,
}

impl MatchStats {
    #[inline]
    fn record(&mut self, step: Step) {
        self.steps += 1;
        match step {
            Step::Match => self.matches += 1,
            Step::Displace => self.displacements += 1,
            Step::Reject => self.rejections += 1,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// The stable allocation
    pub allocation: AllocationMatrix,
    /// Individuals per side
    pub population: u64,
    pub stats: MatchStats,
}

/// Grouped Gale–Shapley engine, parameterized by its proposal scheduler.
///
/// The engine itself holds no state between runs; every call to
/// [`run`](Self::run) or [`solve`](Self::solve) builds its own index,
/// ledger, registry and scheduler.
///
/// ## Example
///
/// ```
/// use group_stable_match::MatchingEngine;
/// use group_stable_match::types::Instance;
///
/// let instance = Instance::new(
///     vec![3, 2],
///     vec![2, 3],
///     vec![vec![0, 1], vec![0, 1]],
///     vec![vec![1, 0], vec![0, 1]],
/// ).unwrap();
///
/// let outcome = MatchingEngine::new().run(&instance).unwrap();
/// assert_eq!(outcome.allocation.to_rows(), vec![vec![0, 3], vec![2, 0]]);
/// ```
#[derive(Debug, Clone)]
pub struct MatchingEngine<S = BatchScheduler> {
    _scheduler: PhantomData<S>,
}

impl MatchingEngine<BatchScheduler> {
    /// Engine with the amortized batch scheduler
    pub fn new() -> Self {
        Self::with_scheduler()
    }
}

impl Default for MatchingEngine<BatchScheduler> {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine<LinearScanScheduler> {
    /// Engine with the linear-scan reference scheduler
    pub fn reference() -> Self {
        Self::with_scheduler()
    }
}

impl<S: ProposalScheduler> MatchingEngine<S> {
    /// Engine with an explicit scheduler type
    pub fn with_scheduler() -> Self {
        Self {
            _scheduler: PhantomData,
        }
    }

    /// Solve an owned instance.
    pub fn run(&self, instance: &Instance) -> Result<MatchOutcome> {
        self.solve(
            instance.men_capacity(),
            instance.women_capacity(),
            instance.men_prefs(),
            instance.women_prefs(),
        )
    }

    /// Validate the inputs, then run the proposal loop to exhaustion.
    ///
    /// # Errors
    ///
    /// - `InvalidInstance` if capacities are zero or unbalanced, or a
    ///   preference list is malformed
    /// - `ResourceExhaustion` if an m×w table cannot be allocated
    ///
    /// Nothing is mutated before validation succeeds.
    pub fn solve(
        &self,
        men_capacity: &[Quota],
        women_capacity: &[Quota],
        men_prefs: &[Vec<GroupId>],
        women_prefs: &[Vec<GroupId>],
    ) -> Result<MatchOutcome> {
        let m = men_capacity.len();
        let w = women_capacity.len();

        let population = check_capacities(men_capacity, women_capacity)?;
        let index = PreferenceIndex::build(men_prefs, women_prefs, m, w)?;
        let mut ledger = QuotaLedger::new(men_capacity, women_capacity)?;

        debug!("matching start: m = {}, w = {}, n = {}", m, w, population);

        let stats = Self::propose_until_exhausted(&index, &mut ledger)?;

        debug!(
            "matching done: {} steps ({} match, {} displace, {} reject), {} epochs",
            stats.steps, stats.matches, stats.displacements, stats.rejections, stats.epochs
        );

        Ok(MatchOutcome {
            allocation: ledger.into_allocation(),
            population,
            stats,
        })
    }

    fn propose_until_exhausted(index: &PreferenceIndex, ledger: &mut QuotaLedger) -> Result<MatchStats> {
        let mut registry = EngagementRegistry::new(index);
        let mut scheduler = S::for_groups(index.men_groups());
        let mut next_pref = vec![0usize; index.men_groups()];
        let mut stats = MatchStats::default();

        while let Some(i) = scheduler.next_proposer(ledger) {
            let j = index
                .men_choice(i, next_pref[i])
                .ok_or(MatchingError::ProposalsExhausted { men_group: i })?;
            let wanted = ledger.single(i);

            let step = if ledger.open_seats(j) > 0 {
                ledger.transfer_quota(i, j, wanted, QuotaSource::OpenSeats);
                registry.note_engaged(j, i);
                Step::Match
            } else {
                match registry.least_preferred(j) {
                    Some(k) if index.prefers(j, i, k) => {
                        ledger.transfer_quota(i, j, wanted, QuotaSource::Displace(k));
                        registry.note_engaged(j, i);
                        registry.drop_if_exhausted(ledger, j, k);
                        Step::Displace
                    }
                    _ => {
                        next_pref[i] += 1;
                        Step::Reject
                    }
                }
            };

            stats.record(step);
            scheduler.record_step(i, ledger);
        }

        stats.epochs = scheduler.epochs();
        Ok(stats)
    }
}

/// Compute a group-level stable matching.
///
/// Entry point for callers that hold plain slices; equivalent to
/// `MatchingEngine::new().solve(..)` without the run statistics.
///
/// ```
/// use group_stable_match::compute_stable_matching;
///
/// let matrix = compute_stable_matching(&[5], &[5], &[vec![0]], &[vec![0]]).unwrap();
/// assert_eq!(matrix.to_rows(), vec![vec![5]]);
/// ```
pub fn compute_stable_matching(
    men_capacity: &[Quota],
    women_capacity: &[Quota],
    men_prefs: &[Vec<GroupId>],
    women_prefs: &[Vec<GroupId>],
) -> Result<AllocationMatrix> {
    MatchingEngine::new()
        .solve(men_capacity, women_capacity, men_prefs, women_prefs)
        .map(|outcome| outcome.allocation)
}
