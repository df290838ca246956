//! Proposal schedulers: which men-group proposes next.
//!
//! ## Batch policy
//!
//! [`BatchScheduler`] keeps an active batch of men-groups whose single count
//! exceeds `⌊single_men / (2m)⌋`. A popped group proposes once and is pushed
//! back while it stays above the (recomputed) threshold. When the batch runs
//! dry all `m` groups are rescanned once; each rescan is an *epoch*.
//!
//! The largest group always clears the threshold (`max ≥ S/m > S/(2m)`), so a
//! rebuild on a non-exhausted ledger is never empty.
//!
//! ## Reference policy
//!
//! [`LinearScanScheduler`] picks the argmax of `single(i)` on every step. It
//! is asymptotically slower but trivially correct, and is kept to tell
//! correctness bugs apart from performance regressions.
//!
//! ## Tie-break
//!
//! [`LinearScanScheduler`] takes the lowest index among equal single counts.
//! [`BatchScheduler`] does so only when it rebuilds the batch; between
//! rebuilds the group that just proposed stays on top while it clears the
//! threshold, ahead of lower-index groups that have caught up with it.

use log::trace;

use crate::ledger::QuotaLedger;

/// Chooses the next proposing men-group.
pub trait ProposalScheduler {
    /// Create a scheduler for `men_groups` groups.
    fn for_groups(men_groups: usize) -> Self
    where
        Self: Sized;

    /// A men-group with `single > 0`, or `None` once the ledger is exhausted.
    fn next_proposer(&mut self, ledger: &QuotaLedger) -> Option<usize>;

    /// Called after the engine processed one proposal for `men_group`.
    fn record_step(&mut self, men_group: usize, ledger: &QuotaLedger);

    /// Number of full scans over all men-groups so far.
    fn epochs(&self) -> u64;
}

// ============================================================================
// Batch scheduler
// ============================================================================

/// Amortized scheduler: O(m) per epoch instead of per proposal.
#[derive(Debug, Clone, Default)]
pub struct BatchScheduler {
    men_groups: usize,
    /// Stack of active groups; the top proposes next
    batch: Vec<usize>,
    epochs: u64,
}

impl BatchScheduler {
    /// Activation threshold `⌊single_men / (2m)⌋`.
    ///
    /// A single group is always active while it has singles.
    #[inline]
    pub fn threshold(&self, ledger: &QuotaLedger) -> u64 {
        if self.men_groups <= 1 {
            return 0;
        }
        ledger.single_men() / (2 * self.men_groups as u64)
    }

    /// Number of groups waiting in the active batch
    #[inline]
    pub fn active(&self) -> usize {
        self.batch.len()
    }

    /// Rescan every group. Returns whether anything was activated.
    fn rebuild(&mut self, ledger: &QuotaLedger) -> bool {
        let threshold = self.threshold(ledger);
        self.epochs += 1;

        // Descending push so the lowest index sits on top
        self.batch.extend(
            (0..self.men_groups)
                .rev()
                .filter(|&i| u64::from(ledger.single(i)) > threshold),
        );

        trace!(
            "epoch {}: threshold {}, {} active of {} groups, {} single",
            self.epochs,
            threshold,
            self.batch.len(),
            self.men_groups,
            ledger.single_men()
        );
        !self.batch.is_empty()
    }
}

impl ProposalScheduler for BatchScheduler {
    fn for_groups(men_groups: usize) -> Self {
        Self {
            men_groups,
            batch: Vec::with_capacity(men_groups),
            epochs: 0,
        }
    }

    fn next_proposer(&mut self, ledger: &QuotaLedger) -> Option<usize> {
        if ledger.is_exhausted() {
            return None;
        }
        loop {
            match self.batch.pop() {
                Some(i) if ledger.single(i) > 0 => return Some(i),
                Some(_) => continue,
                None => {
                    if !self.rebuild(ledger) {
                        return None;
                    }
                }
            }
        }
    }

    fn record_step(&mut self, men_group: usize, ledger: &QuotaLedger) {
        if u64::from(ledger.single(men_group)) > self.threshold(ledger) {
            self.batch.push(men_group);
        }
    }

    #[inline]
    fn epochs(&self) -> u64 {
        self.epochs
    }
}

// ============================================================================
// Linear scan scheduler (reference)
// ============================================================================

/// Reference scheduler: full argmax scan on every step.
#[derive(Debug, Clone, Default)]
pub struct LinearScanScheduler {
    men_groups: usize,
    scans: u64,
}

impl ProposalScheduler for LinearScanScheduler {
    fn for_groups(men_groups: usize) -> Self {
        Self {
            men_groups,
            scans: 0,
        }
    }

    fn next_proposer(&mut self, ledger: &QuotaLedger) -> Option<usize> {
        if ledger.is_exhausted() {
            return None;
        }
        self.scans += 1;

        let mut best = 0;
        for i in 1..self.men_groups {
            if ledger.single(i) > ledger.single(best) {
                best = i;
            }
        }
        Some(best)
    }

    fn record_step(&mut self, _men_group: usize, _ledger: &QuotaLedger) {}

    #[inline]
    fn epochs(&self) -> u64 {
        self.scans
    }
}
