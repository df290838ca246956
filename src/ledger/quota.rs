//! Quota ledger: single men, open seats and the allocation matrix.
//!
//! ## Invariants
//!
//! After every transfer, for every men-group `i` and women-group `j`:
//!
//! ```text
//! Σ_j M[i][j] = capacity(i) - single(i)
//! Σ_i M[i][j] = capacity(j) - open_seats(j)
//! single_men  = Σ_i single(i)
//! ```
//!
//! Transfers clamp the requested amount to what is available on every side
//! they touch, so no counter can underflow.

use crate::error::Result;
use crate::types::{AllocationMatrix, Quota};

/// Where the quota moved into `M[i][j]` comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaSource {
    /// Unmatched seats of the women-group
    OpenSeats,
    /// Seats currently held by men-group `k`, which returns them to its singles
    Displace(usize),
}

/// All mutable counters of one matching run.
#[derive(Debug, Clone)]
pub struct QuotaLedger {
    single: Vec<Quota>,
    open_seats: Vec<Quota>,
    matrix: AllocationMatrix,
    single_men: u64,
}

impl QuotaLedger {
    /// Start with everybody single and every seat open.
    pub fn new(men_capacity: &[Quota], women_capacity: &[Quota]) -> Result<Self> {
        Ok(Self {
            single: men_capacity.to_vec(),
            open_seats: women_capacity.to_vec(),
            matrix: AllocationMatrix::zeroed(men_capacity.len(), women_capacity.len())?,
            single_men: men_capacity.iter().map(|&c| u64::from(c)).sum(),
        })
    }

    #[inline]
    pub fn men_groups(&self) -> usize {
        self.single.len()
    }

    #[inline]
    pub fn women_groups(&self) -> usize {
        self.open_seats.len()
    }

    /// Unmatched members of men-group `i`
    #[inline]
    pub fn single(&self, i: usize) -> Quota {
        self.single[i]
    }

    /// Unmatched seats of women-group `j`
    #[inline]
    pub fn open_seats(&self, j: usize) -> Quota {
        self.open_seats[j]
    }

    /// `M[i][j]`
    #[inline]
    pub fn allocation(&self, i: usize, j: usize) -> Quota {
        self.matrix.get(i, j)
    }

    /// Total unmatched men across all groups
    #[inline]
    pub fn single_men(&self) -> u64 {
        self.single_men
    }

    /// Whether every man is matched
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.single_men == 0
    }

    /// Move up to `requested` units from men-group `i`'s singles into `M[i][j]`.
    ///
    /// With [`QuotaSource::OpenSeats`] the units come out of `j`'s open seats.
    /// With [`QuotaSource::Displace`]`(k)` they come out of `M[k][j]` and go
    /// back to `k`'s singles; `single_men` is unchanged in that case.
    ///
    /// # Returns
    ///
    /// The amount actually moved: `requested` clamped to every source.
    ///
    /// ```
    /// use group_stable_match::ledger::{QuotaLedger, QuotaSource};
    ///
    /// let mut ledger = QuotaLedger::new(&[3, 2], &[2, 3]).unwrap();
    ///
    /// assert_eq!(ledger.transfer_quota(0, 0, 3, QuotaSource::OpenSeats), 2);
    /// assert_eq!(ledger.single(0), 1);
    /// assert_eq!(ledger.open_seats(0), 0);
    ///
    /// assert_eq!(ledger.transfer_quota(1, 0, 2, QuotaSource::Displace(0)), 2);
    /// assert_eq!(ledger.allocation(0, 0), 0);
    /// assert_eq!(ledger.single(0), 3);
    /// assert_eq!(ledger.single_men(), 3);
    /// ```
    pub fn transfer_quota(&mut self, i: usize, j: usize, requested: Quota, source: QuotaSource) -> Quota {
        let available = requested.min(self.single[i]);

        let amount = match source {
            QuotaSource::OpenSeats => {
                let amount = available.min(self.open_seats[j]);
                self.open_seats[j] -= amount;
                self.single_men -= u64::from(amount);
                amount
            }
            QuotaSource::Displace(k) if k == i => 0,
            QuotaSource::Displace(k) => {
                let held = self.matrix.get_mut(k, j);
                let amount = available.min(*held);
                *held -= amount;
                self.single[k] += amount;
                amount
            }
        };

        self.single[i] -= amount;
        *self.matrix.get_mut(i, j) += amount;
        amount
    }

    /// Read-only view of the matrix
    #[inline]
    pub fn matrix(&self) -> &AllocationMatrix {
        &self.matrix
    }

    /// Hand the matrix to the caller
    pub fn into_allocation(self) -> AllocationMatrix {
        self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sums(ledger: &QuotaLedger, men: &[Quota], women: &[Quota]) {
        for (i, &capacity) in men.iter().enumerate() {
            assert_eq!(
                ledger.matrix().row_sum(i),
                u64::from(capacity - ledger.single(i)),
                "row {} out of balance",
                i
            );
        }
        for (j, &capacity) in women.iter().enumerate() {
            assert_eq!(
                ledger.matrix().column_sum(j),
                u64::from(capacity - ledger.open_seats(j)),
                "column {} out of balance",
                j
            );
        }
        let singles: u64 = (0..ledger.men_groups()).map(|i| u64::from(ledger.single(i))).sum();
        assert_eq!(ledger.single_men(), singles);
    }

    #[test]
    fn test_ledger_new() {
        let ledger = QuotaLedger::new(&[3, 2], &[4, 1]).unwrap();

        assert_eq!(ledger.men_groups(), 2);
        assert_eq!(ledger.women_groups(), 2);
        assert_eq!(ledger.single_men(), 5);
        assert_eq!(ledger.single(1), 2);
        assert_eq!(ledger.open_seats(0), 4);
        assert!(!ledger.is_exhausted());
    }

    #[test]
    fn test_transfer_from_open_seats_clamps() {
        let men = [3, 2];
        let women = [2, 3];
        let mut ledger = QuotaLedger::new(&men, &women).unwrap();

        // Limited by open seats
        assert_eq!(ledger.transfer_quota(0, 0, 3, QuotaSource::OpenSeats), 2);
        assert_eq!(ledger.allocation(0, 0), 2);
        assert_eq!(ledger.single_men(), 3);
        assert_sums(&ledger, &men, &women);

        // Limited by singles
        assert_eq!(ledger.transfer_quota(0, 1, 10, QuotaSource::OpenSeats), 1);
        assert_eq!(ledger.single(0), 0);
        assert_eq!(ledger.open_seats(1), 2);
        assert_sums(&ledger, &men, &women);

        // Nothing left to move
        assert_eq!(ledger.transfer_quota(0, 1, 1, QuotaSource::OpenSeats), 0);
        assert_sums(&ledger, &men, &women);
    }

    #[test]
    fn test_transfer_displacement() {
        let men = [3, 2];
        let women = [2, 3];
        let mut ledger = QuotaLedger::new(&men, &women).unwrap();
        ledger.transfer_quota(0, 0, 3, QuotaSource::OpenSeats);

        // Partial displacement: i has fewer singles than k holds
        assert_eq!(ledger.transfer_quota(1, 0, 1, QuotaSource::Displace(0)), 1);
        assert_eq!(ledger.allocation(0, 0), 1);
        assert_eq!(ledger.allocation(1, 0), 1);
        assert_eq!(ledger.single(0), 2);
        assert_eq!(ledger.single(1), 1);
        assert_eq!(ledger.single_men(), 3);
        assert_sums(&ledger, &men, &women);

        // Clamped to what k still holds
        assert_eq!(ledger.transfer_quota(1, 0, 5, QuotaSource::Displace(0)), 1);
        assert_eq!(ledger.allocation(0, 0), 0);
        assert_eq!(ledger.single(1), 0);
        assert_sums(&ledger, &men, &women);
    }

    #[test]
    fn test_self_displacement_moves_nothing() {
        let mut ledger = QuotaLedger::new(&[3], &[3]).unwrap();
        ledger.transfer_quota(0, 0, 1, QuotaSource::OpenSeats);

        assert_eq!(ledger.transfer_quota(0, 0, 2, QuotaSource::Displace(0)), 0);
        assert_eq!(ledger.allocation(0, 0), 1);
        assert_eq!(ledger.single(0), 2);
    }

    #[test]
    fn test_exhaustion() {
        let mut ledger = QuotaLedger::new(&[5], &[5]).unwrap();
        ledger.transfer_quota(0, 0, 5, QuotaSource::OpenSeats);

        assert!(ledger.is_exhausted());
        assert_eq!(ledger.into_allocation().to_rows(), vec![vec![5]]);
    }
}
