//! Engagement registry: per women-group view of engaged men-groups.
//!
//! ## Ordering
//!
//! Each women-group `j` keeps a `BTreeMap` keyed by `j`'s rank of the
//! engaged men-group, so the least preferred engagement is the last key:
//!
//! ```text
//! rank 0 (best) ... rank 3 ... rank 7 (worst)  <- least_preferred(j)
//! ```
//!
//! Ranks come from the immutable [`PreferenceIndex`], borrowed once at
//! construction.
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | note_engaged | O(log m) |
//! | least_preferred | O(log m) |
//! | drop_if_exhausted | O(log m) |

use std::collections::BTreeMap;

use crate::ledger::{PreferenceIndex, QuotaLedger};
use crate::types::GroupId;

/// Rank-ordered engagements of every women-group.
#[derive(Debug, Clone)]
pub struct EngagementRegistry<'a> {
    index: &'a PreferenceIndex,
    /// views[j]: rank in j's list -> men-group
    views: Vec<BTreeMap<GroupId, GroupId>>,
}

impl<'a> EngagementRegistry<'a> {
    pub fn new(index: &'a PreferenceIndex) -> Self {
        Self {
            index,
            views: vec![BTreeMap::new(); index.women_groups()],
        }
    }

    /// Record that men-group `i` holds seats at women-group `j`.
    ///
    /// Inserting an already engaged group is a no-op.
    #[inline]
    pub fn note_engaged(&mut self, j: usize, i: usize) {
        let rank = self.index.women_rank(j, i);
        self.views[j].insert(rank, i as GroupId);
    }

    /// Worst-ranked men-group currently engaged to `j`.
    ///
    /// Returns `None` only when `j` has no engagements, which the engine
    /// never asks about: that state implies open seats.
    #[inline]
    pub fn least_preferred(&self, j: usize) -> Option<usize> {
        self.views[j]
            .last_key_value()
            .map(|(_, &group)| group as usize)
    }

    /// Remove `i` from `j`'s view once `M[i][j]` is back to zero.
    ///
    /// # Returns
    ///
    /// `true` if the engagement was removed
    pub fn drop_if_exhausted(&mut self, ledger: &QuotaLedger, j: usize, i: usize) -> bool {
        if ledger.allocation(i, j) > 0 {
            return false;
        }
        let rank = self.index.women_rank(j, i);
        self.views[j].remove(&rank).is_some()
    }

    /// Number of men-groups engaged to `j`
    #[inline]
    pub fn engaged_count(&self, j: usize) -> usize {
        self.views[j].len()
    }

    #[inline]
    pub fn is_engaged(&self, j: usize, i: usize) -> bool {
        self.views[j].contains_key(&self.index.women_rank(j, i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::QuotaSource;

    /// Three men-groups, one women-group ranking them [1, 2, 0].
    fn single_woman_index() -> PreferenceIndex {
        PreferenceIndex::build(&[vec![0], vec![0], vec![0]], &[vec![1, 2, 0]], 3, 1).unwrap()
    }

    #[test]
    fn test_least_preferred_tracks_worst_rank() {
        let index = single_woman_index();
        let mut registry = EngagementRegistry::new(&index);

        assert_eq!(registry.least_preferred(0), None);

        registry.note_engaged(0, 1);
        assert_eq!(registry.least_preferred(0), Some(1));

        registry.note_engaged(0, 0);
        assert_eq!(registry.least_preferred(0), Some(0));

        // Group 2 ranks between 1 and 0
        registry.note_engaged(0, 2);
        assert_eq!(registry.least_preferred(0), Some(0));
        assert_eq!(registry.engaged_count(0), 3);
    }

    #[test]
    fn test_note_engaged_is_idempotent() {
        let index = single_woman_index();
        let mut registry = EngagementRegistry::new(&index);

        registry.note_engaged(0, 2);
        registry.note_engaged(0, 2);

        assert_eq!(registry.engaged_count(0), 1);
        assert!(registry.is_engaged(0, 2));
        assert!(!registry.is_engaged(0, 1));
    }

    #[test]
    fn test_drop_only_when_exhausted() {
        let index = single_woman_index();
        let mut ledger = QuotaLedger::new(&[2, 2, 2], &[6]).unwrap();
        let mut registry = EngagementRegistry::new(&index);

        ledger.transfer_quota(0, 0, 2, QuotaSource::OpenSeats);
        registry.note_engaged(0, 0);
        ledger.transfer_quota(1, 0, 2, QuotaSource::OpenSeats);
        registry.note_engaged(0, 1);

        // Still holding seats
        assert!(!registry.drop_if_exhausted(&ledger, 0, 0));
        assert_eq!(registry.least_preferred(0), Some(0));

        // Simulate a displacement that empties M[0][0]
        ledger.transfer_quota(2, 0, 2, QuotaSource::Displace(0));
        registry.note_engaged(0, 2);
        assert!(registry.drop_if_exhausted(&ledger, 0, 0));
        assert_eq!(registry.least_preferred(0), Some(2));

        // Dropping twice reports nothing removed
        assert!(!registry.drop_if_exhausted(&ledger, 0, 0));
    }
}
