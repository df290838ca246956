//! Preference index: flattened men-side lists and inverted women-side ranks.
//!
//! ## Layout
//!
//! ```text
//! men_prefs  [i * w + pos]  -> women-group at position `pos` of i's list
//! women_rank [j * m + i]    -> rank of men-group i in j's list (0 = best)
//! ```
//!
//! Both tables are built once, validated while they are filled, and never
//! mutated afterwards.

use crate::error::{try_filled, InstanceError, MatchingError, Result};
use crate::types::instance::check_shape;
use crate::types::{GroupId, Side};

/// Sentinel for "rank not assigned yet" while inverting.
const UNRANKED: GroupId = GroupId::MAX;

/// Immutable lookup tables derived from both sides' preference lists.
#[derive(Debug, Clone)]
pub struct PreferenceIndex {
    men_groups: usize,
    women_groups: usize,
    men_prefs: Vec<GroupId>,
    women_rank: Vec<GroupId>,
}

impl PreferenceIndex {
    /// Flatten the men's lists and invert the women's lists.
    ///
    /// Fails with `InvalidInstance` if any list has the wrong shape or is
    /// not a permutation of the opposite side's group indices.
    ///
    /// ```
    /// use group_stable_match::ledger::PreferenceIndex;
    ///
    /// let index = PreferenceIndex::build(
    ///     &[vec![0, 1], vec![1, 0]],
    ///     &[vec![1, 0], vec![0, 1]],
    ///     2,
    ///     2,
    /// ).unwrap();
    ///
    /// assert_eq!(index.women_rank(0, 1), 0);
    /// assert!(index.prefers(0, 1, 0));
    /// assert_eq!(index.men_choice(1, 0), Some(1));
    /// ```
    pub fn build(
        men_prefs: &[Vec<GroupId>],
        women_prefs: &[Vec<GroupId>],
        men_groups: usize,
        women_groups: usize,
    ) -> Result<Self> {
        check_shape(Side::Men, men_prefs, men_groups, women_groups)?;
        check_shape(Side::Women, women_prefs, women_groups, men_groups)?;

        let cells = men_groups.saturating_mul(women_groups);
        let mut flat_men = try_filled("men preference table", cells, 0)?;
        let mut women_rank = try_filled("women rank table", cells, UNRANKED)?;

        // stamp[j] == i + 1 marks j as already listed by men-group i
        let mut stamp = vec![0usize; women_groups];
        for (i, list) in men_prefs.iter().enumerate() {
            let row = &mut flat_men[i * women_groups..(i + 1) * women_groups];
            for (position, (&entry, slot)) in list.iter().zip(row.iter_mut()).enumerate() {
                let j = entry as usize;
                if j >= women_groups || stamp[j] == i + 1 {
                    return Err(not_a_permutation(Side::Men, i, position, entry));
                }
                stamp[j] = i + 1;
                *slot = entry;
            }
        }

        for (j, list) in women_prefs.iter().enumerate() {
            let ranks = &mut women_rank[j * men_groups..(j + 1) * men_groups];
            for (position, &entry) in list.iter().enumerate() {
                let i = entry as usize;
                if i >= men_groups || ranks[i] != UNRANKED {
                    return Err(not_a_permutation(Side::Women, j, position, entry));
                }
                ranks[i] = position as GroupId;
            }
        }

        Ok(Self {
            men_groups,
            women_groups,
            men_prefs: flat_men,
            women_rank,
        })
    }

    #[inline]
    pub fn men_groups(&self) -> usize {
        self.men_groups
    }

    #[inline]
    pub fn women_groups(&self) -> usize {
        self.women_groups
    }

    /// Women-group at position `position` of men-group `i`'s list,
    /// or `None` once the list is exhausted.
    #[inline]
    pub fn men_choice(&self, i: usize, position: usize) -> Option<usize> {
        if position >= self.women_groups {
            return None;
        }
        Some(self.men_prefs[i * self.women_groups + position] as usize)
    }

    /// Rank of men-group `i` in women-group `j`'s list (0 = most preferred)
    #[inline]
    pub fn women_rank(&self, j: usize, i: usize) -> GroupId {
        self.women_rank[j * self.men_groups + i]
    }

    /// Whether women-group `j` strictly prefers men-group `a` over `b`
    #[inline]
    pub fn prefers(&self, j: usize, a: usize, b: usize) -> bool {
        self.women_rank(j, a) < self.women_rank(j, b)
    }
}

fn not_a_permutation(side: Side, group: usize, position: usize, entry: GroupId) -> MatchingError {
    InstanceError::NotAPermutation {
        side,
        group,
        position,
        entry,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_inversion() {
        let index = PreferenceIndex::build(
            &[vec![0], vec![0], vec![0]],
            &[vec![2, 0, 1]],
            3,
            1,
        )
        .unwrap();

        assert_eq!(index.women_rank(0, 2), 0);
        assert_eq!(index.women_rank(0, 0), 1);
        assert_eq!(index.women_rank(0, 1), 2);
        assert!(index.prefers(0, 2, 1));
        assert!(!index.prefers(0, 1, 0));
        assert!(!index.prefers(0, 0, 0));
    }

    #[test]
    fn test_men_choice_walks_list() {
        let index = PreferenceIndex::build(
            &[vec![2, 0, 1]],
            &[vec![0], vec![0], vec![0]],
            1,
            3,
        )
        .unwrap();

        assert_eq!(index.men_choice(0, 0), Some(2));
        assert_eq!(index.men_choice(0, 1), Some(0));
        assert_eq!(index.men_choice(0, 2), Some(1));
        assert_eq!(index.men_choice(0, 3), None);
    }

    #[test]
    fn test_duplicate_men_entry() {
        let err = PreferenceIndex::build(
            &[vec![0, 1], vec![1, 1]],
            &[vec![0, 1], vec![0, 1]],
            2,
            2,
        )
        .unwrap_err();

        assert_eq!(
            err,
            MatchingError::InvalidInstance(InstanceError::NotAPermutation {
                side: Side::Men,
                group: 1,
                position: 1,
                entry: 1
            })
        );
    }

    #[test]
    fn test_out_of_range_women_entry() {
        let err = PreferenceIndex::build(
            &[vec![0, 1], vec![1, 0]],
            &[vec![0, 1], vec![2, 0]],
            2,
            2,
        )
        .unwrap_err();

        assert_eq!(
            err,
            MatchingError::InvalidInstance(InstanceError::NotAPermutation {
                side: Side::Women,
                group: 1,
                position: 0,
                entry: 2
            })
        );
    }

    #[test]
    fn test_shape_checked_before_inversion() {
        let err = PreferenceIndex::build(&[vec![0]], &[vec![0], vec![0]], 1, 1).unwrap_err();
        assert!(matches!(
            err,
            MatchingError::InvalidInstance(InstanceError::PreferenceCount {
                side: Side::Women,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_index() {
        let index = PreferenceIndex::build(&[], &[], 0, 0).unwrap();
        assert_eq!(index.men_groups(), 0);
        assert_eq!(index.women_groups(), 0);
    }
}
