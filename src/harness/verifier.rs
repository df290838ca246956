//! Independent checker for a computed allocation.
//!
//! Shares no code with the engine: the rank tables are rebuilt here from the
//! raw preference lists. Checks run in a fixed order and stop at the first
//! failure:
//!
//! 1. matrix dimensions
//! 2. every cell lies in `[0, n]`
//! 3. the running total never exceeds `n`
//! 4. every men-group is fully matched
//! 5. every women-group is fully matched
//! 6. no blocking pair
//!
//! A pair `(i, j)` blocks when women-group `j` ranks `i` above its worst
//! matched men-group and men-group `i` ranks `j` above its worst matched
//! women-group. This is checked for every pair, matched or not.

use thiserror::Error;

use crate::types::{AllocationMatrix, GroupId, Instance, Side};

/// First property an allocation violates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("result has {actual} rows, expected {expected}")]
    RowCount { expected: usize, actual: usize },

    #[error("result has {actual} columns, expected {expected}")]
    ColumnCount { expected: usize, actual: usize },

    #[error("{value} couples between men group {men_group} and women group {women_group}, outside [0, {population}]")]
    EntryOutOfRange {
        men_group: usize,
        women_group: usize,
        value: u64,
        population: u64,
    },

    #[error("at least {married} people married, but there are only {population}")]
    TooManyMarried { married: u64, population: u64 },

    #[error("{side} group {group}: {actual} married, capacity {expected}")]
    Unmatched {
        side: Side,
        group: usize,
        expected: u64,
        actual: u64,
    },

    #[error("{side} group {group} preferences are not a permutation")]
    MalformedPreferences { side: Side, group: usize },

    #[error(
        "unstable: men group {men_group} prefers women group {women_group} to women group {worst_wife}, \
         and women group {women_group} prefers men group {men_group} to men group {worst_husband}"
    )]
    BlockingPair {
        men_group: usize,
        women_group: usize,
        worst_wife: usize,
        worst_husband: usize,
    },
}

/// Check `allocation` against `instance`.
///
/// ## Example
///
/// ```
/// use group_stable_match::harness::verify;
/// use group_stable_match::types::{AllocationMatrix, Instance};
///
/// let instance = Instance::new(
///     vec![1, 1],
///     vec![1, 1],
///     vec![vec![0, 1], vec![0, 1]],
///     vec![vec![0, 1], vec![0, 1]],
/// ).unwrap();
///
/// let stable = AllocationMatrix::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();
/// assert!(verify(&instance, &stable).is_ok());
///
/// let blocked = AllocationMatrix::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
/// assert!(verify(&instance, &blocked).is_err());
/// ```
pub fn verify(instance: &Instance, allocation: &AllocationMatrix) -> Result<(), VerificationFailure> {
    let m = instance.men_groups();
    let w = instance.women_groups();

    check_dimensions(allocation, m, w)?;
    check_totals(instance, allocation)?;

    let men_rank = rank_table(Side::Men, instance.men_prefs(), w)?;
    let women_rank = rank_table(Side::Women, instance.women_prefs(), m)?;

    // Rank position of the least preferred partner group, per group
    let mut worst_wife = vec![0usize; m];
    for (i, prefs) in instance.men_prefs().iter().enumerate() {
        for (pos, &j) in prefs.iter().enumerate() {
            if allocation.get(i, j as usize) > 0 {
                worst_wife[i] = pos;
            }
        }
    }
    let mut worst_husband = vec![0usize; w];
    for (j, prefs) in instance.women_prefs().iter().enumerate() {
        for (pos, &i) in prefs.iter().enumerate() {
            if allocation.get(i as usize, j) > 0 {
                worst_husband[j] = pos;
            }
        }
    }

    for i in 0..m {
        for j in 0..w {
            if women_rank[j * m + i] < worst_husband[j] && men_rank[i * w + j] < worst_wife[i] {
                return Err(VerificationFailure::BlockingPair {
                    men_group: i,
                    women_group: j,
                    worst_wife: instance.men_prefs()[i][worst_wife[i]] as usize,
                    worst_husband: instance.women_prefs()[j][worst_husband[j]] as usize,
                });
            }
        }
    }

    Ok(())
}

fn check_dimensions(allocation: &AllocationMatrix, m: usize, w: usize) -> Result<(), VerificationFailure> {
    if allocation.men_groups() != m {
        return Err(VerificationFailure::RowCount {
            expected: m,
            actual: allocation.men_groups(),
        });
    }
    if allocation.women_groups() != w {
        return Err(VerificationFailure::ColumnCount {
            expected: w,
            actual: allocation.women_groups(),
        });
    }
    Ok(())
}

fn check_totals(instance: &Instance, allocation: &AllocationMatrix) -> Result<(), VerificationFailure> {
    let n = instance.population();

    let mut married = 0u64;
    for i in 0..allocation.men_groups() {
        for (j, &cell) in allocation.row(i).iter().enumerate() {
            let value = u64::from(cell);
            if value > n {
                return Err(VerificationFailure::EntryOutOfRange {
                    men_group: i,
                    women_group: j,
                    value,
                    population: n,
                });
            }
            married += value;
            if married > n {
                return Err(VerificationFailure::TooManyMarried { married, population: n });
            }
        }
    }

    for (group, &capacity) in instance.men_capacity().iter().enumerate() {
        let actual = allocation.row_sum(group);
        if actual != u64::from(capacity) {
            return Err(VerificationFailure::Unmatched {
                side: Side::Men,
                group,
                expected: u64::from(capacity),
                actual,
            });
        }
    }
    for (group, &capacity) in instance.women_capacity().iter().enumerate() {
        let actual = allocation.column_sum(group);
        if actual != u64::from(capacity) {
            return Err(VerificationFailure::Unmatched {
                side: Side::Women,
                group,
                expected: u64::from(capacity),
                actual,
            });
        }
    }
    Ok(())
}

/// Flat `rows × len` table mapping (group, partner) to the partner's rank.
fn rank_table(side: Side, prefs: &[Vec<GroupId>], len: usize) -> Result<Vec<usize>, VerificationFailure> {
    let mut rank = vec![usize::MAX; prefs.len() * len];
    for (group, list) in prefs.iter().enumerate() {
        let row = &mut rank[group * len..(group + 1) * len];
        for (pos, &partner) in list.iter().enumerate() {
            match row.get_mut(partner as usize) {
                Some(slot) if *slot == usize::MAX => *slot = pos,
                _ => return Err(VerificationFailure::MalformedPreferences { side, group }),
            }
        }
    }
    Ok(rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(
        men: Vec<u32>,
        women: Vec<u32>,
        men_prefs: Vec<Vec<GroupId>>,
        women_prefs: Vec<Vec<GroupId>>,
    ) -> Instance {
        Instance::new(men, women, men_prefs, women_prefs).unwrap()
    }

    fn matrix(rows: Vec<Vec<u32>>) -> AllocationMatrix {
        AllocationMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_accepts_stable_allocation() {
        let inst = instance(
            vec![3, 2],
            vec![2, 3],
            vec![vec![0, 1], vec![0, 1]],
            vec![vec![1, 0], vec![0, 1]],
        );
        assert_eq!(verify(&inst, &matrix(vec![vec![0, 3], vec![2, 0]])), Ok(()));
    }

    #[test]
    fn test_accepts_empty_instance() {
        let inst = instance(vec![], vec![], vec![], vec![]);
        assert_eq!(verify(&inst, &AllocationMatrix::zeroed(0, 0).unwrap()), Ok(()));
    }

    #[test]
    fn test_dimension_mismatch() {
        let inst = instance(vec![1, 1], vec![2], vec![vec![0], vec![0]], vec![vec![0, 1]]);

        assert_eq!(
            verify(&inst, &matrix(vec![vec![2]])),
            Err(VerificationFailure::RowCount { expected: 2, actual: 1 })
        );
        assert_eq!(
            verify(&inst, &matrix(vec![vec![1, 0], vec![1, 0]])),
            Err(VerificationFailure::ColumnCount { expected: 1, actual: 2 })
        );
    }

    #[test]
    fn test_entry_out_of_range() {
        let inst = instance(vec![2], vec![2], vec![vec![0]], vec![vec![0]]);

        assert_eq!(
            verify(&inst, &matrix(vec![vec![3]])),
            Err(VerificationFailure::EntryOutOfRange {
                men_group: 0,
                women_group: 0,
                value: 3,
                population: 2
            })
        );
    }

    #[test]
    fn test_too_many_married() {
        let inst = instance(
            vec![1, 1],
            vec![1, 1],
            vec![vec![0, 1], vec![0, 1]],
            vec![vec![0, 1], vec![0, 1]],
        );

        assert_eq!(
            verify(&inst, &matrix(vec![vec![1, 1], vec![1, 0]])),
            Err(VerificationFailure::TooManyMarried { married: 3, population: 2 })
        );
    }

    #[test]
    fn test_unmatched_groups() {
        let inst = instance(
            vec![2, 1],
            vec![1, 2],
            vec![vec![0, 1], vec![0, 1]],
            vec![vec![0, 1], vec![0, 1]],
        );

        // Row 0 sums to 1 instead of 2
        assert_eq!(
            verify(&inst, &matrix(vec![vec![1, 0], vec![0, 1]])),
            Err(VerificationFailure::Unmatched {
                side: Side::Men,
                group: 0,
                expected: 2,
                actual: 1
            })
        );

        // Rows fine, column 0 holds 2 instead of 1
        assert_eq!(
            verify(&inst, &matrix(vec![vec![1, 1], vec![1, 0]])),
            Err(VerificationFailure::Unmatched {
                side: Side::Women,
                group: 0,
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_blocking_pair() {
        // Everyone agrees on 0 > 1; crossing them is unstable
        let inst = instance(
            vec![1, 1],
            vec![1, 1],
            vec![vec![0, 1], vec![0, 1]],
            vec![vec![0, 1], vec![0, 1]],
        );

        assert_eq!(
            verify(&inst, &matrix(vec![vec![0, 1], vec![1, 0]])),
            Err(VerificationFailure::BlockingPair {
                men_group: 0,
                women_group: 0,
                worst_wife: 1,
                worst_husband: 1
            })
        );
    }

    #[test]
    fn test_blocking_pair_within_shared_groups() {
        // Men-group 0 is split across both women-groups although women-group 0
        // would take more of it in place of men-group 1
        let inst = instance(
            vec![2, 2],
            vec![2, 2],
            vec![vec![0, 1], vec![0, 1]],
            vec![vec![0, 1], vec![0, 1]],
        );

        let err = verify(&inst, &matrix(vec![vec![1, 1], vec![1, 1]])).unwrap_err();
        assert!(matches!(
            err,
            VerificationFailure::BlockingPair {
                men_group: 0,
                women_group: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_preferences() {
        let inst = instance(
            vec![1, 1],
            vec![1, 1],
            vec![vec![0, 0], vec![0, 1]],
            vec![vec![0, 1], vec![0, 1]],
        );

        assert_eq!(
            verify(&inst, &matrix(vec![vec![1, 0], vec![0, 1]])),
            Err(VerificationFailure::MalformedPreferences {
                side: Side::Men,
                group: 0
            })
        );
    }
}
