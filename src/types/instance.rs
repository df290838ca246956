//! Problem instance: group capacities plus preference lists.
//!
//! ## Validation
//!
//! [`Instance::new`] checks the cheap preconditions up front:
//!
//! - every capacity is positive
//! - both sides have the same total population
//! - every preference list has the right length
//!
//! Whether each list is a permutation is checked while the
//! [`PreferenceIndex`](crate::ledger::PreferenceIndex) inverts it, so the
//! O(m·w) pass over the tables happens only once.

use crate::error::InstanceError;
use crate::types::{GroupId, Quota, Side};

/// An owned matching problem.
///
/// ## Example
///
/// ```
/// use group_stable_match::types::Instance;
///
/// let instance = Instance::new(
///     vec![3, 2],                 // men-group capacities
///     vec![2, 3],                 // women-group capacities
///     vec![vec![0, 1], vec![0, 1]],
///     vec![vec![1, 0], vec![0, 1]],
/// ).unwrap();
///
/// assert_eq!(instance.population(), 5);
/// assert_eq!(instance.men_groups(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    men_capacity: Vec<Quota>,
    women_capacity: Vec<Quota>,
    men_prefs: Vec<Vec<GroupId>>,
    women_prefs: Vec<Vec<GroupId>>,
    population: u64,
}

impl Instance {
    /// Build an instance, checking capacities and list shapes.
    pub fn new(
        men_capacity: Vec<Quota>,
        women_capacity: Vec<Quota>,
        men_prefs: Vec<Vec<GroupId>>,
        women_prefs: Vec<Vec<GroupId>>,
    ) -> Result<Self, InstanceError> {
        let population = check_capacities(&men_capacity, &women_capacity)?;
        check_shape(Side::Men, &men_prefs, men_capacity.len(), women_capacity.len())?;
        check_shape(Side::Women, &women_prefs, women_capacity.len(), men_capacity.len())?;

        Ok(Self {
            men_capacity,
            women_capacity,
            men_prefs,
            women_prefs,
            population,
        })
    }

    /// Number of men-groups (`m`)
    #[inline]
    pub fn men_groups(&self) -> usize {
        self.men_capacity.len()
    }

    /// Number of women-groups (`w`)
    #[inline]
    pub fn women_groups(&self) -> usize {
        self.women_capacity.len()
    }

    /// Total number of individuals on either side (`n`)
    #[inline]
    pub fn population(&self) -> u64 {
        self.population
    }

    #[inline]
    pub fn men_capacity(&self) -> &[Quota] {
        &self.men_capacity
    }

    #[inline]
    pub fn women_capacity(&self) -> &[Quota] {
        &self.women_capacity
    }

    #[inline]
    pub fn men_prefs(&self) -> &[Vec<GroupId>] {
        &self.men_prefs
    }

    #[inline]
    pub fn women_prefs(&self) -> &[Vec<GroupId>] {
        &self.women_prefs
    }
}

/// Check that both sides have positive capacities with equal totals.
///
/// Returns the common total `n`.
pub fn check_capacities(men: &[Quota], women: &[Quota]) -> Result<u64, InstanceError> {
    let men_total = total(Side::Men, men)?;
    let women_total = total(Side::Women, women)?;

    if men_total != women_total {
        return Err(InstanceError::CapacityMismatch {
            men_total,
            women_total,
        });
    }
    Ok(men_total)
}

fn total(side: Side, capacities: &[Quota]) -> Result<u64, InstanceError> {
    let mut sum = 0u64;
    for (group, &capacity) in capacities.iter().enumerate() {
        if capacity == 0 {
            return Err(InstanceError::ZeroCapacity { side, group });
        }
        sum += u64::from(capacity);
    }
    Ok(sum)
}

/// Check that `prefs` has `rows` lists of `len` entries each.
pub fn check_shape(
    side: Side,
    prefs: &[Vec<GroupId>],
    rows: usize,
    len: usize,
) -> Result<(), InstanceError> {
    if prefs.len() != rows {
        return Err(InstanceError::PreferenceCount {
            side,
            expected: rows,
            actual: prefs.len(),
        });
    }
    if let Some((group, list)) = prefs.iter().enumerate().find(|(_, list)| list.len() != len) {
        return Err(InstanceError::PreferenceLength {
            side,
            group,
            expected: len,
            actual: list.len(),
        });
    }
    Ok(())
}
