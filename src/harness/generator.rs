//! Seeded instance generation.
//!
//! Structured preference matrices (everyone agrees, two camps) and random
//! ones, plus random group sizes whose totals agree on both sides. The same
//! seed always yields the same sequence of instances.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::{GroupId, Quota};

/// `[0, 1, ..., n-1]`
pub fn identity(n: usize) -> Vec<GroupId> {
    (0..n as GroupId).collect()
}

/// `[n-1, ..., 1, 0]`
pub fn reverse_identity(n: usize) -> Vec<GroupId> {
    (0..n as GroupId).rev().collect()
}

/// `rows` groups that all share `order`
pub fn uniform_prefs(rows: usize, order: &[GroupId]) -> Vec<Vec<GroupId>> {
    vec![order.to_vec(); rows]
}

/// Even-indexed groups follow `even`, odd-indexed groups follow `odd`
pub fn mixed_prefs(rows: usize, even: &[GroupId], odd: &[GroupId]) -> Vec<Vec<GroupId>> {
    (0..rows)
        .map(|row| if row % 2 == 0 { even.to_vec() } else { odd.to_vec() })
        .collect()
}

/// `len` groups of one individual each
pub fn unit(len: usize) -> Vec<Quota> {
    vec![1; len]
}

/// Random instance source backed by ChaCha8.
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    rng: ChaCha8Rng,
}

impl InstanceGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform random permutation of `[0, n)` (inside-out Fisher–Yates).
    pub fn random_permutation(&mut self, n: usize) -> Vec<GroupId> {
        let mut p = vec![0; n];
        for i in 1..n {
            let j = self.rng.gen_range(0..=i);
            p[i] = p[j];
            p[j] = i as GroupId;
        }
        p
    }

    /// `rows` independent random permutations of `[0, len)`
    pub fn random_prefs(&mut self, rows: usize, len: usize) -> Vec<Vec<GroupId>> {
        (0..rows).map(|_| self.random_permutation(len)).collect()
    }

    /// Random group sizes for `m` men-groups and `w` women-groups.
    ///
    /// When `n_estimate > m·w`, every (men-group, women-group) cell draws a
    /// size in `[1, 1 + 2·n_estimate/(m·w)]` that is added to both groups, so
    /// the totals match by construction and land close to `n_estimate`.
    /// Otherwise every group starts with one member and the remaining
    /// `n_estimate - m` (resp. `- w`) members are scattered uniformly.
    ///
    /// # Returns
    ///
    /// `None` if either side is empty, `n_estimate` is smaller than a side,
    /// or the resulting population exceeds `n_bound`.
    pub fn random_group_sizes(
        &mut self,
        m: usize,
        w: usize,
        n_estimate: u64,
        n_bound: u64,
    ) -> Option<(Vec<Quota>, Vec<Quota>)> {
        if m == 0 || w == 0 {
            return None;
        }
        let mut men = vec![0u64; m];
        let mut women = vec![0u64; w];
        let cells = (m as u64).checked_mul(w as u64)?;

        let population = if n_estimate > cells {
            let bound_per_cell = 1 + 2 * n_estimate / cells;
            let mut population = 0u64;
            for men_total in men.iter_mut() {
                for women_total in women.iter_mut() {
                    let size = self.rng.gen_range(0..bound_per_cell) + 1;
                    *men_total += size;
                    *women_total += size;
                    population += size;
                }
            }
            population
        } else {
            if n_estimate < m as u64 || n_estimate < w as u64 {
                return None;
            }
            men.fill(1);
            for _ in 0..n_estimate - m as u64 {
                men[self.rng.gen_range(0..m)] += 1;
            }
            women.fill(1);
            for _ in 0..n_estimate - w as u64 {
                women[self.rng.gen_range(0..w)] += 1;
            }
            n_estimate
        };

        if population > n_bound {
            return None;
        }
        Some((to_quotas(&men)?, to_quotas(&women)?))
    }
}

fn to_quotas(totals: &[u64]) -> Option<Vec<Quota>> {
    totals.iter().map(|&t| Quota::try_from(t).ok()).collect()
}
