//! Allocation matrix returned by the engine.
//!
//! `M[i][j]` is the number of couples formed between men-group `i` and
//! women-group `j`. Stored row-major in one flat buffer so an m×w table
//! with thousands of groups per side is a single allocation.

use crate::error::{try_filled, Result};
use crate::types::Quota;

/// Dense m×w matrix of matched quota.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationMatrix {
    men_groups: usize,
    women_groups: usize,
    cells: Vec<Quota>,
}

impl AllocationMatrix {
    /// Create an all-zero matrix.
    ///
    /// Fails with `ResourceExhaustion` if the buffer cannot be reserved.
    pub fn zeroed(men_groups: usize, women_groups: usize) -> Result<Self> {
        let elements = men_groups.saturating_mul(women_groups);
        Ok(Self {
            men_groups,
            women_groups,
            cells: try_filled("allocation matrix", elements, 0)?,
        })
    }

    /// Build a matrix from nested rows.
    ///
    /// Returns `None` if the rows are ragged.
    ///
    /// ```
    /// use group_stable_match::types::AllocationMatrix;
    ///
    /// let matrix = AllocationMatrix::from_rows(vec![vec![0, 3], vec![2, 0]]).unwrap();
    /// assert_eq!(matrix.get(0, 1), 3);
    /// assert!(AllocationMatrix::from_rows(vec![vec![1], vec![1, 2]]).is_none());
    /// ```
    pub fn from_rows(rows: Vec<Vec<Quota>>) -> Option<Self> {
        let men_groups = rows.len();
        let women_groups = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != women_groups) {
            return None;
        }
        Some(Self {
            men_groups,
            women_groups,
            cells: rows.into_iter().flatten().collect(),
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

    /// Matched quota between men-group `i` and women-group `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Quota {
        self.cells[i * self.women_groups + j]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, i: usize, j: usize) -> &mut Quota {
        &mut self.cells[i * self.women_groups + j]
    }

    /// Row of men-group `i`
    #[inline]
    pub fn row(&self, i: usize) -> &[Quota] {
        let start = i * self.women_groups;
        &self.cells[start..start + self.women_groups]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Quota]> + '_ {
        (0..self.men_groups).map(move |i| self.row(i))
    }

    /// Flat row-major view of every cell
    #[inline]
    pub fn cells(&self) -> &[Quota] {
        &self.cells
    }

    /// Sum of row `i` (men matched out of men-group `i`)
    pub fn row_sum(&self, i: usize) -> u64 {
        self.row(i).iter().map(|&v| u64::from(v)).sum()
    }

    /// Sum of column `j` (women matched out of women-group `j`)
    pub fn column_sum(&self, j: usize) -> u64 {
        (0..self.men_groups).map(|i| u64::from(self.get(i, j))).sum()
    }

    /// Total number of couples
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<Quota>> {
        self.rows().map(<[Quota]>::to_vec).collect()
    }
}
