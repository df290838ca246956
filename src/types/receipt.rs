//! Matching receipt summarizing one engine run.
//!
//! The receipt is what the harness logs and compares across runs: the
//! instance dimensions, the engine counters and a state root committing
//! to the whole allocation matrix.

use ssz_rs::prelude::*;
use sha2::{Digest, Sha256};

use crate::engine::MatchStats;
use crate::types::AllocationMatrix;

/// Receipt for a completed matching run.
///
/// ## State Root
///
/// The 32-byte state root is a SHA-256 hash of the matrix dimensions
/// followed by every cell, row-major, little-endian. Two runs on the same
/// instance must produce the same root.
///
/// ## Example
///
/// ```
/// use group_stable_match::compute_stable_matching;
/// use group_stable_match::engine::MatchStats;
/// use group_stable_match::types::MatchingReceipt;
///
/// let matrix = compute_stable_matching(&[5], &[5], &[vec![0]], &[vec![0]]).unwrap();
/// let receipt = MatchingReceipt::new(&matrix, 5, &MatchStats::default());
///
/// assert_eq!(receipt.population, 5);
/// assert_eq!(receipt.state_root, MatchingReceipt::compute_state_root(&matrix));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct MatchingReceipt {
    /// Number of men-groups (`m`)
    pub men_groups: u64,

    /// Number of women-groups (`w`)
    pub women_groups: u64,

    /// Number of individuals per side (`n`)
    pub population: u64,

    /// Engine steps (one proposal each)
    pub steps: u64,

    /// Proposals accepted into open seats
    pub matches: u64,

    /// Proposals that displaced a less preferred group
    pub displacements: u64,

    /// Proposals rejected outright
    pub rejections: u64,

    /// Full scheduler rescans
    pub epochs: u64,

    /// SHA-256 over the allocation matrix
    pub state_root: [u8; 32],
}

impl MatchingReceipt {
    pub fn new(matrix: &AllocationMatrix, population: u64, stats: &MatchStats) -> Self {
        Self {
            men_groups: matrix.men_groups() as u64,
            women_groups: matrix.women_groups() as u64,
            population,
            steps: stats.steps,
            matches: stats.matches,
            displacements: stats.displacements,
            rejections: stats.rejections,
            epochs: stats.epochs,
            state_root: Self::compute_state_root(matrix),
        }
    }

    /// Hash the matrix into a 32-byte state root
    pub fn compute_state_root(matrix: &AllocationMatrix) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((matrix.men_groups() as u64).to_le_bytes());
        hasher.update((matrix.women_groups() as u64).to_le_bytes());
        for cell in matrix.cells() {
            hasher.update(cell.to_le_bytes());
        }
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }
}
