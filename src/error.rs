//! Error types for the matching engine.
//!
//! Every failure is detected before the proposal loop starts: either the
//! instance is malformed ([`InstanceError`]) or one of the O(m·w) tables
//! could not be allocated. Once the loop begins the engine is total.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::types::Side;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatchingError>;

/// Top-level error returned by [`compute_stable_matching`](crate::compute_stable_matching)
/// and [`MatchingEngine::run`](crate::MatchingEngine::run).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    /// The problem instance violates a precondition.
    #[error("invalid instance: {0}")]
    InvalidInstance(#[from] InstanceError),

    /// A table sized by the instance could not be allocated.
    #[error("failed to allocate {structure} ({elements} elements)")]
    ResourceExhaustion {
        /// Name of the structure being allocated
        structure: &'static str,
        /// Number of elements requested
        elements: usize,
    },

    /// A men-group with singles ran out of women-groups to propose to.
    ///
    /// Unreachable for a validated instance: equal totals guarantee a seat.
    #[error("men group {men_group} exhausted its preference list with singles left")]
    ProposalsExhausted { men_group: usize },
}

/// Reasons an instance is rejected during validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    #[error("capacity mismatch: men total {men_total}, women total {women_total}")]
    CapacityMismatch { men_total: u64, women_total: u64 },

    #[error("{side} group {group} has zero capacity")]
    ZeroCapacity { side: Side, group: usize },

    #[error("{side} preferences have {actual} rows, expected {expected}")]
    PreferenceCount {
        side: Side,
        expected: usize,
        actual: usize,
    },

    #[error("{side} group {group} ranks {actual} groups, expected {expected}")]
    PreferenceLength {
        side: Side,
        group: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{side} group {group} preferences are not a permutation (entry {entry} at position {position})")]
    NotAPermutation {
        side: Side,
        group: usize,
        position: usize,
        entry: u32,
    },
}

/// Allocate a zero-filled table, reporting failure instead of aborting.
pub(crate) fn try_filled<T: Clone>(
    structure: &'static str,
    elements: usize,
    value: T,
) -> Result<Vec<T>> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(elements)
        .map_err(|_: TryReserveError| MatchingError::ResourceExhaustion { structure, elements })?;
    table.resize(elements, value);
    Ok(table)
}
