//! # Group Stable Match
//!
//! Many-to-many stable matching between groups of men and groups of women.
//!
//! Individuals are never materialized: a men-group of size 10⁶ that proposes
//! to a women-group moves as much quota as it can in one step, so the running
//! time depends on the number of groups and not on the population.
//!
//! ## Architecture
//!
//! - **Types**: Instances, the allocation matrix, matching receipts
//! - **Ledger**: Preference index, quota ledger, per-women-group engagement views
//! - **Engine**: Deferred-acceptance loop and its proposal schedulers
//! - **Harness**: Seeded instance generation, stability verification, timed runs
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical inputs produce identical allocations and counters
//! 2. **Validate First**: Nothing runs until the whole instance has been checked
//! 3. **Bulk Steps**: Each proposal transfers quota, never a single individual
//! 4. **Synchronous Execution**: One thread per run, no shared mutable state
//!
//! ## Example
//!
//! ```
//! use group_stable_match::compute_stable_matching;
//!
//! let matrix = compute_stable_matching(
//!     &[2, 1],
//!     &[1, 2],
//!     &[vec![0, 1], vec![0, 1]],
//!     &[vec![1, 0], vec![0, 1]],
//! ).unwrap();
//!
//! assert_eq!(matrix.row_sum(0), 2);
//! assert_eq!(matrix.column_sum(1), 2);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error types: invalid instances and allocation failures
pub mod error;

/// Core data types: Instance, AllocationMatrix, MatchingReceipt
pub mod types;

/// Matching state: preferences, quotas, engagements
pub mod ledger;

/// Matching engine: group-level deferred acceptance
pub mod engine;

/// Test harness: generators, verifier, timed runner
pub mod harness;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{InstanceError, MatchingError, Result};
pub use types::{AllocationMatrix, GroupId, Instance, MatchingReceipt, Quota, Side};
pub use engine::{compute_stable_matching, MatchOutcome, MatchStats, MatchingEngine};
