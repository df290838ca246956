//! Matching engine module.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: same instance, same scheduler, same matrix
//! 2. **Bulk quota**: proposals move whole blocks of a group at once
//! 3. **Synchronous Execution**: one thread, no suspension points
//!
//! ## Matching Rules
//!
//! - A men-group proposes to the best women-group it has not been refused by
//! - Open seats are taken first (MATCH)
//! - A full women-group trades its worst engaged group for a better one (DISPLACE)
//! - Otherwise the proposal is refused and the proposer moves on (REJECT)
//!
//! ## Example
//!
//! ```
//! use group_stable_match::engine::MatchingEngine;
//!
//! let engine = MatchingEngine::new();
//! let outcome = engine
//!     .solve(&[1, 1], &[1, 1], &[vec![0, 1], vec![0, 1]], &[vec![1, 0], vec![1, 0]])
//!     .unwrap();
//!
//! assert_eq!(outcome.allocation.to_rows(), vec![vec![0, 1], vec![1, 0]]);
//! ```

pub mod scheduler;
pub mod matcher;

pub use scheduler::{BatchScheduler, LinearScanScheduler, ProposalScheduler};
pub use matcher::{compute_stable_matching, MatchOutcome, MatchStats, MatchingEngine, Step};
