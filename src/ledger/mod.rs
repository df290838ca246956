//! Bookkeeping for one matching run.
//!
//! ## Components
//!
//! - [`PreferenceIndex`]: flattened men-side lists and inverted women-side ranks
//! - [`QuotaLedger`]: single men, open seats and the allocation matrix
//! - [`EngagementRegistry`]: per women-group engagements ordered by rank
//!
//! ## Example
//!
//! ```
//! use group_stable_match::ledger::{EngagementRegistry, PreferenceIndex, QuotaLedger, QuotaSource};
//!
//! let index = PreferenceIndex::build(&[vec![0], vec![0]], &[vec![1, 0]], 2, 1).unwrap();
//! let mut ledger = QuotaLedger::new(&[1, 1], &[2]).unwrap();
//! let mut registry = EngagementRegistry::new(&index);
//!
//! ledger.transfer_quota(0, 0, 1, QuotaSource::OpenSeats);
//! registry.note_engaged(0, 0);
//! ledger.transfer_quota(1, 0, 1, QuotaSource::OpenSeats);
//! registry.note_engaged(0, 1);
//!
//! assert!(ledger.is_exhausted());
//! assert_eq!(registry.least_preferred(0), Some(0));
//! ```

pub mod preference;
pub mod quota;
pub mod engagement;

pub use preference::PreferenceIndex;
pub use quota::{QuotaLedger, QuotaSource};
pub use engagement::EngagementRegistry;
