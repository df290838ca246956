//! Core data types for the grouped matching engine
//!
//! ## Types
//!
//! - [`Side`], [`GroupId`], [`Quota`]: group identity and sizes
//! - [`Instance`]: capacities plus preference lists for both sides
//! - [`AllocationMatrix`]: the m×w result
//! - [`MatchingReceipt`]: SSZ-encoded run summary with a state root

mod side;
mod allocation;
mod receipt;
pub mod instance;

pub use side::{GroupId, Quota, Side};
pub use allocation::AllocationMatrix;
pub use receipt::MatchingReceipt;
pub use instance::Instance;
