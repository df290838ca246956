//! Test harness for the matching engine.
//!
//! ## Components
//!
//! - [`HarnessConfig`]: campaign sizes, seed, timeout, variant
//! - [`InstanceGenerator`]: seeded structured and random instances
//! - [`verify`]: independent feasibility and stability check
//! - [`Runner`]: one instance per worker thread, under a timeout
//! - [`Suite`]: the full campaign with success and failure totals

pub mod config;
pub mod generator;
pub mod verifier;
pub mod runner;
pub mod suite;

pub use config::{ConfigError, HarnessConfig, SuiteVariant};
pub use generator::InstanceGenerator;
pub use verifier::{verify, VerificationFailure};
pub use runner::{RunOutcome, Runner};
pub use suite::{Suite, SuiteReport};
