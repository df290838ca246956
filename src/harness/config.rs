//! Harness configuration.
//!
//! Defaults reproduce the reference test campaign: every unit instance up to
//! `small`, powers of two up to `large`, then random non-unit group sizes on
//! grids of up to `large_nonunit` groups per side.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while reading the harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown suite variant {0:?}, expected A, B or C")]
    UnknownVariant(String),

    #[error("invalid seed {0:?}, expected an unsigned integer")]
    InvalidSeed(String),

    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),
}

/// Which slice of the non-unit campaign to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SuiteVariant {
    /// Everything up to 10^9 individuals
    #[default]
    A,
    /// Non-unit instances capped at `large` individuals
    B,
    /// Unit instances only
    C,
}

impl SuiteVariant {
    /// Upper bound on the population of non-unit instances, if any run at all.
    pub fn population_bound(self, large: usize) -> Option<u64> {
        match self {
            SuiteVariant::A => Some(1_000_000_000),
            SuiteVariant::B => Some(large as u64),
            SuiteVariant::C => None,
        }
    }
}

impl FromStr for SuiteVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(SuiteVariant::A),
            "B" | "b" => Ok(SuiteVariant::B),
            "C" | "c" => Ok(SuiteVariant::C),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for SuiteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SuiteVariant::A => "A",
            SuiteVariant::B => "B",
            SuiteVariant::C => "C",
        };
        f.write_str(name)
    }
}

/// Population estimates for the non-unit campaign.
pub const DEFAULT_ESTIMATES: [u64; 9] = [
    50,
    500,
    3_000,
    6_000,
    16_000,
    1_000_000,
    10_000_000,
    100_000_000,
    800_000_000,
];

/// Everything the suite and runner need to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub variant: SuiteVariant,
    /// Seed of the instance generator
    pub seed: u64,
    /// Every unit size `0..=small` is tried
    pub small: usize,
    /// Unit sizes double from `2 * small` up to `large`
    pub large: usize,
    /// Largest group count per side for non-unit instances
    pub large_nonunit: usize,
    /// Random instances per capacity pair
    pub random_rounds: usize,
    /// Wall-clock budget per instance
    pub timeout: Duration,
    /// Stop the campaign at the first failure
    pub stop_on_failure: bool,
    pub estimates: Vec<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            variant: SuiteVariant::default(),
            seed: 0,
            small: 128,
            large: 8192,
            large_nonunit: 4096,
            random_rounds: 16,
            timeout: Duration::from_secs(30),
            stop_on_failure: false,
            estimates: DEFAULT_ESTIMATES.to_vec(),
        }
    }
}

impl HarnessConfig {
    /// Read `[variant] [seed]` positional arguments on top of the defaults.
    ///
    /// ```
    /// use group_stable_match::harness::{HarnessConfig, SuiteVariant};
    ///
    /// let config = HarnessConfig::from_args(["B".to_string(), "7".to_string()]).unwrap();
    /// assert_eq!(config.variant, SuiteVariant::B);
    /// assert_eq!(config.seed, 7);
    /// ```
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        if let Some(variant) = args.next() {
            config.variant = variant.parse()?;
        }
        if let Some(seed) = args.next() {
            config.seed = seed.parse().map_err(|_| ConfigError::InvalidSeed(seed))?;
        }
        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }
        Ok(config)
    }

    pub fn with_variant(mut self, variant: SuiteVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set `small`, `large` and `large_nonunit` at once
    pub fn with_sizes(mut self, small: usize, large: usize, large_nonunit: usize) -> Self {
        self.small = small;
        self.large = large;
        self.large_nonunit = large_nonunit;
        self
    }

    pub fn with_random_rounds(mut self, rounds: usize) -> Self {
        self.random_rounds = rounds;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    pub fn with_estimates(mut self, estimates: Vec<u64>) -> Self {
        self.estimates = estimates;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();

        assert_eq!(config.variant, SuiteVariant::A);
        assert_eq!(config.small, 128);
        assert_eq!(config.large, 8192);
        assert_eq!(config.large_nonunit, 4096);
        assert_eq!(config.random_rounds, 16);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.stop_on_failure);
        assert_eq!(config.estimates.len(), 9);
    }

    #[test]
    fn test_from_args() {
        let config = HarnessConfig::from_args(Vec::new()).unwrap();
        assert_eq!(config, HarnessConfig::default());

        let config = HarnessConfig::from_args(vec!["c".to_string()]).unwrap();
        assert_eq!(config.variant, SuiteVariant::C);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_from_args_errors() {
        assert_eq!(
            HarnessConfig::from_args(vec!["D".to_string()]).unwrap_err(),
            ConfigError::UnknownVariant("D".to_string())
        );
        assert_eq!(
            HarnessConfig::from_args(vec!["A".to_string(), "-1".to_string()]).unwrap_err(),
            ConfigError::InvalidSeed("-1".to_string())
        );
        assert_eq!(
            HarnessConfig::from_args(vec!["A".to_string(), "1".to_string(), "x".to_string()])
                .unwrap_err(),
            ConfigError::UnexpectedArgument("x".to_string())
        );
    }

    #[test]
    fn test_population_bound() {
        assert_eq!(SuiteVariant::A.population_bound(8192), Some(1_000_000_000));
        assert_eq!(SuiteVariant::B.population_bound(8192), Some(8192));
        assert_eq!(SuiteVariant::C.population_bound(8192), None);
    }

    #[test]
    fn test_builders() {
        let config = HarnessConfig::default()
            .with_variant(SuiteVariant::B)
            .with_seed(9)
            .with_sizes(4, 8, 4)
            .with_random_rounds(1)
            .with_timeout(Duration::from_millis(500))
            .with_stop_on_failure(true)
            .with_estimates(vec![50]);

        assert_eq!(config.variant, SuiteVariant::B);
        assert_eq!(config.seed, 9);
        assert_eq!((config.small, config.large, config.large_nonunit), (4, 8, 4));
        assert_eq!(config.random_rounds, 1);
        assert!(config.stop_on_failure);
        assert_eq!(config.estimates, vec![50]);
    }
}
