//! The full test campaign.
//!
//! For every pair of capacity vectors the suite runs four structured
//! instances followed by `random_rounds` random ones:
//!
//! | Women prefer            | Men prefer              |
//! |-------------------------|-------------------------|
//! | identity                | identity                |
//! | identity                | reverse identity        |
//! | identity                | even: identity, odd: reverse |
//! | even: identity, odd: reverse | identity           |
//! | random                  | random                  |
//!
//! Capacity pairs come from two sweeps: unit groups of every size up to
//! `small` then powers of two up to `large`, and random group sizes on a
//! `4^a × 4^b` grid for each population estimate under the variant's bound.

use log::info;

use crate::harness::config::HarnessConfig;
use crate::harness::generator::{
    identity, mixed_prefs, reverse_identity, uniform_prefs, unit, InstanceGenerator,
};
use crate::harness::runner::Runner;
use crate::types::Quota;

/// Totals over a campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteReport {
    pub successes: u64,
    pub failures: u64,
}

impl SuiteReport {
    #[inline]
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}

/// Drives the generator and runner through the campaign.
#[derive(Debug, Clone)]
pub struct Suite {
    config: HarnessConfig,
    generator: InstanceGenerator,
    runner: Runner,
}

impl Suite {
    pub fn new(config: HarnessConfig) -> Self {
        let generator = InstanceGenerator::new(config.seed);
        let runner = Runner::new(config.timeout, config.stop_on_failure, config.small as u64);
        Self {
            config,
            generator,
            runner,
        }
    }

    /// Successes and failures so far
    pub fn report(&self) -> SuiteReport {
        SuiteReport {
            successes: self.runner.successes(),
            failures: self.runner.failures(),
        }
    }

    /// Run both sweeps.
    pub fn run(&mut self) -> SuiteReport {
        info!(
            "starting test suite {} (seed {})",
            self.config.variant, self.config.seed
        );

        self.run_unit();
        self.run_nonunit();

        let report = self.report();
        info!(
            "done test suite {}: {} success(es), {} failure(s)",
            self.config.variant, report.successes, report.failures
        );
        report
    }

    /// `m = w = n`, one individual per group.
    pub fn run_unit(&mut self) {
        for n in 0..=self.config.small {
            if self.runner.should_stop() {
                return;
            }
            self.test_capacities(&unit(n), &unit(n));
        }

        let mut n = (2 * self.config.small).max(1);
        while n <= self.config.large {
            if self.runner.should_stop() {
                return;
            }
            self.test_capacities(&unit(n), &unit(n));
            n *= 2;
        }
    }

    /// Random group sizes around each population estimate.
    pub fn run_nonunit(&mut self) {
        let Some(bound) = self.config.variant.population_bound(self.config.large) else {
            return;
        };

        let sides = powers_of_four(self.config.large_nonunit);
        for estimate in self.config.estimates.clone() {
            if estimate >= bound {
                continue;
            }
            for &m in &sides {
                for &w in &sides {
                    if self.runner.should_stop() {
                        return;
                    }
                    if let Some((men, women)) =
                        self.generator.random_group_sizes(m, w, estimate, bound)
                    {
                        self.test_capacities(&men, &women);
                    }
                }
            }
        }
    }

    /// The structured instances plus `random_rounds` random ones.
    pub fn test_capacities(&mut self, men: &[Quota], women: &[Quota]) {
        let m = men.len();
        let w = women.len();

        let identity_m = identity(m);
        let reverse_m = reverse_identity(m);
        let identity_w = identity(w);
        let reverse_w = reverse_identity(w);

        let structured = [
            (uniform_prefs(m, &identity_w), uniform_prefs(w, &identity_m)),
            (uniform_prefs(m, &identity_w), uniform_prefs(w, &reverse_m)),
            (uniform_prefs(m, &identity_w), mixed_prefs(w, &identity_m, &reverse_m)),
            (mixed_prefs(m, &identity_w, &reverse_w), uniform_prefs(w, &identity_m)),
        ];
        for (men_prefs, women_prefs) in structured {
            if self.runner.should_stop() {
                return;
            }
            self.runner.run_parts(men, women, men_prefs, women_prefs);
        }

        for _ in 0..self.config.random_rounds {
            if self.runner.should_stop() {
                return;
            }
            let men_prefs = self.generator.random_prefs(m, w);
            let women_prefs = self.generator.random_prefs(w, m);
            self.runner.run_parts(men, women, men_prefs, women_prefs);
        }
    }
}

/// `1, 4, 16, ...` up to and including `limit`
fn powers_of_four(limit: usize) -> Vec<usize> {
    std::iter::successors(Some(1usize), |&x| x.checked_mul(4))
        .take_while(|&x| x <= limit)
        .collect()
}
