//! Pairwise violation sweep over every knapsack of every group.
//!
//! Logging levels:
//! - **INFO**: sweep start with problem scale, sweep end with totals
//! - **DEBUG**: per-pass summaries
//! - **TRACE**: bounds after every pair evaluation

use crate::{FractionalFill, Knapsack, KernelConfig, PairEvaluator};
use anyhow::{anyhow, Result};
use ndarray::{s, ArrayView2, ArrayView3, ArrayViewMut3};
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub intra_group_pairs: usize,
    pub inter_group_pairs: usize,
    /// Cell updates that lowered a bound. A cell lowered by several pairs is
    /// counted once per pair.
    pub intra_group_tightenings: usize,
    pub inter_group_tightenings: usize,
}

impl SweepStats {
    pub fn num_pairs(&self) -> usize {
        self.intra_group_pairs + self.inter_group_pairs
    }

    pub fn num_tightenings(&self) -> usize {
        self.intra_group_tightenings + self.inter_group_tightenings
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ViolationKernel {
    evaluator: PairEvaluator,
}

impl ViolationKernel {
    pub fn new(config: &KernelConfig) -> Self {
        Self {
            evaluator: PairEvaluator::new(FractionalFill::new(config.tolerance)),
        }
    }

    pub fn evaluator(&self) -> &PairEvaluator {
        &self.evaluator
    }

    /// Lowers `violations[[a, b, c]]` to the best bound found for knapsack
    /// `(a, c)` against the knapsacks of group `b`.
    ///
    /// `profits` has shape `(k, m, n)`, `losses` `(k, m)` and `violations`
    /// `(k, k, m)`. Entries of `violations` are never raised, so the caller
    /// decides the starting bound (typically `+inf`).
    pub fn compute_all_violations(
        &self,
        profits: ArrayView3<f64>,
        losses: ArrayView2<f64>,
        mut violations: ArrayViewMut3<f64>,
    ) -> Result<SweepStats> {
        let (k, m, n) = profits.dim();
        if losses.dim() != (k, m) {
            return Err(anyhow!(
                "Losses shape {:?} does not match profits shape {:?}",
                losses.dim(),
                profits.dim()
            ));
        }
        if violations.dim() != (k, k, m) {
            return Err(anyhow!(
                "Violations shape {:?} does not match expected {:?}",
                violations.dim(),
                (k, k, m)
            ));
        }

        info!(
            event = "sweep_start",
            groups = k,
            knapsacks_per_group = m,
            items = n,
        );

        let knapsack =
            |s: usize, i: usize| Knapsack::new(profits.slice_move(s![s, i, ..]), losses[[s, i]]);
        let mut indices: Vec<usize> = (0..n).collect();
        let mut stats = SweepStats::default();

        for s in 0..k {
            for i in 0..m {
                for l in (i + 1)..m {
                    let mut home_best = violations[[s, s, i]];
                    let mut partner_best = violations[[s, s, l]];
                    let outcome = self.evaluator.evaluate(
                        knapsack(s, i),
                        knapsack(s, l),
                        &mut home_best,
                        &mut partner_best,
                        &mut indices,
                    );
                    violations[[s, s, i]] = home_best;
                    violations[[s, s, l]] = partner_best;
                    stats.intra_group_pairs += 1;
                    stats.intra_group_tightenings += outcome.num_tightened();
                    trace!(
                        event = "pair",
                        home = ?(s, i),
                        partner = ?(s, l),
                        home_violation = home_best,
                        partner_violation = partner_best,
                    );
                }
            }
        }
        debug!(
            event = "intra_group_pass_end",
            pairs = stats.intra_group_pairs,
            tightenings = stats.intra_group_tightenings,
        );

        for s in 0..k {
            for t in (s + 1)..k {
                for i in 0..m {
                    for l in 0..m {
                        let mut home_best = violations[[s, t, i]];
                        let mut partner_best = violations[[t, s, l]];
                        let outcome = self.evaluator.evaluate(
                            knapsack(s, i),
                            knapsack(t, l),
                            &mut home_best,
                            &mut partner_best,
                            &mut indices,
                        );
                        violations[[s, t, i]] = home_best;
                        violations[[t, s, l]] = partner_best;
                        stats.inter_group_pairs += 1;
                        stats.inter_group_tightenings += outcome.num_tightened();
                        trace!(
                            event = "pair",
                            home = ?(s, i),
                            partner = ?(t, l),
                            home_violation = home_best,
                            partner_violation = partner_best,
                        );
                    }
                }
            }
        }
        debug!(
            event = "inter_group_pass_end",
            pairs = stats.inter_group_pairs,
            tightenings = stats.inter_group_tightenings,
        );

        info!(
            event = "sweep_end",
            pairs = stats.num_pairs(),
            tightenings = stats.num_tightenings(),
        );
        Ok(stats)
    }

    /// Same sweep over row-major flat buffers of shapes `(k, m, n)`,
    /// `(k, m)` and `(k, k, m)`.
    pub fn compute_all_violations_flat(
        &self,
        profits: &[f64],
        losses: &[f64],
        k: usize,
        n: usize,
        m: usize,
        violations: &mut [f64],
    ) -> Result<SweepStats> {
        check_len("profits", profits.len(), k * m * n)?;
        check_len("losses", losses.len(), k * m)?;
        check_len("violations", violations.len(), k * k * m)?;
        self.compute_all_violations(
            ArrayView3::from_shape((k, m, n), profits)?,
            ArrayView2::from_shape((k, m), losses)?,
            ArrayViewMut3::from_shape((k, k, m), violations)?,
        )
    }
}

fn check_len(name: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(anyhow!(
            "Expected {} values in {} but found {}",
            expected,
            name,
            actual
        ));
    }
    Ok(())
}

/// Runs [`ViolationKernel::compute_all_violations_flat`] with the default
/// tolerance.
pub fn compute_all_violations(
    profits: &[f64],
    losses: &[f64],
    k: usize,
    n: usize,
    m: usize,
    violations: &mut [f64],
) -> Result<SweepStats> {
    ViolationKernel::default().compute_all_violations_flat(profits, losses, k, n, m, violations)
}
