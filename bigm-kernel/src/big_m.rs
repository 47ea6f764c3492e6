use crate::{BigMConfig, BigMMethod, Partition, ViolationInstance, ViolationKernel};
use anyhow::{anyhow, Result};
use bigm_utils::{mean, quantile};
use ndarray::{s, Array2, Array3, ArrayView2, ArrayView3, Axis};
use tracing::info;

/// Big M of each knapsack when no pairwise information is used: the sum of
/// its profits minus its loss. Shape `(k, m)`.
pub fn naive_big_m(profits: ArrayView3<f64>, losses: ArrayView2<f64>) -> Result<Array2<f64>> {
    let (k, m, _) = profits.dim();
    if losses.dim() != (k, m) {
        return Err(anyhow!(
            "Losses shape {:?} does not match profits shape {:?}",
            losses.dim(),
            profits.dim()
        ));
    }
    Ok(profits.sum_axis(Axis(2)) - &losses)
}

/// Big M of knapsack `(s, i)` is the quantile of `violations[[s, .., i]]`.
pub fn song_big_m(violations: ArrayView3<f64>, epsilon: f64) -> Result<Array2<f64>> {
    let (k, _, m) = check_violations(violations)?;
    let mut big_m = Array2::zeros((k, m));
    for s in 0..k {
        for i in 0..m {
            let mut values = violations.slice(s![s, .., i]).to_vec();
            big_m[[s, i]] = quantile(&mut values, epsilon)?;
        }
    }
    Ok(big_m)
}

/// Big Ms when groups are aggregated into the subsets of `partition`.
///
/// Subset `c` owns `|c| * m` constraints. Constraint `j` is knapsack
/// `j % m` of group `c[j / m]`; its candidate violation against subset `p`
/// is the smallest violation against any group of `p`, and its big M is the
/// quantile of those candidates.
pub fn partitioned_big_m(
    violations: ArrayView3<f64>,
    partition: &Partition,
    epsilon: f64,
) -> Result<Vec<Vec<f64>>> {
    let (k, _, m) = check_violations(violations)?;
    partition.validate(k)?;
    partition
        .subsets
        .iter()
        .map(|subset| {
            (0..subset.len() * m)
                .map(|j| {
                    let group = subset[j / m];
                    let constraint = j % m;
                    let mut candidates: Vec<f64> = partition
                        .subsets
                        .iter()
                        .map(|other| {
                            other
                                .iter()
                                .map(|&t| violations[[group, t, constraint]])
                                .fold(f64::INFINITY, f64::min)
                        })
                        .collect();
                    quantile(&mut candidates, epsilon)
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect()
}

fn check_violations(violations: ArrayView3<f64>) -> Result<(usize, usize, usize)> {
    let (k, k2, m) = violations.dim();
    if k != k2 {
        return Err(anyhow!(
            "Violations shape {:?} is not (k, k, m)",
            violations.dim()
        ));
    }
    Ok((k, k2, m))
}

/// Computes big Ms for one instance, running the violation sweep at most once.
#[derive(Debug, Clone)]
pub struct BigMFinder<'a> {
    instance: &'a ViolationInstance,
    config: BigMConfig,
    kernel: ViolationKernel,
    violations: Option<Array3<f64>>,
}

impl<'a> BigMFinder<'a> {
    /// The sweep runs with the tolerance of `config.kernel`, or the default
    /// one when it is absent.
    pub fn new(instance: &'a ViolationInstance, config: &BigMConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            instance,
            config: config.clone(),
            kernel: ViolationKernel::new(&config.kernel_config()),
            violations: None,
        })
    }

    pub fn config(&self) -> &BigMConfig {
        &self.config
    }

    /// Violation matrix of the instance, starting from `+inf` on first use.
    pub fn violations(&mut self) -> Result<&Array3<f64>> {
        let violations = match self.violations.take() {
            Some(violations) => violations,
            None => self.instance.compute_violations(&self.kernel)?,
        };
        Ok(&*self.violations.insert(violations))
    }

    /// One row of big Ms per group, or per subset when `partition` is given.
    pub fn naive(&self, partition: Option<&Partition>) -> Result<Vec<Vec<f64>>> {
        let big_m = naive_big_m(self.instance.profits_view()?, self.instance.losses_view()?)?;
        let rows: Vec<Vec<f64>> = match partition {
            Some(partition) => {
                partition.validate(self.instance.num_groups)?;
                partition
                    .subsets
                    .iter()
                    .map(|subset| {
                        subset
                            .iter()
                            .flat_map(|&s| big_m.row(s).to_vec())
                            .collect::<Vec<f64>>()
                    })
                    .collect()
            }
            None => big_m.outer_iter().map(|row| row.to_vec()).collect(),
        };
        Ok(rows)
    }

    pub fn song(&mut self, epsilon: f64, partition: Option<&Partition>) -> Result<Vec<Vec<f64>>> {
        let violations = self.violations()?.view();
        match partition {
            Some(partition) => partitioned_big_m(violations, partition, epsilon),
            None => Ok(song_big_m(violations, epsilon)?
                .outer_iter()
                .map(|row| row.to_vec())
                .collect()),
        }
    }

    /// Big Ms with the method and risk level of the configuration.
    pub fn find(&mut self, partition: Option<&Partition>) -> Result<Vec<Vec<f64>>> {
        let (epsilon, method) = (self.config.epsilon, self.config.method);
        let big_m = match method {
            BigMMethod::Naive => self.naive(partition)?,
            BigMMethod::Song => self.song(epsilon, partition)?,
        };
        let flat: Vec<f64> = big_m.iter().flatten().copied().collect();
        info!(
            event = "big_m",
            method = ?method,
            tolerance = self.kernel.evaluator().fill().tolerance(),
            count = flat.len(),
            mean = mean(&flat).unwrap_or(f64::NAN),
        );
        Ok(big_m)
    }
}
