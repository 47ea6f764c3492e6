use crate::ViolationKernel;
use anyhow::{anyhow, Result};
use ndarray::{Array2, Array3, ArrayView2, ArrayView3};
use rand::{rngs::SmallRng, SeedableRng};
use rand_distr::{Bernoulli, Distribution, Exp, Normal};
use serde::{Deserialize, Serialize};

/// Mean of the per-item failure probability distribution.
const MEAN_FAILURE_PROBABILITY: f64 = 0.1;
/// Standard deviation of a scenario coefficient relative to its nominal value.
const RELATIVE_STD_DEV: f64 = 0.1;
const DECIMALS: i32 = 4;

/// One deterministic multi-knapsack: `m` rows of `n` coefficients and `m`
/// capacities.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NominalKnapsacks {
    pub profits: Vec<Vec<f64>>,
    pub losses: Vec<f64>,
}

/// `k` groups of `m` knapsacks over `n` shared items, stored row-major.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViolationInstance {
    pub num_groups: usize,
    pub num_knapsacks: usize,
    pub num_items: usize,
    pub profits: Vec<f64>,
    pub losses: Vec<f64>,
}

impl ViolationInstance {
    pub fn new(profits: Array3<f64>, losses: Array2<f64>) -> Result<Self> {
        let (k, m, n) = profits.dim();
        if losses.dim() != (k, m) {
            return Err(anyhow!(
                "Losses shape {:?} does not match profits shape {:?}",
                losses.dim(),
                profits.dim()
            ));
        }
        Ok(Self {
            num_groups: k,
            num_knapsacks: m,
            num_items: n,
            profits: profits.iter().copied().collect(),
            losses: losses.iter().copied().collect(),
        })
    }

    /// Draws `num_groups` random scenarios around `nominal`.
    ///
    /// Every item fails with its own probability, drawn once from an
    /// exponential distribution. A failed item has zero profit in all
    /// knapsacks of that scenario; otherwise each coefficient is normally
    /// distributed around its nominal value, clipped at zero and rounded.
    /// Losses are copied from the nominal capacities.
    pub fn generate_instance(
        seed: &[u8; 32],
        nominal: &NominalKnapsacks,
        num_groups: usize,
    ) -> Result<Self> {
        let num_knapsacks = nominal.profits.len();
        if nominal.losses.len() != num_knapsacks {
            return Err(anyhow!(
                "Nominal instance has {} rows but {} losses",
                num_knapsacks,
                nominal.losses.len()
            ));
        }
        let num_items = nominal.profits.first().map_or(0, |row| row.len());
        if let Some(row) = nominal.profits.iter().find(|row| row.len() != num_items) {
            return Err(anyhow!(
                "Nominal rows have inconsistent lengths ({} vs {})",
                row.len(),
                num_items
            ));
        }

        let mut rng = SmallRng::from_seed(*seed);
        let exp = Exp::new(1.0 / MEAN_FAILURE_PROBABILITY).map_err(|e| anyhow!("{}", e))?;
        let failures = (0..num_items)
            .map(|_| Bernoulli::new(exp.sample(&mut rng).clamp(0.0, 1.0)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow!("{}", e))?;
        let coefficients = nominal
            .profits
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&a| Normal::new(a, (a * RELATIVE_STD_DEV).abs()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow!("{}", e))?;

        let scale = 10f64.powi(DECIMALS);
        let mut profits = Array3::zeros((num_groups, num_knapsacks, num_items));
        for s in 0..num_groups {
            for j in 0..num_items {
                if failures[j].sample(&mut rng) {
                    continue;
                }
                for i in 0..num_knapsacks {
                    let value = coefficients[i][j].sample(&mut rng).max(0.0);
                    profits[[s, i, j]] = (value * scale).round() / scale;
                }
            }
        }
        let losses =
            Array2::from_shape_fn((num_groups, num_knapsacks), |(_, i)| nominal.losses[i]);

        Self::new(profits, losses)
    }

    /// Checks that the flat buffers hold exactly `k * m * n` profits and
    /// `k * m` losses.
    pub fn validate(&self) -> Result<()> {
        let (k, m, n) = (self.num_groups, self.num_knapsacks, self.num_items);
        if self.profits.len() != k * m * n {
            return Err(anyhow!(
                "Expected {} profits for shape {:?} but found {}",
                k * m * n,
                (k, m, n),
                self.profits.len()
            ));
        }
        if self.losses.len() != k * m {
            return Err(anyhow!(
                "Expected {} losses for shape {:?} but found {}",
                k * m,
                (k, m),
                self.losses.len()
            ));
        }
        Ok(())
    }

    pub fn profits_view(&self) -> Result<ArrayView3<f64>> {
        self.validate()?;
        Ok(ArrayView3::from_shape(
            (self.num_groups, self.num_knapsacks, self.num_items),
            self.profits.as_slice(),
        )?)
    }

    pub fn losses_view(&self) -> Result<ArrayView2<f64>> {
        self.validate()?;
        Ok(ArrayView2::from_shape(
            (self.num_groups, self.num_knapsacks),
            self.losses.as_slice(),
        )?)
    }

    /// A `(k, k, m)` violation matrix with every entry at `+inf`.
    pub fn unbounded_violations(&self) -> Array3<f64> {
        Array3::from_elem(
            (self.num_groups, self.num_groups, self.num_knapsacks),
            f64::INFINITY,
        )
    }

    /// Runs one sweep of `kernel` from [`Self::unbounded_violations`].
    pub fn compute_violations(&self, kernel: &ViolationKernel) -> Result<Array3<f64>> {
        let mut violations = self.unbounded_violations();
        kernel.compute_all_violations(
            self.profits_view()?,
            self.losses_view()?,
            violations.view_mut(),
        )?;
        Ok(violations)
    }
}
