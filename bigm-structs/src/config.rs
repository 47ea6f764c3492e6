use crate::serializable_struct;
use anyhow::{anyhow, Result};
use bigm_utils::dejsonify;
use serde::{Deserialize, Serialize};

/// Shared tolerance for every "zero weight" and "capacity reached" decision
/// made while filling a knapsack.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

serializable_struct! {
    KernelConfig {
        #[serde(default = "default_tolerance")]
        tolerance: f64,
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl KernelConfig {
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let config: Self = dejsonify(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(anyhow!(
                "Tolerance ({}) must be finite and non-negative",
                self.tolerance
            ));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BigMMethod {
    /// Row sum of profits minus the loss; no pairwise tightening.
    Naive,
    /// Quantile of the pairwise violation matrix.
    #[default]
    Song,
}

serializable_struct! {
    BigMConfig {
        /// Risk level of the chance constraint.
        epsilon: f64,
        #[serde(default)]
        method: BigMMethod,
        kernel: Option<KernelConfig>,
    }
}

impl BigMConfig {
    pub fn from_json_str(json_str: &str) -> Result<Self> {
        let config: Self = dejsonify(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(anyhow!("Epsilon ({}) must lie in [0, 1]", self.epsilon));
        }
        if let Some(kernel) = &self.kernel {
            kernel.validate()?;
        }
        Ok(())
    }

    pub fn kernel_config(&self) -> KernelConfig {
        self.kernel.clone().unwrap_or_default()
    }
}
