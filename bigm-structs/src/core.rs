use crate::serializable_struct;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

serializable_struct! {
    Partition {
        subsets: Vec<Vec<usize>>,
    }
}

impl Partition {
    /// One singleton subset per group.
    pub fn singletons(num_groups: usize) -> Self {
        Self {
            subsets: (0..num_groups).map(|s| vec![s]).collect(),
        }
    }

    pub fn num_subsets(&self) -> usize {
        self.subsets.len()
    }

    /// Checks that every group index is below `num_groups` and appears at most once.
    pub fn validate(&self, num_groups: usize) -> Result<()> {
        let mut seen = vec![false; num_groups];
        for (c, subset) in self.subsets.iter().enumerate() {
            if subset.is_empty() {
                return Err(anyhow!("Subset {} is empty", c));
            }
            for &s in subset {
                if s >= num_groups {
                    return Err(anyhow!(
                        "Subset {} references group {} but only {} groups exist",
                        c,
                        s,
                        num_groups
                    ));
                }
                if seen[s] {
                    return Err(anyhow!("Group {} appears in more than one subset", s));
                }
                seen[s] = true;
            }
        }
        Ok(())
    }
}
