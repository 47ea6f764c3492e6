use crate::TOLERANCE;
use ndarray::ArrayView1;

/// A knapsack row: one coefficient per item plus a scalar bound.
///
/// The same row plays two roles. As the objective of a fill its coefficients
/// are profits and its bound is the loss; as the constraint its coefficients
/// are weights and its bound is the capacity.
#[derive(Debug, Clone, Copy)]
pub struct Knapsack<'a> {
    pub coefficients: ArrayView1<'a, f64>,
    pub bound: f64,
}

impl<'a> Knapsack<'a> {
    pub fn new(coefficients: ArrayView1<'a, f64>, bound: f64) -> Self {
        Self {
            coefficients,
            bound,
        }
    }

    pub fn num_items(&self) -> usize {
        self.coefficients.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Greedy continuous knapsack fill that only ever lowers a running bound.
#[derive(Debug, Clone, Copy)]
pub struct FractionalFill {
    tolerance: f64,
}

impl Default for FractionalFill {
    fn default() -> Self {
        Self::new(TOLERANCE)
    }
}

impl FractionalFill {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Packs `objective` profits into `constraint` capacity following `order`
    /// (read backwards for [`Direction::Reverse`]) and lowers `best` when the
    /// resulting value `-loss + packed profit` is strictly smaller.
    ///
    /// Items whose weight is within tolerance of zero are always packed in
    /// full. At most one item is packed fractionally, the one that reaches
    /// the capacity. The traversal stops early once the value is at least
    /// `best + tolerance`, since later items can only add to it.
    ///
    /// Returns `true` if `best` was lowered.
    pub fn refine(
        &self,
        objective: Knapsack,
        constraint: Knapsack,
        order: &[usize],
        direction: Direction,
        best: &mut f64,
    ) -> bool {
        let profits = objective.coefficients;
        let weights = constraint.coefficients;

        let mut violation = -objective.bound;
        for &i in order {
            if weights[i] <= self.tolerance {
                violation += profits[i];
            }
        }

        violation = match direction {
            Direction::Forward => self.pack(
                order.iter(),
                profits,
                weights,
                constraint.bound,
                violation,
                *best,
            ),
            Direction::Reverse => self.pack(
                order.iter().rev(),
                profits,
                weights,
                constraint.bound,
                violation,
                *best,
            ),
        };

        if violation < *best {
            *best = violation;
            true
        } else {
            false
        }
    }

    fn pack<'o>(
        &self,
        items: impl Iterator<Item = &'o usize>,
        profits: ArrayView1<f64>,
        weights: ArrayView1<f64>,
        capacity: f64,
        mut violation: f64,
        best: f64,
    ) -> f64 {
        let mut packed_weight = 0.0;
        for &j in items {
            let weight = weights[j];
            if weight <= self.tolerance {
                continue;
            }
            let residual = capacity - packed_weight;
            packed_weight += weight;
            if packed_weight >= capacity - self.tolerance {
                violation += profits[j] * residual / weight;
                break;
            }
            violation += profits[j];
            if violation >= best + self.tolerance {
                break;
            }
        }
        violation
    }
}
