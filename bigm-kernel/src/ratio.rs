use ndarray::ArrayView1;
use std::cmp::Ordering;

/// Orders items by descending `profits[i] / weights[i]`.
///
/// An item whose profit and weight are both zero is "dead" and ranks after
/// every other item. A zero weight gives an infinite ratio with the sign of
/// the profit, so zero-weight items with positive profit tie with each other
/// and rank ahead of every finite ratio. Items that compare `Equal` keep their
/// relative order in a stable sort.
///
/// Ratios are compared with `f64::total_cmp`, so the order stays total on
/// negative and NaN entries too.
#[derive(Debug, Clone, Copy)]
pub struct RatioOrder<'a> {
    profits: ArrayView1<'a, f64>,
    weights: ArrayView1<'a, f64>,
}

impl<'a> RatioOrder<'a> {
    pub fn new(profits: ArrayView1<'a, f64>, weights: ArrayView1<'a, f64>) -> Self {
        Self { profits, weights }
    }

    pub fn is_dead(&self, i: usize) -> bool {
        self.profits[i] == 0.0 && self.weights[i] == 0.0
    }

    /// Profit per unit of weight of a live item.
    pub fn ratio(&self, i: usize) -> f64 {
        let (profit, weight) = (self.profits[i], self.weights[i]);
        let ratio = if weight != 0.0 {
            profit / weight
        } else if profit > 0.0 {
            f64::INFINITY
        } else if profit < 0.0 {
            f64::NEG_INFINITY
        } else {
            profit
        };
        // -0.0 and 0.0 are distinct under total_cmp
        ratio + 0.0
    }

    /// Strict "ranks before" test.
    pub fn precedes(&self, i: usize, j: usize) -> bool {
        self.compare(i, j) == Ordering::Less
    }

    pub fn compare(&self, i: usize, j: usize) -> Ordering {
        match (self.is_dead(i), self.is_dead(j)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.ratio(j).total_cmp(&self.ratio(i)),
        }
    }

    /// Sorts `indices` in place. Previous contents only matter for ties.
    pub fn sort(&self, indices: &mut [usize]) {
        indices.sort_by(|&i, &j| self.compare(i, j));
    }
}
