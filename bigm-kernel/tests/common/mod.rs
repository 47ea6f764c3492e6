/// Value of `-loss` plus the best fractional packing of `profits` into
/// `capacity` under `weights`.
///
/// Exactly-zero weights are packed for free. Remaining items are taken by
/// descending `profit / weight` while capacity remains; items with
/// non-positive profit are skipped.
pub fn solve_continuous_knapsack(
    profits: &[f64],
    loss: f64,
    weights: &[f64],
    capacity: f64,
) -> f64 {
    let mut value = -loss;
    let mut items = Vec::with_capacity(profits.len());
    for (&profit, &weight) in profits.iter().zip(weights) {
        if weight == 0.0 {
            value += profit;
        } else {
            items.push((profit, weight));
        }
    }
    items.sort_by(|a, b| (b.0 / b.1).total_cmp(&(a.0 / a.1)));

    let mut packed_weight = 0.0;
    for (profit, weight) in items {
        let available = capacity - packed_weight;
        if available <= 0.0 {
            break;
        }
        let quantity = (available / weight).min(1.0);
        if profit > 0.0 {
            value += profit * quantity;
            packed_weight += weight * quantity;
        }
    }
    value
}
