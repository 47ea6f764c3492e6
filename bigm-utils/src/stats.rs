use anyhow::{anyhow, Result};

/// Index of the big-M quantile among `len` ascending violations:
/// `floor(epsilon * len) + 1`.
pub fn quantile_index(len: usize, epsilon: f64) -> usize {
    (epsilon * len as f64).floor() as usize + 1
}

/// Sorts `values` ascending in place and returns the element at
/// [`quantile_index`].
pub fn quantile(values: &mut [f64], epsilon: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&epsilon) {
        return Err(anyhow!("Epsilon ({}) must lie in [0, 1]", epsilon));
    }
    let q = quantile_index(values.len(), epsilon);
    if q >= values.len() {
        return Err(anyhow!(
            "Quantile index ({}) out of bounds for {} violations",
            q,
            values.len()
        ));
    }
    values.sort_by(|a, b| a.total_cmp(b));
    Ok(values[q])
}

pub fn mean(values: &[f64]) -> Option<f64> {
    match values.len() {
        0 => None,
        len => Some(values.iter().sum::<f64>() / len as f64),
    }
}
