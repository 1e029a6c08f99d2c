//! Small statistics primitives shared by the analytics layer.
//!
//! All of these treat empty or underpopulated input as "no value", never as
//! zero and never as an error.

/// Arithmetic mean. `None` on empty input.
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Linear-interpolation percentile over an ascending-sorted slice.
///
/// `p <= 0` returns the minimum, `p >= 1` the maximum; in between the
/// fractional index `(n-1)*p` interpolates the two bracketing elements.
pub fn percentile(sorted_vals: &[f64], p: f64) -> Option<f64> {
    if sorted_vals.is_empty() {
        return None;
    }
    if p <= 0.0 {
        return sorted_vals.first().copied();
    }
    if p >= 1.0 {
        return sorted_vals.last().copied();
    }

    let n = sorted_vals.len();
    let idx = (n - 1) as f64 * p;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return Some(sorted_vals[lo]);
    }
    let w = idx - lo as f64;
    Some(sorted_vals[lo] * (1.0 - w) + sorted_vals[hi] * w)
}

pub fn median(sorted_vals: &[f64]) -> Option<f64> {
    percentile(sorted_vals, 0.5)
}

/// Bessel-corrected (n-1) sample standard deviation. Needs >= 2 samples.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = average(values)?;
    let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}
