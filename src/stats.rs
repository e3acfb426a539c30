//! Distribution statistics over a slice of observations.
//!
//! Every function here is pure and takes the values in any order. An empty
//! slice yields `0.0` for every statistic: "no data" reads as zero, never as
//! `NaN` or an error.
//!
//! Percentiles use the `p * (n + 1)` rank with linear interpolation between
//! neighbouring order statistics:
//!
//! \[
//! \mathrm{pos} = p (n + 1), \quad
//! x_{(\lfloor \mathrm{pos} \rfloor)} + (\mathrm{pos} - \lfloor \mathrm{pos} \rfloor)
//!   (x_{(\lfloor \mathrm{pos} \rfloor + 1)} - x_{(\lfloor \mathrm{pos} \rfloor)})
//! \]
//!
//! clamped to the smallest value when `pos < 1` and to the largest when
//! `pos >= n`.

/// Sum of all values.
pub fn sum(values: &[f64]) -> f64 {
    // `Sum for f64` starts from -0.0; empty input must read as +0.0.
    values.iter().fold(0.0, |acc, &v| acc + v)
}

/// Arithmetic mean, or `0.0` when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Smallest value, or `0.0` when empty.
pub fn min(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Largest value, or `0.0` when empty.
pub fn max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Population variance (denominator `n`), or `0.0` when empty.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let sq: f64 = values
        .iter()
        .map(|&v| {
            let d = v - m;
            d * d
        })
        .sum();
    sq / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// A single percentile, `p` in `[0, 1]`.
///
/// Copies and sorts `values`; use [`percentiles`] to evaluate several ranks
/// against one sort.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    percentiles(values, &[p])[0]
}

/// Several percentiles, returned in the order of `ps`.
pub fn percentiles(values: &[f64], ps: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sort(&mut sorted);
    percentiles_sorted(&sorted, ps)
}

/// Percentiles of values already sorted ascending.
///
/// A `NaN` rank resolves to the smallest value.
pub fn percentiles_sorted(sorted: &[f64], ps: &[f64]) -> Vec<f64> {
    let n = sorted.len();
    if n == 0 {
        return vec![0.0; ps.len()];
    }

    ps.iter()
        .map(|&p| {
            let pos = p * (n + 1) as f64;
            if pos.is_nan() || pos < 1.0 {
                sorted[0]
            } else if pos >= n as f64 {
                sorted[n - 1]
            } else {
                // 1 <= pos < n, so both neighbours exist.
                let rank = pos.floor();
                let lower = sorted[rank as usize - 1];
                let upper = sorted[rank as usize];
                lower + (pos - rank) * (upper - lower)
            }
        })
        .collect()
}

/// Sort ascending in place, total order on `f64`.
pub(crate) fn sort(values: &mut [f64]) {
    values.sort_unstable_by(f64::total_cmp);
}
