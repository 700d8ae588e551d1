// Quantiles by linear interpolation between order statistics
//
// For sorted x[0..n) and probability p: h = (n - 1) * p, then
// q = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)]).
// This is the R-7 definition.

/// First quartile, median and third quartile of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Compute from unsorted values; `None` for an empty sample
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            q1: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            q3: quantile_sorted(&sorted, 0.75)?,
        })
    }

    /// Interquartile range `q3 - q1`
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Quantile of an ascending slice; `None` if empty or `p` outside [0, 1]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;

    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Interquartile range of unsorted values
pub fn iqr(values: &[f64]) -> Option<f64> {
    Quartiles::from_values(values).map(|q| q.iqr())
}
