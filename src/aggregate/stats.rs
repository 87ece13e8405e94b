//! Descriptive statistics with pandas-compatible semantics.
//!
//! Small-sample cases return NaN rather than erroring: std needs two values,
//! skew three, kurtosis four. Constant series give zero skew and kurtosis.

/// Arithmetic mean; NaN for empty input.
pub fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample standard deviation (ddof = 1); NaN for fewer than two values.
pub fn sample_std(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(xs);
    let ss: f64 = xs.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Quantile via sorting + linear interpolation between order statistics.
///
/// - `q=0` returns the minimum, `q=1` the maximum
/// - empty input returns NaN
pub fn quantile(xs: &[f64], q: f64) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    let mut v = xs.to_vec();
    v.sort_by(f64::total_cmp);
    if v.len() == 1 {
        return v[0];
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (v.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return v[lo];
    }
    let t = pos - lo as f64;
    (1.0 - t) * v[lo] + t * v[hi]
}

/// Median (0.5 quantile).
pub fn median(xs: &[f64]) -> f64 {
    quantile(xs, 0.5)
}

/// Bias-corrected Fisher-Pearson sample skewness.
///
/// `sqrt(n(n-1))/(n-2) * m3/m2^1.5` over the central moments. NaN for fewer
/// than three values; zero for a constant series.
pub fn skewness(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 3 {
        return f64::NAN;
    }
    let nf = n as f64;
    let m = mean(xs);
    let mut m2 = 0.0;
    let mut m3 = 0.0;
    for &x in xs {
        let d = x - m;
        m2 += d * d;
        m3 += d * d * d;
    }
    m2 /= nf;
    m3 /= nf;
    if m2 == 0.0 {
        return 0.0;
    }
    (nf * (nf - 1.0)).sqrt() / (nf - 2.0) * (m3 / m2.powf(1.5))
}

/// Bias-corrected excess kurtosis (Fisher definition).
///
/// NaN for fewer than four values; zero for a constant series.
pub fn kurtosis(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n < 4 {
        return f64::NAN;
    }
    let nf = n as f64;
    let m = mean(xs);
    let mut d2_sum = 0.0;
    let mut d4_sum = 0.0;
    for &x in xs {
        let d2 = (x - m) * (x - m);
        d2_sum += d2;
        d4_sum += d2 * d2;
    }
    if d2_sum == 0.0 {
        return 0.0;
    }
    let adj = 3.0 * (nf - 1.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0));
    let numerator = nf * (nf + 1.0) * (nf - 1.0) * d4_sum;
    let denominator = (nf - 2.0) * (nf - 3.0) * d2_sum * d2_sum;
    numerator / denominator - adj
}

/// Maximum; NaN for empty input.
pub fn max(xs: &[f64]) -> f64 {
    xs.iter().copied().fold(f64::NAN, f64::max)
}
