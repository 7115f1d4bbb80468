/// Arithmetic mean, NaN for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// The `q`-th percentile (`0 <= q <= 100`) of ascending `sorted` values.
///
/// Interpolates linearly between the two order statistics around the
/// virtual index `q / 100 * (n - 1)`.
pub(crate) fn percentile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0. ..=100.).contains(&q));

    let last = sorted.len() - 1;
    let index = q / 100. * last as f64;
    let lower = (index.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let frac = index - lower as f64;
    lerp(sorted[lower], sorted[upper], frac)
}

/// Expects `a <= b`. The result never leaves `[a, b]`, even after rounding.
#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if a == b {
        return a;
    }
    (a + (b - a) * t).clamp(a, b)
}
