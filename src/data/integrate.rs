// ---------------------------------------------------------------------------
// Summary statistics over a (wavelength, count) series
// ---------------------------------------------------------------------------

/// Area under `y(x)` by the trapezoid rule on the actual `x` spacing.
///
/// Fewer than two samples give 0. A descending axis gives a negative area.
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}

/// `(wavelength, height)` of the largest count; first one wins on ties.
/// NaN counts are ignored.
pub fn peak(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    x.iter()
        .zip(y.iter())
        .filter(|(_, yi)| !yi.is_nan())
        .fold(None, |best: Option<(f64, f64)>, (&xi, &yi)| match best {
            Some((_, h)) if h >= yi => best,
            _ => Some((xi, yi)),
        })
}
