//! Euclid contains uscefull math functions shared by the distributions.

/// Computes the natural logarithm of the [Gamma function](https://en.wikipedia.org/wiki/Gamma_function)
/// evaluated at `x`, for `0.0 < x`.
///
/// Uses the [Lanczos aproximation](https://en.wikipedia.org/wiki/Lanczos_approximation)
/// with `g = 7` and `n = 9` terms, wich gives essentially full `f64` precision on
/// the positive axis. Working with `ln(Gamma(x))` instead of `Gamma(x)` avoids the
/// overflow of the factorial for even moderately large `x`, wich is why all the
/// pmf evaluations of this crate are done in log space.
///
/// The behaviour for `x <= 0.0` is not defined (the callers of this crate always
/// evaluate at `x + 1.0` for some non-negative integer `x`).
#[must_use]
pub fn ln_gamma(x: f64) -> f64 {
    const LANCZOS_G: f64 = 7.0;
    const LANCZOS_COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];

    let z: f64 = x - 1.0;

    let mut series: f64 = LANCZOS_COEFFICIENTS[0];
    for (i, coefficient) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        series += coefficient / (z + i as f64);
    }

    let t: f64 = z + LANCZOS_G + 0.5;

    return 0.5 * (2.0 * std::f64::consts::PI).ln() + (z + 0.5) * t.ln() - t + series.ln();
}
