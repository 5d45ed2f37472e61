// src/processing/quadrature.rs
//! Numerical integration over a sampled time axis
//!
//! Composite Simpson's rule fits a quadratic to each pair of sub-intervals,
//! honouring non-uniform sample spacing. When the sample count is even the
//! final interval has no pairing partner and is closed with a single
//! trapezoid; this parity-dependent fallback is part of the numerical
//! contract and must not be simplified to plain trapezoidal integration.

/// Integrate `y` over `x` with the composite Simpson's rule.
///
/// `y` and `x` must be the same length. Fewer than two samples integrate to
/// zero. Non-finite values propagate into the result rather than erroring.
pub fn simpson(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(y.len(), x.len());
    let n = y.len();
    if n < 2 {
        return 0.0;
    }
    if n == 2 {
        return trapezoid_segment(y[0], y[1], x[1] - x[0]);
    }

    // Number of points covered by full quadratic pairs; odd count uses all.
    let paired_end = if n % 2 == 1 { n } else { n - 1 };

    let mut total = 0.0;
    let mut i = 0;
    while i + 2 < paired_end {
        let h0 = x[i + 1] - x[i];
        let h1 = x[i + 2] - x[i + 1];
        let hsum = h0 + h1;
        let hprod = h0 * h1;
        let h_ratio = h0 / h1;
        total += (hsum / 6.0)
            * (y[i] * (2.0 - 1.0 / h_ratio)
                + y[i + 1] * hsum * hsum / hprod
                + y[i + 2] * (2.0 - h_ratio));
        i += 2;
    }

    if n % 2 == 0 {
        total += trapezoid_segment(y[n - 2], y[n - 1], x[n - 1] - x[n - 2]);
    }

    total
}

/// Integrate `y` over `x` with the composite trapezoidal rule.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(y.len(), x.len());
    y.windows(2)
        .zip(x.windows(2))
        .map(|(ys, xs)| trapezoid_segment(ys[0], ys[1], xs[1] - xs[0]))
        .sum()
}

#[inline]
fn trapezoid_segment(y0: f64, y1: f64, dx: f64) -> f64 {
    0.5 * (y0 + y1) * dx
}
