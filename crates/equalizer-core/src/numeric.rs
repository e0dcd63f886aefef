//! Small numeric helpers: piecewise-linear interpolation and clamping.
//!
//! Everything operates on fixed five-element arrays or scalars; no dynamic
//! shapes or broadcasting are needed.

use equalizer_types::SERVICE_COUNT;

/// Piecewise-linear interpolation of `x` over the points `(xs[i], ys[i])`.
///
/// `xs` must be increasing. Inputs left of the first breakpoint return the
/// first output, inputs right of the last return the last output. Returns
/// `None` when the slices are empty or of different lengths.
pub fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() {
        return None;
    }
    let (&x_first, &y_first) = (xs.first()?, ys.first()?);
    let (&x_last, &y_last) = (xs.last()?, ys.last()?);

    if x <= x_first {
        return Some(y_first);
    }
    if x >= x_last {
        return Some(y_last);
    }

    let points = xs.iter().zip(ys);
    for ((x0, y0), (x1, y1)) in points.clone().zip(points.skip(1)) {
        if x <= *x1 {
            let span = x1 - x0;
            if span <= 0.0 {
                return Some(*y1);
            }
            let t = (x - x0) / span;
            return Some(y0 + t * (y1 - y0));
        }
    }
    Some(y_last)
}

/// Whether `xs` is strictly increasing, as [`interpolate`] requires.
pub fn is_strictly_increasing(xs: &[f64]) -> bool {
    xs.iter().zip(xs.iter().skip(1)).all(|(a, b)| a < b)
}

/// Clamp a value onto the `[-bound, bound]` result scale.
///
/// NaN maps to 0 and `-0.0` to `0.0`, so every result renders as a plain
/// number. `bound` must be finite and non-negative; engine construction
/// checks this.
pub fn clamp_symmetric(value: f64, bound: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    let clamped = value.clamp(-bound, bound);
    if clamped.abs() <= 0.0 { 0.0 } else { clamped }
}

/// Clamp a scale factor onto `[0, f64::MAX]`. NaN maps to 0.
pub fn finite_factor(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, f64::MAX) }
}

/// Clamp every slot onto `[-bound, bound]`.
pub fn clamp_all(values: [f64; SERVICE_COUNT], bound: f64) -> [f64; SERVICE_COUNT] {
    values.map(|v| clamp_symmetric(v, bound))
}
