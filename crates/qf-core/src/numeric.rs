use crate::QfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Relative-only comparison with a tiny absolute floor for values near zero.
    pub fn relative(rel: Real) -> Self {
        Self { abs: 1e-12, rel }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Relative deviation of `a` from `reference`, falling back to the absolute
/// difference when the reference is zero.
pub fn relative_error(a: Real, reference: Real) -> Real {
    let diff = (a - reference).abs();
    if reference == 0.0 {
        diff
    } else {
        diff / reference.abs()
    }
}

/// Largest [`relative_error`] over two equally long slices.
///
/// Returns `None` when the slices differ in length. A NaN entry on either
/// side yields `Real::INFINITY`.
pub fn max_relative_error(a: &[Real], reference: &[Real]) -> Option<Real> {
    if a.len() != reference.len() {
        return None;
    }
    Some(
        a.iter()
            .zip(reference)
            .map(|(&x, &r)| relative_error(x, r))
            .fold(0.0, worst_error),
    )
}

/// `max` over error magnitudes where NaN counts as infinitely bad.
pub fn worst_error(a: Real, b: Real) -> Real {
    if a.is_nan() || b.is_nan() {
        Real::INFINITY
    } else {
        a.max(b)
    }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, QfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(QfError::NonFinite { what, value: v })
    }
}
