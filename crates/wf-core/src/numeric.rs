use crate::WfError;

/// Floating point type used for flow quantities.
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
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

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, WfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(WfError::NonFinite { what, value: v })
    }
}

/// Accept a finite value in the closed unit interval.
pub fn ensure_fraction(v: Real, what: &'static str) -> Result<Real, WfError> {
    let v = ensure_finite(v, what)?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(WfError::InvalidArg { what })
    }
}

/// `part` as a percentage of `whole`; a zero `whole` yields 0 instead of NaN/inf.
pub fn percentage_of(part: Real, whole: Real) -> Real {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}
