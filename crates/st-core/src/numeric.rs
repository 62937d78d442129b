use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    pub const fn absolute(abs: Real) -> Self {
        Self { abs, rel: 0.0 }
    }
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

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// True when `x` is a valid vapor quality (closed interval [0, 1]).
#[inline]
pub fn is_unit_fraction(x: Real) -> bool {
    (0.0..=1.0).contains(&x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn absolute_tolerance_ignores_scale() {
        let tol = Tolerances::absolute(1e-10);
        assert!(nearly_equal(2676.1, 2676.1 + 5e-11, tol));
        assert!(!nearly_equal(2676.1, 2676.1 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn unit_fraction_is_closed() {
        assert!(is_unit_fraction(0.0));
        assert!(is_unit_fraction(1.0));
        assert!(!is_unit_fraction(-1e-12));
        assert!(!is_unit_fraction(1.000_001));
        assert!(!is_unit_fraction(Real::NAN));
    }
}
