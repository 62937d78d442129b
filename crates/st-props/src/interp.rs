//! One-dimensional bracket-and-interpolate primitives.
//!
//! Axes are assumed sorted ascending. Sortedness is established when tables
//! are assembled and is not re-checked here.

use st_core::Real;

use crate::error::{SteamError, SteamResult};

/// Indices `(i0, i1)` of the grid interval containing `x`.
///
/// Interior queries satisfy `axis[i0] <= x <= axis[i1]`. Queries at or
/// beyond either end clamp to the outermost interval, so callers
/// extrapolate linearly from the two nearest points.
pub fn bracket(axis: &[Real], x: Real) -> SteamResult<(usize, usize)> {
    let n = axis.len();
    if n < 2 {
        return Err(SteamError::TooFewPoints { len: n });
    }
    if x <= axis[0] {
        return Ok((0, 1));
    }
    if x >= axis[n - 1] {
        return Ok((n - 2, n - 1));
    }

    let (mut lo, mut hi) = (0, n - 1);
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if axis[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok((lo, hi))
}

/// Straight line through `(x0, y0)` and `(x1, y1)` evaluated at `x`.
///
/// A zero-width interval yields `y0`.
#[inline]
pub fn lerp(x: Real, x0: Real, x1: Real, y0: Real, y1: Real) -> Real {
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Piecewise-linear lookup of `values` over `axis` at `x`.
pub fn interp1(axis: &[Real], values: &[Real], x: Real) -> SteamResult<Real> {
    if axis.len() != values.len() {
        return Err(SteamError::LengthMismatch {
            axis: axis.len(),
            values: values.len(),
        });
    }
    match axis.len() {
        0 => Err(SteamError::EmptyGrid),
        1 => Ok(values[0]),
        _ => {
            let (i0, i1) = bracket(axis, x)?;
            Ok(lerp(x, axis[i0], axis[i1], values[i0], values[i1]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXIS: [Real; 5] = [0.0, 1.0, 2.5, 4.0, 10.0];

    #[test]
    fn bracket_interior_and_nodes() {
        assert_eq!(bracket(&AXIS, 0.5).unwrap(), (0, 1));
        assert_eq!(bracket(&AXIS, 3.0).unwrap(), (2, 3));
        assert_eq!(bracket(&AXIS, 2.5).unwrap(), (2, 3));
        assert_eq!(bracket(&AXIS, 9.999).unwrap(), (3, 4));
    }

    #[test]
    fn bracket_clamps_at_ends() {
        assert_eq!(bracket(&AXIS, -5.0).unwrap(), (0, 1));
        assert_eq!(bracket(&AXIS, 0.0).unwrap(), (0, 1));
        assert_eq!(bracket(&AXIS, 10.0).unwrap(), (3, 4));
        assert_eq!(bracket(&AXIS, 1e9).unwrap(), (3, 4));
    }

    #[test]
    fn bracket_requires_two_points() {
        assert!(matches!(
            bracket(&[1.0], 1.0),
            Err(SteamError::TooFewPoints { len: 1 })
        ));
        assert!(matches!(
            bracket(&[], 1.0),
            Err(SteamError::TooFewPoints { len: 0 })
        ));
    }

    #[test]
    fn lerp_zero_width_returns_left_value() {
        assert_eq!(lerp(5.0, 2.0, 2.0, 7.0, 9.0), 7.0);
        assert_eq!(lerp(1.5, 1.0, 2.0, 10.0, 20.0), 15.0);
    }

    #[test]
    fn interp1_edge_cases() {
        assert!(matches!(
            interp1(&[1.0, 2.0], &[1.0], 1.5),
            Err(SteamError::LengthMismatch { axis: 2, values: 1 })
        ));
        assert!(matches!(interp1(&[], &[], 1.0), Err(SteamError::EmptyGrid)));
        assert_eq!(interp1(&[3.0], &[42.0], -100.0).unwrap(), 42.0);
    }

    #[test]
    fn interp1_extrapolates_from_outer_pair() {
        let axis = [0.0, 1.0, 2.0];
        let values = [0.0, 10.0, 30.0];
        assert_eq!(interp1(&axis, &values, -1.0).unwrap(), -10.0);
        assert_eq!(interp1(&axis, &values, 3.0).unwrap(), 50.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn midpoint_of_two_point_grid(
            x0 in -1e3..1e3f64,
            dx in 0.1..1e3f64,
            y0 in -1e4..1e4f64,
            y1 in -1e4..1e4f64,
        ) {
            let x1 = x0 + dx;
            let mid = interp1(&[x0, x1], &[y0, y1], 0.5 * (x0 + x1)).unwrap();
            prop_assert!((mid - 0.5 * (y0 + y1)).abs() <= 1e-9 * (1.0 + y0.abs().max(y1.abs())));
        }

        #[test]
        fn bracket_contains_interior_query(
            mut axis in prop::collection::vec(-1e4..1e4f64, 2..40),
            frac in 0.0..1.0f64,
        ) {
            axis.sort_by(f64::total_cmp);
            let first = axis[0];
            let last = axis[axis.len() - 1];
            let x = first + frac * (last - first);
            let (i0, i1) = bracket(&axis, x).unwrap();
            prop_assert_eq!(i1, i0 + 1);
            prop_assert!(axis[i0] <= x && x <= axis[i1]);
        }
    }
}
