//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Wrap an angle into the range (-pi, pi].
pub fn wrap_pi<T>(angle: T) -> T
where
    T: Float,
{
    let pi_t = T::from(std::f64::consts::PI).unwrap_or_else(T::zero);
    let tau_t = pi_t + pi_t;

    let wrapped = rem_euclid(angle + pi_t, tau_t) - pi_t;

    // rem_euclid gives [0, 2pi) so -pi is the only value outside the range
    if wrapped <= -pi_t {
        wrapped + tau_t
    } else {
        wrapped
    }
}

/// Get the shortest signed angular distance from `from` to `to`.
///
/// Adding the result to `from` gives an angle equivalent to `to`.
pub fn ang_dist<T>(from: T, to: T) -> T
where
    T: Float,
{
    wrap_pi(to - from)
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    const PI: f64 = std::f64::consts::PI;
    const TAU: f64 = std::f64::consts::TAU;

    #[test]
    fn test_wrap_pi() {
        assert_relative_eq!(wrap_pi(0f64), 0.0);
        assert_relative_eq!(wrap_pi(PI), PI);
        assert_relative_eq!(wrap_pi(-PI), PI);
        assert_relative_eq!(wrap_pi(TAU + 1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_pi(-6.0), -6.0 + TAU, epsilon = 1e-12);
        assert_relative_eq!(wrap_pi(3.5 * PI), -0.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_ang_dist() {
        assert_relative_eq!(ang_dist(1f64, 2f64), 1.0);
        assert_relative_eq!(ang_dist(2f64, 1f64), -1.0);
        assert_relative_eq!(ang_dist(3.0f64, -3.0), TAU - 6.0, epsilon = 1e-12);
        assert_relative_eq!(ang_dist(-3.0f64, 3.0), 6.0 - TAU, epsilon = 1e-12);
    }
}
