use log::{error, warn};

/// below this magnitude the derivative is treated as vanished and the
/// iteration is abandoned instead of dividing by it
const DERIVATIVE_FLOOR: f64 = 1e-14;

/// Approximates the first derivative of a function with centered finite
/// differences: (f(x+h) - f(x-h)) / (2h)
pub fn finite_diff(f: &dyn Fn(f64) -> f64, x: f64, h: f64) -> f64 {
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// Newton-Raphson method for a single scalar equation F(x) = 0.
///
/// The derivative may be supplied analytically; when it is not, a centered
/// finite difference with step `fd_step` is used. Non-convergence is reported
/// through the returned flag, never by panicking - the caller decides whether
/// a failed root search is fatal.
pub struct NRScalar {
    pub tolerance: f64,        // tolerance on the residual |F(x)|
    pub max_iterations: usize, // max number of iterations
    pub fd_step: f64,          // finite difference step for the numeric derivative
    pub i: usize,              // iterations spent by the last call
    pub max_error: f64,        // residual at exit of the last call
}

impl NRScalar {
    pub fn new(tolerance: f64, max_iterations: usize) -> NRScalar {
        assert!(
            tolerance >= 0.0,
            "Tolerance should be a non-negative number."
        );
        assert!(
            max_iterations > 0,
            "Max iterations should be a positive number."
        );
        NRScalar {
            tolerance,
            max_iterations,
            fd_step: 1e-3,
            i: 0,
            max_error: 0.0,
        }
    }

    /// Iterates x_{k+1} = x_k - F(x_k)/dF(x_k) starting from `x0` until the
    /// residual |F(x_k)| falls below the tolerance or the iteration budget is
    /// exceeded. Returns (root, converged).
    pub fn solve(
        &mut self,
        F: &dyn Fn(f64) -> f64,
        dF: Option<&dyn Fn(f64) -> f64>,
        x0: f64,
    ) -> (f64, bool) {
        let mut x = x0;
        self.i = 0;
        while self.i <= self.max_iterations {
            let fx = F(x);
            self.max_error = fx.abs();
            if !fx.is_finite() {
                error!("residual is not finite at x = {}", x);
                return (x, false);
            }
            if fx.abs() < self.tolerance {
                return (x, true);
            }
            if self.i == self.max_iterations {
                break;
            }
            let dfx = match dF {
                Some(d) => d(x),
                None => finite_diff(F, x, self.fd_step),
            };
            if !dfx.is_finite() || dfx.abs() < DERIVATIVE_FLOOR {
                warn!("derivative underflow at x = {}, dF = {}", x, dfx);
                return (x, false);
            }
            x = x - fx / dfx;
            self.i += 1;
        }
        warn!(
            "Maximum number of iterations reached. No root found, residual = {}",
            self.max_error
        );
        (x, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_finite_diff() {
        // d/dx x^2 at 3 with centered differences is exact for polynomials of degree 2
        let f = |x: f64| x * x;
        assert_relative_eq!(finite_diff(&f, 3.0, 1e-3), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sqrt_two_with_numeric_derivative() {
        let mut nr = NRScalar::new(1e-10, 100);
        let (root, converged) = nr.solve(&|x: f64| x * x - 2.0, None, 1.0);
        assert!(converged);
        assert_relative_eq!(root, 2.0f64.sqrt(), epsilon = 1e-8);
    }

    #[test]
    fn test_sqrt_two_with_analytic_derivative() {
        let mut nr = NRScalar::new(1e-12, 100);
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;
        let (root, converged) = nr.solve(&f, Some(&df), 1.0);
        assert!(converged);
        assert_relative_eq!(root, 2.0f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_transcendental_equation() {
        // x = cos(x) near 0.739085
        let mut nr = NRScalar::new(1e-12, 100);
        let (root, converged) = nr.solve(&|x: f64| x - x.cos(), None, 0.5);
        assert!(converged);
        assert_relative_eq!(root, 0.7390851332151607, epsilon = 1e-8);
    }

    #[test]
    fn test_no_real_root_does_not_converge() {
        // x^2 + 1 = 0 has no real root; the iteration must give up cleanly
        let mut nr = NRScalar::new(1e-10, 50);
        let (_root, converged) = nr.solve(&|x: f64| x * x + 1.0, None, 1.0);
        assert_eq!(converged, false);
    }

    #[test]
    fn test_derivative_underflow_reported() {
        // F'(0) = 0 for x^2 + 1 starting exactly at the stationary point
        let mut nr = NRScalar::new(1e-10, 50);
        let (_root, converged) = nr.solve(&|x: f64| x * x + 1.0, None, 0.0);
        assert_eq!(converged, false);
    }

    #[test]
    fn test_iteration_budget_respected() {
        // one iteration is not enough for sqrt(2) from a poor guess
        let mut nr = NRScalar::new(1e-14, 1);
        let (_root, converged) = nr.solve(&|x: f64| x * x - 2.0, None, 100.0);
        assert_eq!(converged, false);
        assert!(nr.i <= 1);
    }

    #[test]
    fn test_converges_immediately_on_root() {
        let mut nr = NRScalar::new(1e-10, 50);
        let (root, converged) = nr.solve(&|x: f64| x * x - 4.0, None, 2.0);
        assert!(converged);
        assert_relative_eq!(root, 2.0, epsilon = 1e-12);
        assert_eq!(nr.i, 0);
    }
}
