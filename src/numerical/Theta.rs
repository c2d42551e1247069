use core::fmt::Display;

/// Theta-method for scalar ordinary differential equations
///     y'(t) = f(t, y),  y(0) = y0,  t in [0, T]
/// on a uniform grid t_i = i*h, h = T/N. At every step the implicit stage
/// equation
///     G(x) = x - theta*h*f(t_i, x) - (1-theta)*h*f(t_{i-1}, u_{i-1}) - u_{i-1}
/// is resolved by Newton-Raphson warm-started from the previous solution
/// value; theta = 0 degenerates to the explicit Forward Euler update and
/// bypasses the root-finder entirely.
///
/// The instance is a single-owner object: all operations take &mut self and
/// no internal synchronization is provided.
use crate::numerical::NR_scalar::NRScalar;
use crate::numerical::convergence::SteppableScheme;
use log::{error, info};
use nalgebra::DVector;

pub struct ThetaMethod {
    pub f: Box<dyn Fn(f64, f64) -> f64>,
    /// analytic df/dy, used for the Newton derivative when present;
    /// otherwise the root-finder falls back to finite differences
    pub dfdy: Option<Box<dyn Fn(f64, f64) -> f64>>,
    pub newton: NRScalar,
    y0: f64,
    T: f64,
    N: usize,
    h: f64,
    theta: f64,
    N_origin: usize,
    t: Vec<f64>,
    u: Vec<f64>,
    pub status: String,
    pub message: Option<String>,
}

impl Display for ThetaMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ThetaMethod {{ theta: {}, T: {}, N: {}, h: {}, y0: {}, status: {} }}",
            self.theta, self.T, self.N, self.h, self.y0, self.status
        )
    }
}

impl ThetaMethod {
    pub fn new(f: Box<dyn Fn(f64, f64) -> f64>, y0: f64, T: f64, N: usize, theta: f64) -> ThetaMethod {
        assert!(T > 0.0, "horizon T must be positive");
        assert!(N >= 1, "step count N must be at least 1");
        assert!(
            (0.0..=1.0).contains(&theta),
            "theta must belong to [0, 1]"
        );
        let mut scheme = ThetaMethod {
            f,
            dfdy: None,
            newton: NRScalar::new(1e-8, 100),
            y0,
            T,
            N,
            h: 0.0,
            theta,
            N_origin: N,
            t: Vec::new(),
            u: Vec::new(),
            status: "created".to_string(),
            message: None,
        };
        scheme.create_grid();
        scheme
    }

    /// Attaches the analytic derivative of the forcing term with respect to y.
    pub fn set_dfdy(&mut self, dfdy: Box<dyn Fn(f64, f64) -> f64>) {
        self.dfdy = Some(dfdy);
    }

    pub fn set_solver_params(&mut self, tolerance: Option<f64>, max_iterations: Option<usize>) {
        if let Some(tolerance) = tolerance {
            assert!(
                tolerance >= 0.0,
                "Tolerance should be a non-negative number."
            );
            self.newton.tolerance = tolerance;
        }
        if let Some(max_iterations) = max_iterations {
            assert!(
                max_iterations > 0,
                "Max iterations should be a positive number."
            );
            self.newton.max_iterations = max_iterations;
        }
    }

    fn create_grid(&mut self) {
        self.h = self.T / self.N as f64;
        self.t = (0..=self.N).map(|i| i as f64 * self.h).collect();
    }

    /// Time stepping loop. Returns true when the whole grid was traversed;
    /// on a Newton failure the loop aborts immediately, the status becomes
    /// "failed" and the trajectory is left in the partial state accumulated
    /// so far - it is not meaningful past the failing index.
    pub fn solve(&mut self) -> bool {
        self.status = "running".to_string();
        self.message = None;
        self.u.clear();
        self.u.reserve(self.N + 1);
        self.u.push(self.y0);

        let theta = self.theta;
        let h = self.h;
        let f = &self.f;
        let dfdy = self.dfdy.as_deref();
        let newton = &mut self.newton;
        let mut un = self.y0;
        let mut tn = self.t[0];

        for i in 1..=self.N {
            let ti = self.t[i];
            if theta == 0.0 {
                // the stage equation is already explicit
                un = un + h * f(tn, un);
                if !un.is_finite() {
                    self.status = "failed".to_string();
                    self.message = Some(format!("solution is not finite at t = {}", ti));
                    error!("explicit update produced a non-finite value at t = {}", ti);
                    return false;
                }
            } else {
                let rhs = (1.0 - theta) * h * f(tn, un) + un;
                let G = |x: f64| x - theta * h * f(ti, x) - rhs;
                let (root, converged) = match dfdy {
                    Some(d) => {
                        let dG = |x: f64| 1.0 - theta * h * d(ti, x);
                        newton.solve(&G, Some(&dG), un)
                    }
                    None => newton.solve(&G, None, un),
                };
                if !converged {
                    self.status = "failed".to_string();
                    self.message =
                        Some(format!("Newton cannot find the stage value at t = {}", ti));
                    error!("Newton algorithm cannot find the solution at t = {}", ti);
                    return false;
                }
                un = root;
            }
            self.u.push(un);
            tn = ti;
        }

        self.status = "finished".to_string();
        info!("theta-method finished, {} steps, h = {}", self.N, self.h);
        true
    }

    /// Updates N, recomputes h, clears grid and trajectory and rebuilds the
    /// grid. Does not re-solve.
    pub fn set_N(&mut self, N: usize) {
        assert!(N >= 1, "step count N must be at least 1");
        self.N = N;
        self.t.clear();
        self.u.clear();
        self.create_grid();
        self.status = "created".to_string();
        self.message = None;
    }

    /// Restores the N the scheme was constructed with (used after the
    /// convergence order computation).
    pub fn restore_N(&mut self) {
        self.set_N(self.N_origin);
    }

    pub fn get_N(&self) -> usize {
        self.N
    }

    pub fn get_h(&self) -> f64 {
        self.h
    }

    pub fn get_theta(&self) -> f64 {
        self.theta
    }

    pub fn grid(&self) -> &[f64] {
        &self.t
    }

    pub fn trajectory(&self) -> &[f64] {
        &self.u
    }

    pub fn get_result(&self) -> (DVector<f64>, DVector<f64>) {
        (
            DVector::from_vec(self.t.clone()),
            DVector::from_vec(self.u.clone()),
        )
    }
}

impl SteppableScheme for ThetaMethod {
    fn solve(&mut self) -> bool {
        ThetaMethod::solve(self)
    }

    fn set_N(&mut self, N: usize) {
        ThetaMethod::set_N(self, N)
    }

    fn restore_N(&mut self) {
        ThetaMethod::restore_N(self)
    }

    fn get_N(&self) -> usize {
        ThetaMethod::get_N(self)
    }

    fn grid(&self) -> &[f64] {
        ThetaMethod::grid(self)
    }

    fn trajectory(&self) -> &[f64] {
        ThetaMethod::trajectory(self)
    }
}
