/// error norms used by the convergence analysis
pub mod norms;
/// scalar Newton-Raphson root-finder used to resolve the implicit stage equation
/// Example#1
/// ```
/// use ThetaSciRs::numerical::NR_scalar::NRScalar;
/// let mut nr = NRScalar::new(1e-10, 100);
/// let (root, converged) = nr.solve(&|x: f64| x * x - 2.0, None, 1.0);
/// assert!(converged);
/// assert!((root - 2.0f64.sqrt()).abs() < 1e-8);
/// ```
pub mod NR_scalar;
/// theta-method time stepping scheme for scalar IVPs
///          y'(t) = f(t, y),  y(0) = y0,  t in [0, T]
/// theta = 0 is Forward Euler, theta = 1 Backward Euler, theta = 0.5 Crank-Nicolson
/// Example#1
/// ```
/// use ThetaSciRs::numerical::Theta::ThetaMethod;
/// // y' = -y, y(0) = 1
/// let mut scheme = ThetaMethod::new(Box::new(|_t, y| -y), 1.0, 1.0, 100, 0.5);
/// assert!(scheme.solve());
/// let (t, u) = scheme.get_result();
/// assert_eq!(t.len(), 101);
/// println!("u(T) = {}", u[100]);
/// ```
pub mod Theta;
/// empirical convergence-order analysis: re-solve at a list of grid
/// refinements, collect normed errors against a known exact solution and fit
/// observed rates from consecutive refinement pairs
pub mod convergence;
/// parameters of the model loaded from a TOML file
pub mod params;
/// general api wiring parameters, symbolic expressions, the scheme and the
/// convergence analysis together
pub mod Theta_api;
/// a collection of test examples of scalar IVPs with exact solutions for
/// testing purposes
pub mod Examples_and_utils;
