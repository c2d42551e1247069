//! examples of usage of ThetaSciRs
/// theta-method and convergence analysis examples
pub mod theta_examples;
