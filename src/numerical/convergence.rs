use crate::numerical::norms::Norms;
use itertools::Itertools;
use log::{error, info, warn};
use tabled::{builder::Builder, settings::Style};

/// Capabilities the convergence analysis needs from a time-stepping scheme.
/// Any one-step (or multistep) integrator exposing these operations can be
/// driven through a refinement sweep without the driver knowing the scheme.
pub trait SteppableScheme {
    fn solve(&mut self) -> bool;
    fn set_N(&mut self, N: usize);
    fn restore_N(&mut self);
    fn get_N(&self) -> usize;
    fn grid(&self) -> &[f64];
    fn trajectory(&self) -> &[f64];
}

/// Convergence-order analysis: re-solves the borrowed scheme for every entry
/// of the refinement list, collects normed errors against the exact solution
/// and fits observed rates from consecutive refinement pairs under the
/// assumption error ~ C*h^p. The scheme's step count is restored afterwards,
/// whether the sweep succeeds or aborts.
pub struct SchemeAnalysis {
    pub u_ex: Box<dyn Fn(f64) -> f64>,
    pub N_ref: Vec<usize>,
    pub norm: Norms,
    pub errors: Vec<f64>,
    pub conv_rates: Vec<f64>,
}

impl SchemeAnalysis {
    pub fn new(u_ex: Box<dyn Fn(f64) -> f64>, N_ref: Vec<usize>, norm: Norms) -> SchemeAnalysis {
        assert!(
            N_ref.len() >= 2,
            "at least two refinements are needed to compute a rate"
        );
        assert!(
            N_ref.windows(2).all(|w| w[0] < w[1]),
            "refinements vector must be strictly ascending"
        );
        SchemeAnalysis {
            u_ex,
            N_ref,
            norm,
            errors: Vec::new(),
            conv_rates: Vec::new(),
        }
    }

    /// Norm of the pointwise differences u_ex(t_i) - u_i over the whole grid.
    /// The absolute value is applied inside the norm itself.
    pub fn compute_error(&self, scheme: &dyn SteppableScheme) -> f64 {
        let t = scheme.grid();
        let u = scheme.trajectory();
        assert_eq!(
            t.len(),
            u.len(),
            "grid and trajectory must have the same length"
        );
        let differences: Vec<f64> = t
            .iter()
            .zip(u.iter())
            .map(|(&ti, &ui)| (self.u_ex)(ti) - ui)
            .collect();
        self.norm.norm(&differences)
    }

    /// Runs the refinement sweep. On success the error and rate series are
    /// filled and true is returned. A failing refinement aborts the whole
    /// analysis: no rates are produced, the errors collected so far stay
    /// readable and the scheme gets its original N back.
    pub fn compute_order(&mut self, scheme: &mut dyn SteppableScheme) -> bool {
        self.errors.clear();
        self.conv_rates.clear();

        let N_saved = scheme.get_N();
        for &N_conv in self.N_ref.iter() {
            info!("solving the problem for N = {}", N_conv);
            scheme.set_N(N_conv);
            if !scheme.solve() {
                error!(
                    "refinement N = {} failed, convergence analysis stopped",
                    N_conv
                );
                scheme.set_N(N_saved);
                return false;
            }
            let error = self.compute_error(scheme);
            info!("N = {}, error = {:e}", N_conv, error);
            self.errors.push(error);
        }

        // rate_j = log10(e_{j+1}/e_j) / log10(N_j/N_{j+1}); the refinement
        // counts must be divided as floats, integer division would truncate
        self.conv_rates = self
            .N_ref
            .iter()
            .zip(self.errors.iter())
            .tuple_windows()
            .map(|((&n0, &e0), (&n1, &e1))| (e1 / e0).log10() / (n0 as f64 / n1 as f64).log10())
            .collect();
        info!("convergence rates: {:?}", self.conv_rates);

        scheme.set_N(N_saved);
        true
    }

    /// Pretty summary of the sweep: one row per refinement with its error,
    /// rates attached to the refined row.
    pub fn convergence_table(&self) -> String {
        if self.errors.is_empty() {
            warn!("no errors accumulated, run compute_order first");
            return String::new();
        }
        let mut builder = Builder::default();
        builder.push_record(["N", "error", "rate"]);
        for (j, (n, error)) in self.N_ref.iter().zip(self.errors.iter()).enumerate() {
            let rate = if j == 0 {
                "-".to_string()
            } else {
                format!("{:.4}", self.conv_rates[j - 1])
            };
            builder.push_record([n.to_string(), format!("{:e}", error), rate]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}
