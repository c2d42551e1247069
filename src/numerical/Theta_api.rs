use crate::Utils::logger::{save_convergence_to_file, save_solution_to_csv, save_solution_to_file};
use crate::Utils::plots::plot_solution;
use crate::numerical::Theta::ThetaMethod;
use crate::numerical::convergence::SchemeAnalysis;
use crate::numerical::params::Parameters;
use crate::symbolic::symbolic_engine::Expr;
use chrono::Local;
use log::{error, info};
use nalgebra::DVector;
use simplelog::*;
use std::fs::File;
use std::io;
use tabled::{builder::Builder, settings::Style};

/// General api for the theta-method solver: wires Parameters, symbolic
/// expressions, the time-stepping scheme and the convergence analysis
/// together.
///
/// Example#1
/// ```
/// use ThetaSciRs::numerical::Theta_api::ThetaSolver;
/// use ThetaSciRs::numerical::params::Parameters;
/// let mut params = Parameters::default();
/// params.analysis.plots = false;
/// let mut solver = ThetaSolver::new(params);
/// assert!(solver.solver());
/// assert!(solver.compute_order());
/// println!("rates = {:?}", solver.get_rates());
/// ```
pub struct ThetaSolver {
    pub params: Parameters,
    pub scheme: Option<ThetaMethod>,
    pub analysis: Option<SchemeAnalysis>,
    pub loglevel: Option<String>,
    pub status: String,
}

impl ThetaSolver {
    pub fn new(params: Parameters) -> ThetaSolver {
        ThetaSolver {
            params,
            scheme: None,
            analysis: None,
            loglevel: Some("info".to_string()),
            status: "created".to_string(),
        }
    }

    pub fn from_file(fname: &str) -> ThetaSolver {
        Self::new(Parameters::from_file(fname))
    }

    /// Initializes the model given the parameters: checks the configuration,
    /// turns the expression strings into Rust functions and builds the scheme
    /// and (when requested) the analysis. Nothing is constructed when the
    /// configuration is bad.
    pub fn init(&mut self) -> bool {
        info!("model initialization");
        if !self.params.sanity_check() {
            self.status = "bad_configuration".to_string();
            return false;
        }

        let f_expr = Expr::parse_expression(&self.params.problem.f);
        let f = f_expr.lambdify2D("t", "y");
        let dfdy = f_expr.diff("y").lambdify2D("t", "y");

        let mut scheme = ThetaMethod::new(
            f,
            self.params.problem.y0,
            self.params.domain.T,
            self.params.scheme.N,
            self.params.scheme.theta,
        );
        scheme.set_dfdy(dfdy);
        self.scheme = Some(scheme);

        if self.params.analysis.analysis {
            let uex_expr = Expr::parse_expression(&self.params.analysis.exact_solution);
            self.analysis = Some(SchemeAnalysis::new(
                uex_expr.lambdify1D(),
                self.params.analysis.N_ref.clone(),
                self.params.analysis.norm,
            ));
        }

        self.status = "initialized".to_string();
        info!("initialization completed");
        true
    }

    /// Solves the problem using the chosen theta-method. Returns true when
    /// the Newton solver reaches convergence on every step.
    pub fn solver(&mut self) -> bool {
        if self.scheme.is_none() && !self.init() {
            return false;
        }
        info!(
            "problem: y'(t) = {} for t in (0, {}), y(0) = {}",
            self.params.problem.f, self.params.domain.T, self.params.problem.y0
        );
        let scheme = self.scheme.as_mut().expect("scheme was just initialized");
        info!(
            "solver: theta-method with theta = {}, N = {}, h = {}",
            scheme.get_theta(),
            scheme.get_N(),
            scheme.get_h()
        );

        let success = scheme.solve();
        if success {
            self.status = "finished".to_string();
            if self.params.analysis.plots {
                if let Err(e) = self.save_result() {
                    error!("could not export the solution: {}", e);
                }
                self.plot_result();
            }
        } else {
            self.status = "failed".to_string();
            error!(
                "solve failed: {}",
                self.scheme
                    .as_ref()
                    .and_then(|s| s.message.clone())
                    .unwrap_or_default()
            );
        }
        success
    }

    /// wrapper around the solver function to implement logging
    pub fn solve(&mut self) -> bool {
        let is_logging_disabled = self
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);

        if is_logging_disabled {
            self.solver()
        } else {
            let log_option = match self.loglevel.as_deref() {
                Some("debug") | Some("info") | None => LevelFilter::Info,
                Some("warn") => LevelFilter::Warn,
                Some("error") => LevelFilter::Error,
                Some(other) => panic!("loglevel must be debug, info, warn or error, got {}", other),
            };
            let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
            let name = format!("log_{}.txt", date_and_time);
            let logger_instance = CombinedLogger::init(vec![
                TermLogger::new(
                    log_option,
                    Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(log_option, Config::default(), File::create(name).unwrap()),
            ]);

            match logger_instance {
                Ok(()) => {
                    let res = self.solver();
                    info!("program ended");
                    res
                }
                Err(_) => self.solver(),
            }
        }
    }

    /// Computes the empirical order of the method; a no-op reporting the
    /// situation when the analysis is not configured.
    pub fn compute_order(&mut self) -> bool {
        if self.scheme.is_none() && !self.init() {
            return false;
        }
        match (self.scheme.as_mut(), self.analysis.as_mut()) {
            (Some(scheme), Some(analysis)) => {
                info!("convergence analysis");
                let success = analysis.compute_order(scheme);
                if success {
                    println!("{}", analysis.convergence_table());
                    if self.params.analysis.plots {
                        if let Err(e) = save_convergence_to_file(
                            &analysis.N_ref,
                            &analysis.errors,
                            "convergence.dat",
                        ) {
                            error!("could not export the convergence data: {}", e);
                        }
                    }
                }
                success
            }
            _ => {
                info!("Analysis is not initialized for this solver.");
                false
            }
        }
    }

    /// exact solution sampled on the current grid, present only when the
    /// analysis is configured
    fn exact_column(&self) -> Option<Vec<f64>> {
        match (&self.scheme, &self.analysis) {
            (Some(scheme), Some(analysis)) => Some(
                scheme
                    .grid()
                    .iter()
                    .map(|&ti| (analysis.u_ex)(ti))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Prints the formatted solution in console.
    pub fn print_solution(&self) {
        let Some(scheme) = &self.scheme else {
            info!("nothing to print, solve first");
            return;
        };
        let exact = self.exact_column();
        let mut builder = Builder::default();
        match exact {
            Some(_) => builder.push_record(["t", "u", "u_exact"]),
            None => builder.push_record(["t", "u"]),
        }
        for (i, (ti, ui)) in scheme.grid().iter().zip(scheme.trajectory()).enumerate() {
            match &exact {
                Some(exact) => builder.push_record([
                    format!("{:.6}", ti),
                    format!("{:.6}", ui),
                    format!("{:.6}", exact[i]),
                ]),
                None => builder.push_record([format!("{:.6}", ti), format!("{:.6}", ui)]),
            }
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        println!("{}", table);
    }

    /// Exports the solution as a tab-separated .dat file and a .csv file.
    pub fn save_result(&self) -> io::Result<()> {
        self.export_solution("solution.dat")?;
        let Some(scheme) = &self.scheme else {
            return Ok(());
        };
        let exact = self.exact_column();
        save_solution_to_csv(
            scheme.grid(),
            scheme.trajectory(),
            exact.as_deref(),
            "t",
            "u",
            "solution.csv",
        )?;
        info!("result saved");
        Ok(())
    }

    pub fn export_solution(&self, filename: &str) -> io::Result<()> {
        let Some(scheme) = &self.scheme else {
            return Ok(());
        };
        let exact = self.exact_column();
        save_solution_to_file(scheme.grid(), scheme.trajectory(), exact.as_deref(), filename)
    }

    pub fn export_convergence(&self, filename: &str) -> io::Result<()> {
        let Some(analysis) = &self.analysis else {
            return Ok(());
        };
        if analysis.errors.is_empty() {
            return Ok(());
        }
        save_convergence_to_file(&analysis.N_ref, &analysis.errors, filename)
    }

    pub fn plot_result(&self) {
        if let Some(scheme) = &self.scheme {
            let (t, u) = scheme.get_result();
            plot_solution("t".to_string(), "u".to_string(), t, u);
            info!("result plotted");
        }
    }

    pub fn get_result(&self) -> Option<(DVector<f64>, DVector<f64>)> {
        self.scheme.as_ref().map(|s| s.get_result())
    }

    pub fn get_errors(&self) -> Vec<f64> {
        self.analysis
            .as_ref()
            .map(|a| a.errors.clone())
            .unwrap_or_default()
    }

    pub fn get_rates(&self) -> Vec<f64> {
        self.analysis
            .as_ref()
            .map(|a| a.conv_rates.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_params() -> Parameters {
        let mut params = Parameters::default();
        params.analysis.plots = false;
        params
    }

    #[test]
    fn test_full_pipeline_on_default_parameters() {
        let mut solver = ThetaSolver::new(quiet_params());
        assert!(solver.init());
        assert!(solver.solver());
        assert_eq!(solver.status, "finished");
        let (t, u) = solver.get_result().unwrap();
        assert_eq!(t.len(), 9);
        assert_eq!(u.len(), 9);
        assert!(solver.compute_order());
        assert_eq!(solver.get_errors().len(), 4);
        let rates = solver.get_rates();
        assert_eq!(rates.len(), 3);
        let last_rate = *rates.last().unwrap();
        assert!(
            (last_rate - 2.0).abs() < 0.2,
            "Crank-Nicolson rate {} not close to 2",
            last_rate
        );
    }

    #[test]
    fn test_solver_initializes_lazily() {
        let mut solver = ThetaSolver::new(quiet_params());
        assert!(solver.solver());
        assert!(solver.scheme.is_some());
        assert!(solver.analysis.is_some());
    }

    #[test]
    fn test_compute_order_without_analysis_is_a_noop() {
        let mut params = quiet_params();
        params.analysis.analysis = false;
        params.analysis.exact_solution = String::new();
        params.analysis.N_ref = Vec::new();
        let mut solver = ThetaSolver::new(params);
        assert!(solver.solver());
        assert_eq!(solver.compute_order(), false);
        assert!(solver.get_errors().is_empty());
        assert!(solver.get_rates().is_empty());
    }

    #[test]
    fn test_bad_configuration_fails_fast() {
        let params = Parameters::from_toml_str("[problem]\ny0 = 0.0\n");
        let mut solver = ThetaSolver::new(params);
        assert_eq!(solver.init(), false);
        assert_eq!(solver.status, "bad_configuration");
        assert!(solver.scheme.is_none());
        assert!(solver.analysis.is_none());
        assert_eq!(solver.solver(), false);
    }

    #[test]
    fn test_failed_solve_is_reported() {
        // integrate the blow-up problem past its singularity
        let mut params = quiet_params();
        params.problem.f = "y^2".to_string();
        params.problem.y0 = 1.0;
        params.domain.T = 2.0;
        params.scheme.N = 10;
        params.scheme.theta = 1.0;
        params.analysis.analysis = false;
        params.analysis.exact_solution = String::new();
        params.analysis.N_ref = Vec::new();
        let mut solver = ThetaSolver::new(params);
        assert_eq!(solver.solver(), false);
        assert_eq!(solver.status, "failed");
    }

    #[test]
    fn test_pre_analysis_N_is_recoverable() {
        let mut params = quiet_params();
        params.scheme.N = 13;
        let mut solver = ThetaSolver::new(params);
        assert!(solver.solver());
        assert!(solver.compute_order());
        let scheme = solver.scheme.as_ref().unwrap();
        assert_eq!(scheme.get_N(), 13);
    }

    #[test]
    fn test_export_solution_and_convergence() {
        let dir = tempfile::tempdir().unwrap();
        let solution_path = dir.path().join("solution.dat");
        let convergence_path = dir.path().join("convergence.dat");
        let mut solver = ThetaSolver::new(quiet_params());
        assert!(solver.solver());
        assert!(solver.compute_order());
        // a fresh solve repopulates the trajectory after the analysis sweep
        assert!(solver.solver());
        solver
            .export_solution(solution_path.to_str().unwrap())
            .unwrap();
        solver
            .export_convergence(convergence_path.to_str().unwrap())
            .unwrap();
        let solution = std::fs::read_to_string(&solution_path).unwrap();
        // t, u and the exact-solution column
        assert_eq!(solution.lines().next().unwrap().split('\t').count(), 3);
        let convergence = std::fs::read_to_string(&convergence_path).unwrap();
        assert_eq!(convergence.lines().count(), 4);
    }

    #[test]
    fn test_get_result_before_init_is_none() {
        let solver = ThetaSolver::new(quiet_params());
        assert!(solver.get_result().is_none());
    }
}
