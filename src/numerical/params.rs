use crate::numerical::norms::Norms;
use crate::symbolic::symbolic_engine::Expr;
use log::error;
use std::fmt;
use std::fs;
use toml::{Table, Value};

/// Domain is [0, T].
#[derive(Debug, Clone)]
pub struct Domain {
    pub T: f64,
}

impl Default for Domain {
    fn default() -> Domain {
        Domain { T: 1.0 }
    }
}

#[derive(Debug, Clone)]
pub struct Problem {
    /// Initial datum
    pub y0: f64,
    /// Forcing term, a 2-ary expression of (t, y)
    pub f: String,
}

impl Default for Problem {
    fn default() -> Problem {
        Problem {
            y0: 0.0,
            f: "-t*exp(-y)".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scheme {
    /// Number of intervals (number of nodes = N+1)
    pub N: usize,
    /// Theta method parameter, theta in [0,1]:
    /// - theta = 0.0 : Forward Euler
    /// - theta = 0.5 : Crank-Nicolson (default)
    /// - theta = 1.0 : Backward Euler
    pub theta: f64,
}

impl Default for Scheme {
    fn default() -> Scheme {
        Scheme { N: 8, theta: 0.5 }
    }
}

#[derive(Debug, Clone)]
pub struct Analysis {
    /// True if the analysis is initialized
    pub analysis: bool,
    /// Exact solution, a 1-ary expression of t
    pub exact_solution: String,
    /// Refinements vector, strictly ascending
    pub N_ref: Vec<usize>,
    /// Norm used to compute the errors
    pub norm: Norms,
    /// If true solution and convergence files/plots are generated
    pub plots: bool,
}

impl Default for Analysis {
    fn default() -> Analysis {
        Analysis {
            analysis: true,
            exact_solution: "log(-t*t/2 + 1)".to_string(),
            N_ref: vec![8, 16, 32, 64],
            norm: Norms::Linf,
            plots: true,
        }
    }
}

/// Parameters of the model, normally loaded from a TOML file with sections
/// [domain], [problem], [scheme] and an optional [analysis]. Problems found
/// during loading are collected into `errors` and reported by
/// `sanity_check()` before any solve is attempted.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    pub domain: Domain,
    pub problem: Problem,
    pub scheme: Scheme,
    pub analysis: Analysis,
    pub errors: Vec<String>,
}

fn value_as_f64(value: &Value) -> Option<f64> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|i| i as f64))
}

impl Parameters {
    /// Initializes the parameters from a TOML file.
    pub fn from_file(fname: &str) -> Parameters {
        match fs::read_to_string(fname) {
            Ok(content) => Self::from_toml_str(&content),
            Err(_) => {
                let mut params = Parameters::default();
                params
                    .errors
                    .push(format!("Error: Parameter file {} does not exist.", fname));
                params
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Parameters {
        let mut params = Parameters::default();
        let data: Table = match content.parse::<Table>() {
            Ok(table) => table,
            Err(e) => {
                params
                    .errors
                    .push(format!("Error: parameter file is not valid TOML: {}", e));
                return params;
            }
        };

        // Domain parameters
        if let Some(T) = data.get("domain").and_then(|d| d.get("T")) {
            match value_as_f64(T) {
                Some(T) => params.domain.T = T,
                None => params.errors.push("Bad initialization: T must be a number.".to_string()),
            }
        }

        // Problem parameters: the forcing term and the initial datum must be provided
        let f = data.get("problem").and_then(|p| p.get("f")).and_then(|v| v.as_str());
        let y0 = data.get("problem").and_then(|p| p.get("y0")).and_then(value_as_f64);
        match (f, y0) {
            (Some(f), Some(y0)) => {
                params.problem.f = f.to_string();
                params.problem.y0 = y0;
            }
            _ => {
                params.errors.push(
                    "Bad initialization: In a custom initialization the forcing term and the initial datum must be provided."
                        .to_string(),
                );
                return params;
            }
        }

        // Scheme parameters
        if let Some(N) = data.get("scheme").and_then(|s| s.get("N")) {
            match N.as_integer() {
                Some(N) if N >= 1 => params.scheme.N = N as usize,
                _ => params
                    .errors
                    .push("Bad initialization: N must be a positive integer.".to_string()),
            }
        }
        if let Some(theta) = data.get("scheme").and_then(|s| s.get("theta")) {
            match value_as_f64(theta) {
                Some(theta) => params.scheme.theta = theta,
                None => params
                    .errors
                    .push("Bad initialization: theta must be a number.".to_string()),
            }
        }

        // Analysis parameters
        params.analysis.analysis = data.contains_key("analysis");
        if params.analysis.analysis {
            let analysis = &data["analysis"];
            match analysis.get("exact_solution").and_then(|v| v.as_str()) {
                Some(exact) => params.analysis.exact_solution = exact.to_string(),
                None => {
                    params.errors.push(
                        "Bad initialization: When the analysis is initialized the exact solution must be provided."
                            .to_string(),
                    );
                    return params;
                }
            }
            if let Some(N_ref) = analysis.get("N_ref") {
                match N_ref.as_array() {
                    Some(array) => {
                        let mut parsed: Vec<usize> = Vec::new();
                        for item in array {
                            match item.as_integer() {
                                Some(n) if n >= 1 => parsed.push(n as usize),
                                _ => params.errors.push(
                                    "Bad initialization: N_ref entries must be positive integers."
                                        .to_string(),
                                ),
                            }
                        }
                        params.analysis.N_ref = parsed;
                    }
                    None => params
                        .errors
                        .push("Bad initialization: N_ref must be an array.".to_string()),
                }
            }
            if let Some(norm) = analysis.get("norm").and_then(|v| v.as_str()) {
                match Norms::from_key(norm) {
                    Ok(norm) => params.analysis.norm = norm,
                    Err(e) => params.errors.push(format!("Bad initialization: {}", e)),
                }
            }
            if let Some(plots) = analysis.get("plots").and_then(|v| v.as_bool()) {
                params.analysis.plots = plots;
            }
        } else {
            params.analysis.exact_solution = String::new();
            params.analysis.N_ref = Vec::new();
        }

        params.validate();
        params
    }

    /// Range and expression checks run once at load time; anything found here
    /// is reported through `sanity_check` before a solver is constructed.
    fn validate(&mut self) {
        if self.domain.T <= 0.0 {
            self.errors
                .push("Bad initialization: the domain horizon T must be positive.".to_string());
        }
        if !(0.0..=1.0).contains(&self.scheme.theta) {
            self.errors
                .push("Bad initialization: theta must belong to [0, 1].".to_string());
        }
        match Expr::try_parse_expression(&self.problem.f) {
            Ok(expr) => {
                let vars = expr.all_arguments_are_variables();
                if !vars.iter().all(|v| v == "t" || v == "y") {
                    self.errors.push(format!(
                        "Bad initialization: the forcing term may only depend on t and y, found {:?}.",
                        vars
                    ));
                }
            }
            Err(e) => self
                .errors
                .push(format!("Bad initialization: cannot parse the forcing term: {}", e)),
        }
        if self.analysis.analysis {
            match Expr::try_parse_expression(&self.analysis.exact_solution) {
                Ok(expr) => {
                    let vars = expr.all_arguments_are_variables();
                    if !vars.iter().all(|v| v == "t") {
                        self.errors.push(format!(
                            "Bad initialization: the exact solution may only depend on t, found {:?}.",
                            vars
                        ));
                    }
                }
                Err(e) => self.errors.push(format!(
                    "Bad initialization: cannot parse the exact solution: {}",
                    e
                )),
            }
            if self.analysis.N_ref.len() < 2 {
                self.errors.push(
                    "Bad initialization: the refinements vector needs at least two entries."
                        .to_string(),
                );
            } else if !self.analysis.N_ref.windows(2).all(|w| w[0] < w[1]) {
                self.errors.push(
                    "Bad initialization: the refinements vector must be strictly ascending."
                        .to_string(),
                );
            }
        }
    }

    /// Checks that no errors occurred during the initialization phase.
    pub fn sanity_check(&self) -> bool {
        for e in &self.errors {
            error!("{}", e);
        }
        self.errors.is_empty()
    }
}

/// Model parameters can be printed easily.
impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.errors.is_empty() {
            for e in &self.errors {
                writeln!(f, "{}", e)?;
            }
            return Ok(());
        }
        writeln!(f, "Domain:")?;
        writeln!(f, "- T: {}", self.domain.T)?;
        writeln!(f, "Problem:")?;
        writeln!(f, "- Forcing term: {}", self.problem.f)?;
        writeln!(f, "- Initial datum (y0): {}", self.problem.y0)?;
        writeln!(f, "Scheme:")?;
        writeln!(f, "- N: {}", self.scheme.N)?;
        writeln!(f, "- Theta: {}", self.scheme.theta)?;
        if !self.analysis.analysis {
            writeln!(f, "Analysis: not initialized")?;
        } else {
            writeln!(f, "Analysis:")?;
            writeln!(f, "- Exact solution: {}", self.analysis.exact_solution)?;
            writeln!(f, "- Refinements vector: {:?}", self.analysis.N_ref)?;
            writeln!(f, "- Norm: {:?}", self.analysis.norm)?;
            writeln!(f, "- Plots: {}", if self.analysis.plots { "Yes" } else { "No" })?;
        }
        Ok(())
    }
}
