use crate::numerical::Examples_and_utils::IvpEquation;
use crate::numerical::Theta::ThetaMethod;
use crate::numerical::Theta_api::ThetaSolver;
use crate::numerical::convergence::SchemeAnalysis;
use crate::numerical::norms::Norms;
use crate::numerical::params::Parameters;

pub fn theta_examples(example: usize) {
    match example {
        0 => {
            // the shortest way: solve the default model problem and estimate
            // the order of Crank-Nicolson
            let mut solver = ThetaSolver::new(Parameters::default());
            solver.solve();
            solver.print_solution();
            solver.compute_order();
            println!("rates = {:?}", solver.get_rates());
        }
        1 => {
            // scheme built directly from closures, no parameter file involved
            // y' = -y, y(0) = 1, Backward Euler
            let mut scheme = ThetaMethod::new(Box::new(|_t, y: f64| -y), 1.0, 1.0, 100, 1.0);
            scheme.set_dfdy(Box::new(|_t, _y| -1.0));
            if scheme.solve() {
                let (t, u) = scheme.get_result();
                println!("u({}) = {}", t[t.len() - 1], u[u.len() - 1]);
            }
        }
        2 => {
            // convergence study of Forward Euler on the decay problem using
            // the symbolic test-problem collection
            let problem = IvpEquation::Decay;
            let f_expr = problem.setup();
            let f = f_expr.lambdify2D("t", "y");
            let (_, T) = problem.span(None);
            let mut scheme = ThetaMethod::new(f, problem.y0(), T, 8, 0.0);
            let mut analysis = SchemeAnalysis::new(
                problem.exact_expr().lambdify1D(),
                vec![8, 16, 32, 64, 128],
                Norms::Linf,
            );
            if analysis.compute_order(&mut scheme) {
                println!("{}", analysis.convergence_table());
            }
        }
        3 => {
            // parameter file driven run
            let mut solver = ThetaSolver::from_file("data/data.toml");
            solver.solve();
            solver.compute_order();
        }
        _ => {
            println!("example not found");
        }
    }
}
