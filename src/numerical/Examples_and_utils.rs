/// a collection of test examples of scalar IVPs with exact solutions for
/// testing purposes
use crate::symbolic::symbolic_engine::Expr;
use strum_macros::EnumIter;

/*
 examples of scalar initial value problems with elementary exact solutions:

 saturating logarithm:
 y' = -t*exp(-y), y(0) = 0
 exact solution: y = ln(1 - t^2/2), valid for t < sqrt(2)

 linear relaxation:
 y' = -2y + 1, y(0) = 0
 exact solution: y = (1 - exp(-2t))/2

 exponential decay:
 y' = -y, y(0) = 1
 exact solution: y = exp(-t)

 finite-time blow-up (Riccati):
 y' = y^2, y(0) = 1
 exact solution: y = 1/(1 - t), blows up at t = 1
*/
#[derive(Debug, PartialEq, Eq, EnumIter)]
pub enum IvpEquation {
    SaturatingLog,
    LinearRelaxation,
    Decay,
    Blowup,
}

impl IvpEquation {
    /// forcing term f(t, y) as a symbolic expression
    pub fn setup(&self) -> Expr {
        match self {
            IvpEquation::SaturatingLog => Expr::parse_expression("-t*exp(-y)"),
            IvpEquation::LinearRelaxation => Expr::parse_expression("-2*y + 1"),
            IvpEquation::Decay => Expr::parse_expression("-y"),
            IvpEquation::Blowup => Expr::parse_expression("y^2"),
        }
    }

    /// exact solution u_ex(t) as a symbolic expression
    pub fn exact_expr(&self) -> Expr {
        match self {
            IvpEquation::SaturatingLog => Expr::parse_expression("log(-t*t/2 + 1)"),
            IvpEquation::LinearRelaxation => Expr::parse_expression("(1 - exp(-2*t))/2"),
            IvpEquation::Decay => Expr::parse_expression("exp(-t)"),
            IvpEquation::Blowup => Expr::parse_expression("1/(1 - t)"),
        }
    }

    pub fn y0(&self) -> f64 {
        match self {
            IvpEquation::SaturatingLog => 0.0,
            IvpEquation::LinearRelaxation => 0.0,
            IvpEquation::Decay => 1.0,
            IvpEquation::Blowup => 1.0,
        }
    }

    /// default integration span (0, T); kept clear of the blow-up time where
    /// the exact solution ceases to exist
    pub fn span(&self, end: Option<f64>) -> (f64, f64) {
        let default_end = match self {
            IvpEquation::SaturatingLog => 1.0,
            IvpEquation::LinearRelaxation => 1.0,
            IvpEquation::Decay => 1.0,
            IvpEquation::Blowup => 0.5,
        };
        let end = if let Some(end) = end { end } else { default_end };
        (0.0, end)
    }

    /// exact solution sampled on the given grid
    pub fn exact_solution(&self, t: &[f64]) -> Vec<f64> {
        let u_ex = self.exact_expr().lambdify1D();
        t.iter().map(|&ti| u_ex(ti)).collect()
    }
}
