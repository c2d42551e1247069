use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions

    /// Converts a single-variable symbolic expression into an executable Rust
    /// closure. Every variable occurring in the expression is bound to the
    /// single argument.
    ///
    /// # Examples
    /// ```
    /// use ThetaSciRs::symbolic::symbolic_engine::Expr;
    /// let f = Expr::parse_expression("t^2");
    /// let func = f.lambdify1D();
    /// assert_eq!(func(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64> {
        match self {
            Expr::Var(_) => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) + rhs_fn(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) - rhs_fn(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) * rhs_fn(x))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) / rhs_fn(x))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify1D();
                let exp_fn = exp.lambdify1D();
                Box::new(move |x| base_fn(x).powf(exp_fn(x)))
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).exp())
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).ln())
            }
            Expr::sin(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).sin())
            }
            Expr::cos(expr) => {
                let expr_fn = expr.lambdify1D();
                Box::new(move |x| expr_fn(x).cos())
            }
        }
    }

    /// Converts a two-variable symbolic expression into an executable Rust
    /// closure of signature (arg1, arg2) -> f64. Variables named `arg1` map to
    /// the first argument, variables named `arg2` to the second.
    ///
    /// # Examples
    /// ```
    /// use ThetaSciRs::symbolic::symbolic_engine::Expr;
    /// let f = Expr::parse_expression("-t*exp(-y)");
    /// let func = f.lambdify2D("t", "y");
    /// assert_eq!(func(2.0, 0.0), -2.0);
    /// ```
    pub fn lambdify2D(&self, arg1: &str, arg2: &str) -> Box<dyn Fn(f64, f64) -> f64> {
        match self {
            Expr::Var(name) => {
                if name == arg1 {
                    Box::new(|a, _| a)
                } else if name == arg2 {
                    Box::new(|_, b| b)
                } else {
                    panic!(
                        "lambdify2D: variable '{}' is neither '{}' nor '{}'",
                        name, arg1, arg2
                    )
                }
            }
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_, _| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify2D(arg1, arg2);
                let rhs_fn = rhs.lambdify2D(arg1, arg2);
                Box::new(move |a, b| lhs_fn(a, b) + rhs_fn(a, b))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify2D(arg1, arg2);
                let rhs_fn = rhs.lambdify2D(arg1, arg2);
                Box::new(move |a, b| lhs_fn(a, b) - rhs_fn(a, b))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify2D(arg1, arg2);
                let rhs_fn = rhs.lambdify2D(arg1, arg2);
                Box::new(move |a, b| lhs_fn(a, b) * rhs_fn(a, b))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify2D(arg1, arg2);
                let rhs_fn = rhs.lambdify2D(arg1, arg2);
                Box::new(move |a, b| lhs_fn(a, b) / rhs_fn(a, b))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify2D(arg1, arg2);
                let exp_fn = exp.lambdify2D(arg1, arg2);
                Box::new(move |a, b| base_fn(a, b).powf(exp_fn(a, b)))
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.lambdify2D(arg1, arg2);
                Box::new(move |a, b| expr_fn(a, b).exp())
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.lambdify2D(arg1, arg2);
                Box::new(move |a, b| expr_fn(a, b).ln())
            }
            Expr::sin(expr) => {
                let expr_fn = expr.lambdify2D(arg1, arg2);
                Box::new(move |a, b| expr_fn(a, b).sin())
            }
            Expr::cos(expr) => {
                let expr_fn = expr.lambdify2D(arg1, arg2);
                Box::new(move |a, b| expr_fn(a, b).cos())
            }
        }
    }

    /// Evaluates the expression with the given variable names bound to values.
    pub fn eval_expression(&self, vars: Vec<&str>, values: &[f64]) -> f64 {
        assert_eq!(
            vars.len(),
            values.len(),
            "vars and values must have the same length"
        );
        let mut expr = self.clone();
        for (var, value) in vars.iter().zip(values.iter()) {
            expr = expr.set_variable(var, *value);
        }
        expr.lambdify1D()(0.0)
    }

    /// Evaluates a single-variable expression on a uniform linspace.
    pub fn lambdify1D_from_linspace(&self, start: f64, end: f64, num_values: usize) -> Vec<f64> {
        assert!(num_values > 1, "linspace needs at least two values");
        let f = self.lambdify1D();
        let step = (end - start) / (num_values - 1) as f64;
        (0..num_values)
            .map(|i| f(start + i as f64 * step))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lambdify1D_polynomial() {
        let f = Expr::parse_expression("t^2 - t - 1").lambdify1D();
        assert_relative_eq!(f(3.0), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lambdify1D_exact_solution() {
        // y(t) = ln(1 - t^2/2), the exact solution of the model problem
        let f = Expr::parse_expression("log(-t*t/2 + 1)").lambdify1D();
        assert_relative_eq!(f(1.0), 0.5f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(f(0.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lambdify2D_forcing_term() {
        let f = Expr::parse_expression("-t*exp(-y)").lambdify2D("t", "y");
        assert_relative_eq!(f(0.5, 0.0), -0.5, epsilon = 1e-12);
        assert_relative_eq!(f(1.0, 1.0), -(-1.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_lambdify2D_argument_order() {
        let f = Expr::parse_expression("t - y").lambdify2D("t", "y");
        assert_relative_eq!(f(5.0, 3.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    #[should_panic]
    fn test_lambdify2D_unknown_variable() {
        let expr = Expr::parse_expression("t + z");
        let _ = expr.lambdify2D("t", "y");
    }

    #[test]
    fn test_eval_expression() {
        let expr = Expr::parse_expression("t*y + 1");
        let res = expr.eval_expression(vec!["t", "y"], &[2.0, 3.0]);
        assert_relative_eq!(res, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lambdify1D_from_linspace() {
        let expr = Expr::parse_expression("t");
        let values = expr.lambdify1D_from_linspace(0.0, 1.0, 11);
        assert_eq!(values.len(), 11);
        assert_relative_eq!(values[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(values[10], 1.0, epsilon = 1e-12);
        assert_relative_eq!(values[5], 0.5, epsilon = 1e-12);
    }
}
