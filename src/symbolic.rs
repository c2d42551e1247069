/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use ThetaSciRs::symbolic::symbolic_engine::Expr;
/// let input = "-t*exp(-y)";
/// let parsed_expression = Expr::parse_expression(input);
/// println!(" parsed_expression {}", parsed_expression);
/// ```
pub mod parse_expr;
/// # Symbolic engine
/// a module
/// 1) turns a String expression into a symbolic expression
/// 2) turns a symbolic expression into a Rust function
/// 3) computes symbolic (analytical) derivatives
///# Example#
/// ```
/// use ThetaSciRs::symbolic::symbolic_engine::Expr;
/// let input = "log(-t*t/2 + 1)";
/// let parsed_expression = Expr::parse_expression(input);
/// let df_dt = parsed_expression.diff("t");
/// println!("df_dt = {}", df_dt);
/// let f = parsed_expression.lambdify1D();
/// println!("f(0.5) = {}", f(0.5));
/// ```
pub mod symbolic_engine;
pub mod symbolic_lambdify;
