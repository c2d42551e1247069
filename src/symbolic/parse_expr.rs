use crate::symbolic::symbolic_engine::Expr;
/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use ThetaSciRs::symbolic::symbolic_engine::Expr;
/// let input = "-t*exp(-y)";
/// let parsed_expression = Expr::parse_expression(input);
/// println!(" parsed_expression {}", parsed_expression);
/// ```
//
// grammar (standard precedence, '^' binds tightest and is right associative):
//   expr   := term (('+'|'-') term)*
//   term   := factor (('*'|'/') factor)*
//   factor := '-' factor | power
//   power  := atom ('^' factor)?
//   atom   := number | variable | function '(' expr ')' | '(' expr ')'

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\n' | '\r' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // scientific notation tail: 2.5e-3
                if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        i = j;
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number literal '{}'", literal))?;
                tokens.push(Token::Num(value));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            _ => return Err(format!("unexpected character '{}'", c)),
        }
    }
    Ok(tokens)
}

struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, token: Token) -> Result<(), String> {
        match self.bump() {
            Some(ref t) if *t == token => Ok(()),
            Some(t) => Err(format!("expected {:?}, found {:?}", token, t)),
            None => Err(format!("expected {:?}, found end of input", token)),
        }
    }
}

fn parse_sum(stream: &mut TokenStream) -> Result<Expr, String> {
    let mut lhs = parse_product(stream)?;
    loop {
        match stream.peek() {
            Some(Token::Plus) => {
                stream.bump();
                let rhs = parse_product(stream)?;
                lhs = Expr::Add(Box::new(lhs), Box::new(rhs));
            }
            Some(Token::Minus) => {
                stream.bump();
                let rhs = parse_product(stream)?;
                lhs = Expr::Sub(Box::new(lhs), Box::new(rhs));
            }
            _ => return Ok(lhs),
        }
    }
}

fn parse_product(stream: &mut TokenStream) -> Result<Expr, String> {
    let mut lhs = parse_factor(stream)?;
    loop {
        match stream.peek() {
            Some(Token::Star) => {
                stream.bump();
                let rhs = parse_factor(stream)?;
                lhs = Expr::Mul(Box::new(lhs), Box::new(rhs));
            }
            Some(Token::Slash) => {
                stream.bump();
                let rhs = parse_factor(stream)?;
                lhs = Expr::Div(Box::new(lhs), Box::new(rhs));
            }
            _ => return Ok(lhs),
        }
    }
}

fn parse_factor(stream: &mut TokenStream) -> Result<Expr, String> {
    if let Some(Token::Minus) = stream.peek() {
        stream.bump();
        let inner = parse_factor(stream)?;
        // unary minus: -u is represented as (-1)*u
        return Ok(Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(inner)));
    }
    parse_power(stream)
}

fn parse_power(stream: &mut TokenStream) -> Result<Expr, String> {
    let base = parse_atom(stream)?;
    if let Some(Token::Caret) = stream.peek() {
        stream.bump();
        let exponent = parse_factor(stream)?;
        return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
    }
    Ok(base)
}

fn parse_atom(stream: &mut TokenStream) -> Result<Expr, String> {
    match stream.bump() {
        Some(Token::Num(value)) => Ok(Expr::Const(value)),
        Some(Token::Ident(name)) => {
            if let Some(Token::LParen) = stream.peek() {
                stream.bump();
                let inner = parse_sum(stream)?;
                stream.expect(Token::RParen)?;
                match name.as_str() {
                    "exp" => Ok(Expr::Exp(Box::new(inner))),
                    // muparser-style: log is the natural logarithm
                    "ln" | "log" => Ok(Expr::Ln(Box::new(inner))),
                    "sin" => Ok(Expr::sin(Box::new(inner))),
                    "cos" => Ok(Expr::cos(Box::new(inner))),
                    _ => Err(format!("unknown function '{}'", name)),
                }
            } else {
                Ok(Expr::Var(name))
            }
        }
        Some(Token::LParen) => {
            let inner = parse_sum(stream)?;
            stream.expect(Token::RParen)?;
            Ok(inner)
        }
        Some(t) => Err(format!("unexpected token {:?}", t)),
        None => Err("unexpected end of input".to_string()),
    }
}

impl Expr {
    /// Parses a string into a symbolic expression, reporting what went wrong.
    pub fn try_parse_expression(input: &str) -> Result<Expr, String> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err("empty expression".to_string());
        }
        let mut stream = TokenStream { tokens, pos: 0 };
        let expr = parse_sum(&mut stream)?;
        if stream.pos != stream.tokens.len() {
            return Err(format!(
                "trailing input after position {}",
                stream.pos
            ));
        }
        Ok(expr)
    }

    /// Parses a string into a symbolic expression.
    pub fn parse_expression(input: &str) -> Expr {
        Self::try_parse_expression(input)
            .unwrap_or_else(|e| panic!("failed to parse expression '{}': {}", input, e))
    }

    pub fn parse_vector_expression(input: Vec<&str>) -> Vec<Expr> {
        input
            .iter()
            .map(|s| Expr::parse_expression(s))
            .collect::<Vec<Expr>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constant() {
        let expr = Expr::parse_expression("42");
        assert_eq!(expr, Expr::Const(42.0));
    }

    #[test]
    fn test_parse_variable() {
        let expr = Expr::parse_expression("t");
        assert_eq!(expr, Expr::Var("t".to_string()));
    }

    #[test]
    fn test_parse_addition() {
        let expr = Expr::parse_expression("t + 2");
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Var("t".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_exponential() {
        let expr = Expr::parse_expression("exp(y)");
        assert_eq!(expr, Expr::Exp(Box::new(Expr::Var("y".to_string()))));
    }

    #[test]
    fn test_parse_logarithm_aliases() {
        let expr_log = Expr::parse_expression("log(t)");
        let expr_ln = Expr::parse_expression("ln(t)");
        assert_eq!(expr_log, Expr::Ln(Box::new(Expr::Var("t".to_string()))));
        assert_eq!(expr_log, expr_ln);
    }

    #[test]
    fn test_parse_precedence() {
        // 1 + t*2 must parse as 1 + (t*2)
        let expr = Expr::parse_expression("1 + t*2");
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Const(1.0)),
                Box::new(Expr::Mul(
                    Box::new(Expr::Var("t".to_string())),
                    Box::new(Expr::Const(2.0))
                ))
            )
        );
    }

    #[test]
    fn test_parse_power() {
        let expr = Expr::parse_expression("t^2");
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("t".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_unary_minus() {
        let expr = Expr::parse_expression("-t");
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Const(-1.0)),
                Box::new(Expr::Var("t".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_brackets() {
        let expr = Expr::parse_expression("(t + y) * y");
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Add(
                    Box::new(Expr::Var("t".to_string())),
                    Box::new(Expr::Var("y".to_string()))
                )),
                Box::new(Expr::Var("y".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_forcing_term() {
        // the canonical forcing term of the model problem
        let expr = Expr::parse_expression("-t*exp(-y)");
        let t = Box::new(Expr::Var("t".to_string()));
        let y = Box::new(Expr::Var("y".to_string()));
        let minus_t = Box::new(Expr::Mul(Box::new(Expr::Const(-1.0)), t));
        let minus_y = Box::new(Expr::Mul(Box::new(Expr::Const(-1.0)), y));
        let to_check = Expr::Mul(minus_t, Box::new(Expr::Exp(minus_y)));
        assert_eq!(expr, to_check);
    }

    #[test]
    fn test_parse_exact_solution() {
        let expr = Expr::parse_expression("log(-t*t/2 + 1)");
        let f = expr.lambdify1D();
        let expected = (1.0f64 - 0.5 * 0.5 * 0.5).ln();
        assert!((f(0.5) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_parse_scientific_notation() {
        let expr = Expr::parse_expression("2.5e-3");
        assert_eq!(expr, Expr::Const(2.5e-3));
    }

    #[test]
    fn test_invalid_expression() {
        let result = Expr::try_parse_expression("(t +");
        assert_eq!(result.is_err(), true);
    }

    #[test]
    fn test_unmatched_brackets() {
        let result = Expr::try_parse_expression("(t + y");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_function() {
        let result = Expr::try_parse_expression("sinh(t)");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_input() {
        let result = Expr::try_parse_expression("   ");
        assert!(result.is_err());
    }
}
