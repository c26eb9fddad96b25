#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Op::Plus => "+",
                Op::Minus => "-",
                Op::Star => "*",
                Op::Slash => "/",
                Op::Caret => "^",
            }
        )
    }
}

/// Parsed formula. Each node owns its children, so the tree is freed
/// with its root and can be shared read-only across threads.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Var(char),
    BinOp {
        op: Op,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: Op, lhs: Expr, rhs: Expr) -> Self {
        Expr::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// Prefix notation: `2 + 3 * 4` prints as `(+ 2 (* 3 4))`.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::BinOp { op, lhs, rhs } => write!(f, "({} {} {})", op, lhs, rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefix() {
        let expr = Expr::binary(
            Op::Plus,
            Expr::Number(2.0),
            Expr::binary(Op::Star, Expr::Var('x'), Expr::Number(0.5)),
        );
        assert_eq!(expr.to_string(), "(+ 2 (* x 0.5))");
    }

    fn _assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_expr_is_send_sync() {
        _assert_send_sync::<Expr>();
    }
}
