use crate::{
    ast::{Expr, Op},
    error::EvalError,
};

/// The only variable a formula can bind.
pub const VARIABLE: char = 'x';

/// Evaluates a tree with `x` bound to a value.
///
/// By default any other variable reads as `0.0`. In strict mode it is an
/// [`EvalError::UnknownVariable`] instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    x: f64,
    strict: bool,
}

impl Evaluator {
    pub fn new(x: f64) -> Self {
        Self { x, strict: false }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn eval(&self, expr: &Expr) -> Result<f64, EvalError> {
        match expr {
            Expr::Number(n) => Ok(*n),
            Expr::Var(name) if *name == VARIABLE => Ok(self.x),
            Expr::Var(name) if self.strict => Err(EvalError::UnknownVariable { name: *name }),
            Expr::Var(_) => Ok(0.0),
            Expr::BinOp { op, lhs, rhs } => {
                let lhs = self.eval(lhs)?;
                let rhs = self.eval(rhs)?;
                apply(*op, lhs, rhs)
            }
        }
    }
}

fn apply(op: Op, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    match op {
        Op::Plus => Ok(lhs + rhs),
        Op::Minus => Ok(lhs - rhs),
        Op::Star => Ok(lhs * rhs),
        // -0.0 == 0.0, so negative zero is rejected too
        Op::Slash if rhs == 0.0 => Err(EvalError::DivisionByZero),
        Op::Slash => Ok(lhs / rhs),
        Op::Caret => Ok(lhs.powf(rhs)),
    }
}

/// Evaluates `expr` with `x` bound to `x`, reading other variables as zero.
pub fn evaluate(expr: &Expr, x: f64) -> Result<f64, EvalError> {
    let result = Evaluator::new(x).eval(expr);
    log::debug!("evaluated {} at x = {} -> {:?}", expr, x, result);
    result
}

impl Expr {
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        evaluate(self, x)
    }
}
