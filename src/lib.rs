pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use evaluator::{evaluate, Evaluator};
pub use lexer::*;
pub use parser::Parser;

/// Lexes and parses `source` with the default nesting limit.
pub fn parse_expression(source: &str) -> Result<Expr, ParseError> {
    Parser::new(source).parse()
}
