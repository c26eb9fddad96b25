use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Input the lexer cannot turn into a token.
#[derive(Diagnostic, Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character {ch:?}")]
    #[diagnostic(help("formulas may only use numbers, x, + - * / ^ and parentheses"))]
    UnexpectedChar {
        ch: char,
        #[label("this input character")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("malformed number {literal:?}")]
    MalformedNumber {
        literal: String,
        #[label("this numeric literal")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },
}

#[derive(Diagnostic, Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    Syntax {
        expected: String,
        found: String,
        #[label("here")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },

    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep {
        limit: usize,
        #[label("limit reached here")]
        span: SourceSpan,
        #[source_code]
        src: String,
    },
}

#[derive(Diagnostic, Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown variable '{name}'")]
    #[diagnostic(help("only x can be bound"))]
    UnknownVariable { name: char },
}
