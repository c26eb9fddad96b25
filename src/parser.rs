use crate::{
    ast::{Expr, Op},
    error::ParseError,
    lexer::{Token, TokenKind},
    Lexer,
};

/// Default bound on nested parentheses, unary minus and `^` chains, and on
/// the height of the resulting tree.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A subtree and its height; leaves have height 0.
type Parsed = (Expr, usize);

/// Recursive-descent parser for
///
/// ```text
/// expression := term ( ('+' | '-') term )*
/// term       := power ( ('*' | '/') power )*
/// power      := factor ( '^' power )?
/// factor     := NUMBER | VARIABLE | '(' expression ')' | '-' factor
/// ```
///
/// The parser owns its lexer, so each parse has its own cursor.
pub struct Parser<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            source: input,
            lexer: Lexer::new(input),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses the whole input. Anything left after the expression is an error.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let (expr, height) = self.expression()?;
        let token = self.peek()?;
        if token.kind != TokenKind::End {
            return Err(self.unexpected(token, "end of input"));
        }
        log::debug!("parsed {:?} as {} (height {})", self.source, expr, height);
        Ok(expr)
    }

    fn peek(&mut self) -> Result<Token<'a>, ParseError> {
        self.lexer.peek().clone().map_err(ParseError::from)
    }

    fn eat(&mut self, expected: TokenKind) -> Result<Token<'a>, ParseError> {
        let token = self.peek()?;
        if !token.kind.same_kind(&expected) {
            return Err(self.unexpected(token, &expected.to_string()));
        }
        self.lexer.next_token()?;
        Ok(token)
    }

    fn unexpected(&self, token: Token<'a>, expected: &str) -> ParseError {
        ParseError::Syntax {
            expected: expected.to_string(),
            found: token.kind.to_string(),
            span: token.span(),
            src: self.source.to_string(),
        }
    }

    fn too_deep(&self, at: Token<'a>) -> ParseError {
        ParseError::NestingTooDeep {
            limit: self.max_depth,
            span: at.span(),
            src: self.source.to_string(),
        }
    }

    fn nested<T>(
        &mut self,
        at: Token<'a>,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.too_deep(at));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Builds a binary node, keeping the tree no taller than `max_depth`.
    ///
    /// Evaluation and drop both recurse over the tree, so flat chains such as
    /// `1+1+1+...` are bounded here even though the parser loops over them.
    fn fold(&self, at: Token<'a>, op: Op, lhs: Parsed, rhs: Parsed) -> Result<Parsed, ParseError> {
        let height = 1 + lhs.1.max(rhs.1);
        if height > self.max_depth {
            return Err(self.too_deep(at));
        }
        Ok((Expr::binary(op, lhs.0, rhs.0), height))
    }

    fn expression(&mut self) -> Result<Parsed, ParseError> {
        log::trace!("expression at depth {}", self.depth);
        let mut lhs = self.term()?;
        loop {
            let token = self.peek()?;
            let op = match token.kind {
                TokenKind::Plus => Op::Plus,
                TokenKind::Minus => Op::Minus,
                _ => break,
            };
            self.eat(token.kind)?;
            let rhs = self.term()?;
            lhs = self.fold(token, op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Parsed, ParseError> {
        log::trace!("term at depth {}", self.depth);
        let mut lhs = self.power()?;
        loop {
            let token = self.peek()?;
            let op = match token.kind {
                TokenKind::Star => Op::Star,
                TokenKind::Slash => Op::Slash,
                _ => break,
            };
            self.eat(token.kind)?;
            let rhs = self.power()?;
            lhs = self.fold(token, op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    // right-associative: the exponent is itself a `power`
    fn power(&mut self) -> Result<Parsed, ParseError> {
        let base = self.factor()?;
        let token = self.peek()?;
        if token.kind != TokenKind::Caret {
            return Ok(base);
        }
        self.eat(TokenKind::Caret)?;
        let exponent = self.nested(token, Self::power)?;
        self.fold(token, Op::Caret, base, exponent)
    }

    fn factor(&mut self) -> Result<Parsed, ParseError> {
        let token = self.peek()?;
        log::trace!("factor on {}", token.kind);
        match token.kind {
            TokenKind::Number(n) => {
                self.eat(token.kind)?;
                Ok((Expr::Number(n), 0))
            }
            TokenKind::Variable(name) => {
                self.eat(token.kind)?;
                Ok((Expr::Var(name), 0))
            }
            TokenKind::LeftParen => {
                self.eat(TokenKind::LeftParen)?;
                let inner = self.nested(token, Self::expression)?;
                self.eat(TokenKind::RightParen)?;
                Ok(inner)
            }
            TokenKind::Minus => {
                self.eat(TokenKind::Minus)?;
                let operand = self.nested(token, Self::factor)?;
                self.fold(token, Op::Minus, (Expr::Number(0.0), 0), operand)
            }
            _ => Err(self.unexpected(token, "a number, a variable, '(' or '-'")),
        }
    }
}
