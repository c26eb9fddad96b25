use miette::SourceSpan;
use crate::error::LexError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub slice: &'a str,
    pub offset: usize,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    pub fn span(&self) -> SourceSpan {
        (self.offset, self.slice.len()).into()
    }
}

impl<'a> std::fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.slice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Variable(char),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,
    End,
}

impl TokenKind {
    /// Compares kinds only, ignoring any payload.
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number {n}"),
            TokenKind::Variable(c) => write!(f, "variable '{c}'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::End => write!(f, "end of input"),
        }
    }
}

/// On-demand tokenizer over a formula.
///
/// Only the ASCII space is skipped between tokens; a tab or newline is
/// reported like any other unknown character.
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    rest: &'a str,
    byte: usize,
    peeked: Option<Result<Token<'a>, LexError>>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            source: input,
            rest: input,
            byte: 0,
            peeked: None,
            done: false,
        }
    }

    pub fn peek(&mut self) -> &Result<Token<'a>, LexError> {
        let next = match self.peeked.take() {
            Some(next) => next,
            None => self.scan(),
        };
        self.peeked.insert(next)
    }

    /// Returns the next token. Once the input is exhausted every call
    /// yields `End`.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        if let Some(next) = self.peeked.take() {
            return next;
        }
        self.scan()
    }

    fn bump(&mut self, len: usize) -> &'a str {
        let (slice, rest) = self.rest.split_at(len);
        self.rest = rest;
        self.byte += len;
        slice
    }

    fn scan(&mut self) -> Result<Token<'a>, LexError> {
        let spaces = self.rest.len() - self.rest.trim_start_matches(' ').len();
        self.bump(spaces);

        let offset = self.byte;
        let Some(c) = self.rest.chars().next() else {
            return Ok(Token {
                slice: self.rest,
                offset,
                kind: TokenKind::End,
            });
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '^' => TokenKind::Caret,
            '0'..='9' | '.' => return self.number(),
            'a'..='z' | 'A'..='Z' => TokenKind::Variable(c),
            _ => {
                self.bump(c.len_utf8());
                return Err(LexError::UnexpectedChar {
                    ch: c,
                    span: (offset, c.len_utf8()).into(),
                    src: self.source.to_string(),
                });
            }
        };

        let slice = self.bump(c.len_utf8());
        log::trace!("token {kind} at {offset}");
        Ok(Token {
            slice,
            offset,
            kind,
        })
    }

    /// Consumes the longest decimal literal at the cursor:
    /// `digits [ '.' digits ] [ ('e' | 'E') [sign] digits ]`.
    fn number(&mut self) -> Result<Token<'a>, LexError> {
        let rest = self.rest;
        let bytes = rest.as_bytes();
        let digits_from = |mut i: usize| {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            i
        };

        let mut end = digits_from(0);
        let mut mantissa_digits = end;
        if bytes.get(end) == Some(&b'.') {
            let frac_end = digits_from(end + 1);
            mantissa_digits += frac_end - end - 1;
            end = frac_end;
        }

        let offset = self.byte;
        if mantissa_digits == 0 {
            let literal = self.bump(end);
            return Err(LexError::MalformedNumber {
                literal: literal.to_string(),
                span: (offset, literal.len()).into(),
                src: self.source.to_string(),
            });
        }

        // an exponent marker without digits is left for the next token
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_end = digits_from(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }

        let literal = self.bump(end);
        let value = literal
            .parse::<f64>()
            .map_err(|_| LexError::MalformedNumber {
                literal: literal.to_string(),
                span: (offset, literal.len()).into(),
                src: self.source.to_string(),
            })?;

        let kind = TokenKind::Number(value);
        log::trace!("token {kind} at {offset}");
        Ok(Token {
            slice: literal,
            offset,
            kind,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    /// Yields `End` once, then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.next_token();
        if let Ok(Token {
            kind: TokenKind::End,
            ..
        }) = next
        {
            self.done = true;
        }
        Some(next)
    }
}
