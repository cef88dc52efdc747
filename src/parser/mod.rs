//! Recursive-descent statement parser built over an operator-precedence
//! expression parser, feeding a single `Builder`. Split across this module
//! (shared plumbing), `expr` (expressions) and `stmt` (statements), keeping
//! expression and statement grammars as siblings over one token stream.

mod expr;
mod stmt;

use crate::arena::{Arena, NodeId};
use crate::builder::Builder;
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::stringbuf::StringBuf;
use crate::token::{Token, TokenKind};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    builder: Builder,
    /// Suppresses top-level `in` inside a `for (...)` header, per the
    /// grammar's `[NoIn]` production parameter.
    no_in: bool,
}

type PResult<T> = Result<T, ParseError>;

impl<'a> Parser<'a> {
    pub fn new(buf: &'a StringBuf) -> PResult<Self> {
        let mut lexer = Lexer::new(buf);
        let current = lexer.next_token(true)?;
        Ok(Self {
            lexer,
            current,
            builder: Builder::new(),
            no_in: false,
        })
    }

    pub fn into_builder(self) -> Builder {
        self.builder
    }

    fn error(&self) -> ParseError {
        ParseError::syntax(self.current.start.line)
    }

    /// Whether a regex literal can legally start where `current` now sits,
    /// judged from the token we're about to leave behind.
    fn regex_allowed_after_current(&self) -> bool {
        !matches!(
            self.current.kind,
            TokenKind::Identifier
                | TokenKind::NumericLiteral
                | TokenKind::StringLiteral
                | TokenKind::RegexLiteral
                | TokenKind::This
                | TokenKind::NullLiteral
                | TokenKind::TrueLiteral
                | TokenKind::FalseLiteral
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
    }

    fn bump(&mut self) -> PResult<Token> {
        let regex_allowed = self.regex_allowed_after_current();
        let next = self.lexer.next_token(regex_allowed)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.current.kind != kind {
            return Err(self.error());
        }
        self.bump()
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// The end position of whatever token was just consumed: since
    /// `current` always holds the *next* unconsumed token, its start is
    /// exactly the previous token's end (no trivia sits between them in
    /// position terms: trivia is skipped when `current` was fetched).
    fn prev_end(&self) -> crate::ast::Position {
        self.current.start
    }

    pub fn arena(&self) -> &Arena {
        self.builder.arena()
    }

    pub fn parse_program(mut self) -> PResult<(NodeId, Builder)> {
        let start = self.current.start;
        let mut elements = Vec::new();
        while !self.at(TokenKind::Eof) {
            elements.push(self.parse_source_element()?);
        }
        let end = self.current.end;
        let root = self.builder.create_source_elements(elements, start, end);
        Ok((root, self.builder))
    }
}
