//! Recursive descent parser for falang.
//!
//! Converts the token stream into the AST, recovering from a bad statement
//! by skipping to the next `;` so that all syntax errors of a program are
//! collected in one pass.

mod expressions;
mod literals;

use crate::ast::{NodeId, Program, Stmt, StmtKind};
use crate::error::{ParseError, ParseErrors, ParseResult};
use crate::lexer::{Lexer, SpannedToken};
use crate::span::{SourceMap, Span};
use crate::token::Token;

/// falang parser
pub struct Parser<'a> {
    /// Source code
    pub(crate) source: &'a str,
    /// Lexer
    pub(crate) lexer: Lexer<'a>,
    /// Source map for line/column calculation
    pub(crate) source_map: SourceMap,
    /// Current token
    pub(crate) current: Option<SpannedToken<'a>>,
    /// Collected errors (for error recovery)
    pub(crate) errors: ParseErrors,
    /// Next node id to hand out
    next_id: NodeId,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: Lexer::new(source),
            source_map: SourceMap::new(source),
            current: None,
            errors: ParseErrors::new(),
            next_id: 0,
        }
    }

    /// Parse the source and return the program plus any collected errors.
    pub fn parse(mut self) -> (Program, ParseErrors) {
        let mut stmts = Vec::new();

        // Prime the parser with the first token
        self.advance();

        while !self.is_at_end() {
            // Tolerate stray semicolons between statements
            while self.check(&Token::Semicolon) {
                self.advance();
            }
            if self.is_at_end() {
                break;
            }

            match self.parse_stmt() {
                Ok(stmt) => stmts.push(stmt),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        (Program { stmts }, self.errors)
    }

    // ==================== Token Management ====================

    pub(crate) fn fresh_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance to the next token, stashing lexer errors
    pub(crate) fn advance(&mut self) -> Option<SpannedToken<'a>> {
        let prev = self.current.take();
        loop {
            match self.lexer.next_token() {
                Some(Ok(token)) => {
                    self.current = Some(token);
                    break;
                }
                Some(Err(e)) => {
                    self.errors.push(e);
                    continue;
                }
                None => {
                    self.current = None;
                    break;
                }
            }
        }
        prev
    }

    pub(crate) fn check(&self, expected: &Token) -> bool {
        self.current
            .as_ref()
            .map(|t| &t.token == expected)
            .unwrap_or(false)
    }

    pub(crate) fn check_any(&self, expected: &[Token]) -> bool {
        self.current
            .as_ref()
            .map(|t| expected.contains(&t.token))
            .unwrap_or(false)
    }

    /// Consume the current token if it matches, error otherwise
    pub(crate) fn expect(&mut self, expected: Token) -> ParseResult<SpannedToken<'a>> {
        if self.check(&expected) {
            self.advance()
                .ok_or_else(|| ParseError::unexpected_eof(expected.describe(), self.eof_span()))
        } else {
            Err(self.unexpected(expected.describe()))
        }
    }

    /// Build an "unexpected token / unexpected eof" error for the current position
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        match &self.current {
            Some(t) => ParseError::unexpected_token(t.text, expected, t.span),
            None => ParseError::unexpected_eof(expected, self.eof_span()),
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        self.current
            .as_ref()
            .map(|t| t.span)
            .unwrap_or_else(|| self.eof_span())
    }

    fn eof_span(&self) -> Span {
        self.source_map.span(self.source.len(), self.source.len())
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Error recovery: skip tokens until just past the next `;` or until a
    /// token that starts a new statement.
    pub(crate) fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.check(&Token::Semicolon) {
                self.advance();
                return;
            }
            if self.check_any(&[Token::KwLet, Token::KwPrint]) {
                return;
            }
            self.advance();
        }
    }

    // ==================== Statements ====================

    fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        let id = self.fresh_id();

        let kind = if self.check(&Token::KwLet) {
            self.advance();
            let pattern = self.parse_pattern()?;
            self.expect(Token::Eq)?;
            let value = self.parse_expr()?;
            StmtKind::Bind { pattern, value }
        } else if self.check(&Token::KwPrint) {
            self.advance();
            let value = self.parse_expr()?;
            StmtKind::Print { value }
        } else {
            return Err(self.unexpected("'let' or 'print'"));
        };

        let end = self.expect(Token::Semicolon)?;
        Ok(Stmt {
            id,
            span: start.merge(&end.span),
            kind,
        })
    }
}

/// Parse falang source code into a program plus any collected errors.
pub fn parse(source: &str) -> (Program, ParseErrors) {
    Parser::new(source).parse()
}
