//! Literal values, set literals, and binder patterns.

use super::Parser;
use crate::ast::{Pattern, PatternKind, SetLiteral, Val, ValKind};
use crate::error::{ParseError, ParseResult};
use crate::token::Token;

impl<'a> Parser<'a> {
    /// Parse a literal value: INT, STRING, set literal, tuple literal, or a
    /// bare identifier (which only the type checker rejects).
    pub(crate) fn parse_val(&mut self) -> ParseResult<Val> {
        let Some(token) = self.current.as_ref().map(|t| t.token) else {
            return Err(self.unexpected("value"));
        };

        match token {
            Token::Int => {
                let t = self.advance().ok_or_else(|| self.unexpected("value"))?;
                let value = parse_int(t.text, t.span)?;
                Ok(Val {
                    span: t.span,
                    kind: ValKind::Int(value),
                })
            }
            Token::Str => {
                let t = self.advance().ok_or_else(|| self.unexpected("value"))?;
                Ok(Val {
                    span: t.span,
                    kind: ValKind::Str(t.text[1..t.text.len() - 1].to_string()),
                })
            }
            Token::LBrace => self.parse_int_set(),
            Token::LBracket => self.parse_tuple(),
            Token::Ident => {
                let t = self.advance().ok_or_else(|| self.unexpected("value"))?;
                Ok(Val {
                    span: t.span,
                    kind: ValKind::Var(t.text.to_string()),
                })
            }
            _ => Err(self.unexpected("value")),
        }
    }

    /// `{}` | `{i1, i2, …}` | `{lo..hi}`
    fn parse_int_set(&mut self) -> ParseResult<Val> {
        let start = self.expect(Token::LBrace)?.span;

        if self.check(&Token::RBrace) {
            let end = self.expect(Token::RBrace)?.span;
            return Ok(Val {
                span: start.merge(&end),
                kind: ValKind::IntSet(SetLiteral::Empty),
            });
        }

        let first = self.expect(Token::Int)?;
        let first_value = parse_int(first.text, first.span)?;

        if self.check(&Token::DotDot) {
            self.advance();
            let hi = self.expect(Token::Int)?;
            let hi_value = parse_int(hi.text, hi.span)?;
            let end = self.expect(Token::RBrace)?.span;
            return Ok(Val {
                span: start.merge(&end),
                kind: ValKind::IntSet(SetLiteral::Range {
                    lo: first_value,
                    hi: hi_value,
                }),
            });
        }

        let mut items = vec![first_value];
        while self.check(&Token::Comma) {
            self.advance();
            let t = self.expect(Token::Int)?;
            items.push(parse_int(t.text, t.span)?);
        }
        let end = self.expect(Token::RBrace)?.span;
        Ok(Val {
            span: start.merge(&end),
            kind: ValKind::IntSet(SetLiteral::List(items)),
        })
    }

    /// `[ v1, v2, … ]`, at least one element
    fn parse_tuple(&mut self) -> ParseResult<Val> {
        let start = self.expect(Token::LBracket)?.span;
        let mut elements = vec![self.parse_val()?];
        while self.check(&Token::Comma) {
            self.advance();
            elements.push(self.parse_val()?);
        }
        let end = self.expect(Token::RBracket)?.span;
        Ok(Val {
            span: start.merge(&end),
            kind: ValKind::Tuple(elements),
        })
    }

    /// A binder: a name or `[ p1, p2, … ]`
    pub(crate) fn parse_pattern(&mut self) -> ParseResult<Pattern> {
        if self.check(&Token::LBracket) {
            let start = self.expect(Token::LBracket)?.span;
            let mut parts = vec![self.parse_pattern()?];
            while self.check(&Token::Comma) {
                self.advance();
                parts.push(self.parse_pattern()?);
            }
            let end = self.expect(Token::RBracket)?.span;
            return Ok(Pattern {
                span: start.merge(&end),
                kind: PatternKind::Tuple(parts),
            });
        }

        let t = self.expect(Token::Ident)?;
        Ok(Pattern {
            span: t.span,
            kind: PatternKind::Name(t.text.to_string()),
        })
    }
}

fn parse_int(text: &str, span: crate::span::Span) -> ParseResult<i64> {
    text.parse::<i64>().map_err(|_| ParseError::IntOutOfRange {
        literal: text.to_string(),
        span,
    })
}
