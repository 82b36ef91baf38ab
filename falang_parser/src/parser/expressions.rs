//! Expression parsing.
//!
//! Precedence, high to low: atoms, postfix `*`, the prefix forms
//! (`load`, `map`/`filter`, `get_*`/`set_*`/`add_*`), `&`, `++`, `|`, `in`.
//! All binary operators associate to the left.

use super::Parser;
use crate::ast::{Expr, ExprKind, Lambda, LoadSource};
use crate::error::ParseResult;
use crate::span::Span;
use crate::token::Token;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_in()
    }

    fn make_expr(&mut self, span: Span, kind: ExprKind) -> Expr {
        Expr {
            id: self.fresh_id(),
            span,
            kind,
        }
    }

    fn parse_in(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_union()?;
        while self.check(&Token::KwIn) {
            self.advance();
            let rhs = self.parse_union()?;
            let span = lhs.span.merge(&rhs.span);
            lhs = self.make_expr(
                span,
                ExprKind::In {
                    item: Box::new(lhs),
                    collection: Box::new(rhs),
                },
            );
        }
        Ok(lhs)
    }

    fn parse_union(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_concat()?;
        while self.check(&Token::Pipe) {
            self.advance();
            let rhs = self.parse_concat()?;
            let span = lhs.span.merge(&rhs.span);
            lhs = self.make_expr(
                span,
                ExprKind::Union {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            );
        }
        Ok(lhs)
    }

    fn parse_concat(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_product()?;
        while self.check(&Token::PlusPlus) {
            self.advance();
            let rhs = self.parse_product()?;
            let span = lhs.span.merge(&rhs.span);
            lhs = self.make_expr(
                span,
                ExprKind::Concat {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            );
        }
        Ok(lhs)
    }

    fn parse_product(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.parse_unary()?;
        while self.check(&Token::Amp) {
            self.advance();
            let rhs = self.parse_unary()?;
            let span = lhs.span.merge(&rhs.span);
            lhs = self.make_expr(
                span,
                ExprKind::Product {
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
            );
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.current.as_ref().map(|t| t.token) else {
            return Err(self.unexpected("expression"));
        };

        match token {
            Token::KwLoad => self.parse_load(),
            Token::KwMap | Token::KwFilter => self.parse_map_filter(token),
            Token::KwGetStarts
            | Token::KwGetFinals
            | Token::KwGetVertices
            | Token::KwGetEdges
            | Token::KwGetLabels
            | Token::KwGetReachable => self.parse_extractor(token),
            Token::KwSetStarts | Token::KwSetFinals => self.parse_set_states(token),
            Token::KwAddStarts | Token::KwAddFinals => self.parse_add_states(token),
            _ => self.parse_postfix(),
        }
    }

    fn parse_load(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();
        self.advance();
        let (source, end) = if self.check(&Token::Str) {
            let t = self
                .advance()
                .ok_or_else(|| self.unexpected("string literal or variable"))?;
            (
                LoadSource::Literal(t.text[1..t.text.len() - 1].to_string()),
                t.span,
            )
        } else if self.check(&Token::Ident) {
            let t = self
                .advance()
                .ok_or_else(|| self.unexpected("string literal or variable"))?;
            (LoadSource::Var(t.text.to_string()), t.span)
        } else {
            return Err(self.unexpected("string literal or variable"));
        };
        Ok(self.make_expr(start.merge(&end), ExprKind::Load(source)))
    }

    fn parse_map_filter(&mut self, token: Token) -> ParseResult<Expr> {
        let start = self.current_span();
        self.advance();
        let over = Box::new(self.parse_unary()?);
        self.expect(Token::KwWith)?;
        let lambda = self.parse_lambda()?;
        let span = start.merge(&lambda.span);
        let kind = if token == Token::KwMap {
            ExprKind::Map { over, lambda }
        } else {
            ExprKind::Filter { over, lambda }
        };
        Ok(self.make_expr(span, kind))
    }

    fn parse_extractor(&mut self, token: Token) -> ParseResult<Expr> {
        let start = self.current_span();
        self.advance();
        self.expect(Token::KwOf)?;
        let inner = Box::new(self.parse_unary()?);
        let span = start.merge(&inner.span);
        let kind = match token {
            Token::KwGetStarts => ExprKind::GetStarts(inner),
            Token::KwGetFinals => ExprKind::GetFinals(inner),
            Token::KwGetVertices => ExprKind::GetVertices(inner),
            Token::KwGetEdges => ExprKind::GetEdges(inner),
            Token::KwGetLabels => ExprKind::GetLabels(inner),
            _ => ExprKind::GetReachable(inner),
        };
        Ok(self.make_expr(span, kind))
    }

    /// `set_starts of <fa> to <states>` (likewise `set_finals`)
    fn parse_set_states(&mut self, token: Token) -> ParseResult<Expr> {
        let start = self.current_span();
        self.advance();
        self.expect(Token::KwOf)?;
        let fa = Box::new(self.parse_unary()?);
        self.expect(Token::KwTo)?;
        let states = Box::new(self.parse_unary()?);
        let span = start.merge(&states.span);
        let kind = if token == Token::KwSetStarts {
            ExprKind::SetStarts { fa, states }
        } else {
            ExprKind::SetFinals { fa, states }
        };
        Ok(self.make_expr(span, kind))
    }

    /// `add_starts <states> to <fa>` (likewise `add_finals`)
    fn parse_add_states(&mut self, token: Token) -> ParseResult<Expr> {
        let start = self.current_span();
        self.advance();
        let states = Box::new(self.parse_unary()?);
        self.expect(Token::KwTo)?;
        let fa = Box::new(self.parse_unary()?);
        let span = start.merge(&fa.span);
        let kind = if token == Token::KwAddStarts {
            ExprKind::AddStarts { states, fa }
        } else {
            ExprKind::AddFinals { states, fa }
        };
        Ok(self.make_expr(span, kind))
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_atom()?;
        while self.check(&Token::Star) {
            let star = self.current_span();
            self.advance();
            let span = expr.span.merge(&star);
            expr = self.make_expr(span, ExprKind::Kleene(Box::new(expr)));
        }
        Ok(expr)
    }

    fn parse_atom(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.current.as_ref().map(|t| t.token) else {
            return Err(self.unexpected("expression"));
        };

        match token {
            Token::Ident => {
                let t = self
                    .advance()
                    .ok_or_else(|| self.unexpected("expression"))?;
                Ok(self.make_expr(t.span, ExprKind::Var(t.text.to_string())))
            }
            Token::Int | Token::Str | Token::LBrace | Token::LBracket => {
                let val = self.parse_val()?;
                let span = val.span;
                Ok(self.make_expr(span, ExprKind::Val(val)))
            }
            Token::LParen => {
                let start = self.current_span();
                self.advance();
                let inner = self.parse_expr()?;
                let end = self.expect(Token::RParen)?;
                Ok(self.make_expr(start.merge(&end.span), ExprKind::Braced(Box::new(inner))))
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_lambda(&mut self) -> ParseResult<Lambda> {
        let start = self.expect(Token::Backslash)?.span;
        let pattern = self.parse_pattern()?;
        self.expect(Token::Arrow)?;
        let body = Box::new(self.parse_expr()?);
        let span = start.merge(&body.span);
        Ok(Lambda {
            id: self.fresh_id(),
            span,
            pattern,
            body,
        })
    }
}
