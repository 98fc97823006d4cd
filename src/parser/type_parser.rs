//! 型注釈の解析
//!
//! 組み込み単純型、リスト型、関数型、ジェネリック型パラメータを解析します。
//! それぞれの型は`?`サフィックスでnullableにできます（型パラメータを除く）。
//! ジェネリック型パラメータは関数シグネチャの中でのみ許可されます。

use crate::ast::*;
use crate::lexer::{Token, TokenKind};

use super::{ParseResult, Parser};

impl Parser {
    /// 型注釈を解析
    ///
    /// `allow_generics`は関数シグネチャ内でのみtrueになります。
    pub(super) fn parse_type_expr(&mut self, allow_generics: bool) -> ParseResult<TypeExpr> {
        let token = match self.current_token() {
            Some(t) => t.clone(),
            None => {
                let pos = self.previous_end();
                return Err(self.error_at("Type expected", pos));
            }
        };

        if token.kind.is_builtin_type() {
            let name = match token.kind {
                TokenKind::NumberType => TypeName::Number,
                TokenKind::StringType => TypeName::String,
                _ => TypeName::Bool,
            };
            self.advance();
            let (nullable, end) = self.nullable_suffix(token.span.end);
            return Ok(TypeExpr::Simple {
                name,
                nullable,
                span: Span::new(token.span.start, end),
            });
        }

        match &token.kind {
            TokenKind::LeftBracket => {
                self.advance();
                let element = self.parse_type_expr(allow_generics)?;

                let close_end = match self.current_token() {
                    Some(Token {
                        kind: TokenKind::RightBracket,
                        span,
                        ..
                    }) => span.end,
                    _ => return Err(self.error_at("']' expected", element.span().end)),
                };
                self.advance();

                let (nullable, end) = self.nullable_suffix(close_end);
                Ok(TypeExpr::List {
                    element: Box::new(element),
                    nullable,
                    span: Span::new(token.span.start, end),
                })
            }
            TokenKind::TypeParam(name) => {
                if !allow_generics {
                    return Err(self.error_at(
                        "Generic types are only allowed in function definition",
                        token.span.start,
                    ));
                }
                let name = name.clone();
                self.advance();
                Ok(TypeExpr::TypeParam {
                    name,
                    span: token.span,
                })
            }
            TokenKind::LeftParen => {
                self.advance();
                self.parse_function_type(token.span)
            }
            _ => {
                let pos = self.previous_end();
                Err(self.error_at("Type couldn't be parsed", pos))
            }
        }
    }

    /// `(`の直後から：`(T, ... => R)` または `(() => R)`（引数なし）
    fn parse_function_type(&mut self, open_span: Span) -> ParseResult<TypeExpr> {
        let mut params = Vec::new();

        // `()`は空のパラメータリストを表す
        if self.check(&TokenKind::LeftParen)
            && matches!(self.peek(1).map(|t| &t.kind), Some(TokenKind::RightParen))
        {
            self.advance();
            self.advance();
        } else {
            loop {
                params.push(self.parse_type_expr(true)?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        let return_type = if self.match_token(&TokenKind::FatArrow) {
            Some(Box::new(self.parse_type_expr(true)?))
        } else {
            None
        };

        let close_end = match self.current_token() {
            Some(Token {
                kind: TokenKind::RightParen,
                span,
                ..
            }) => span.end,
            _ => {
                let pos = self.previous_end();
                return Err(self.error_at("')' expected", pos));
            }
        };
        self.advance();

        let (nullable, end) = self.nullable_suffix(close_end);
        Ok(TypeExpr::Function {
            params,
            return_type,
            nullable,
            span: Span::new(open_span.start, end),
        })
    }

    /// `?`サフィックスを消費し、nullableフラグと終了位置を返す
    fn nullable_suffix(&mut self, default_end: usize) -> (bool, usize) {
        if let Some(Token {
            kind: TokenKind::Question,
            span,
            ..
        }) = self.current_token()
        {
            let end = span.end;
            self.advance();
            (true, end)
        } else {
            (false, default_end)
        }
    }
}
