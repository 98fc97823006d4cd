//! 式の解析
//!
//! 優先順位クライミング法による二項演算、単項演算、リスト/範囲リテラル、
//! `.`/`?.`による呼び出しチェーンを解析します。

use crate::ast::*;
use crate::lexer::{Token, TokenKind};

use super::{ParseResult, Parser};

impl Parser {
    /// 式を解析（最低優先順位から開始）
    pub(super) fn parse_expression(&mut self) -> ParseResult<OperandExpr> {
        self.parse_binary_expr(0)
    }

    /// 優先順位クライミング本体
    ///
    /// `precedence >= prev_precedence`の比較を使うため、同じ優先順位の
    /// 演算子は右側に深くネストします。
    fn parse_binary_expr(&mut self, prev_precedence: u8) -> ParseResult<OperandExpr> {
        let mut left = self.parse_unary_expr()?;

        loop {
            let (op, op_span) = match self.current_token() {
                Some(token) if token.kind.is_binary_operator() => {
                    (binary_op_of(&token.kind), token.span)
                }
                _ => return Ok(left),
            };

            let precedence = op.precedence();
            if precedence < prev_precedence {
                return Ok(left);
            }

            self.advance();
            let right = self.parse_binary_expr(precedence)?;
            let span = left.span().merge(right.span());
            left = OperandExpr::Binary(BinaryExpr {
                left: Box::new(left),
                operator: op,
                operator_span: op_span,
                right: Box::new(right),
                span,
            });
        }
    }

    /// 先頭の単項演算子を1つだけ消費する
    fn parse_unary_expr(&mut self) -> ParseResult<OperandExpr> {
        let token = match self.current_token() {
            Some(t) => t.clone(),
            None => {
                let pos = self.previous_end();
                return Err(self.error_at("Operand expected", pos));
            }
        };

        if token.kind.is_unary_operator() {
            let operator = match token.kind {
                TokenKind::Minus => UnaryOp::Negate,
                _ => UnaryOp::Not,
            };
            self.advance();
            let operand = self.parse_primary_expr()?;
            let span = token.span.merge(operand.span());
            return Ok(OperandExpr::Unary(UnaryExpr {
                operator,
                operand: Box::new(operand),
                span,
            }));
        }

        self.parse_primary_expr()
    }

    /// 単純オペランドと呼び出しチェーンの解析
    fn parse_primary_expr(&mut self) -> ParseResult<OperandExpr> {
        let token = match self.current_token() {
            Some(t) => t.clone(),
            None => {
                let pos = self.previous_end();
                return Err(self.error_at("Operand expected", pos));
            }
        };

        let mut operand = match &token.kind {
            TokenKind::Null => {
                self.advance();
                Some(OperandExpr::Null(NullExpr { span: token.span }))
            }
            TokenKind::Number(value) => {
                let value = *value;
                self.advance();
                Some(OperandExpr::Number(NumberExpr {
                    value,
                    span: token.span,
                }))
            }
            TokenKind::Str(value) => {
                let value = value.clone();
                self.advance();
                Some(OperandExpr::Str(StrExpr {
                    value,
                    span: token.span,
                }))
            }
            TokenKind::True | TokenKind::False => {
                let value = matches!(token.kind, TokenKind::True);
                self.advance();
                Some(OperandExpr::Bool(BoolExpr {
                    value,
                    span: token.span,
                }))
            }
            TokenKind::LeftBracket => {
                self.advance();
                Some(self.parse_list_or_range(token.span)?)
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_binary_expr(0)?;
                let close_span = match self.current_token() {
                    Some(Token {
                        kind: TokenKind::RightParen,
                        span,
                        ..
                    }) => *span,
                    _ => return Err(self.error_at("')' expected", inner.span().end)),
                };
                self.advance();
                Some(OperandExpr::Parenthesized(ParenthesizedExpr {
                    inner: Box::new(inner),
                    span: token.span.merge(close_span),
                }))
            }
            TokenKind::Identifier(name)
                if !matches!(self.peek(1).map(|t| &t.kind), Some(TokenKind::LeftParen)) =>
            {
                let name = name.clone();
                self.advance();
                Some(OperandExpr::Identifier(IdentifierExpr {
                    name,
                    span: token.span,
                }))
            }
            _ => None,
        };

        // 呼び出しチェーン：オペランドにアクセサが続く場合はレシーバ付き、
        // 識別子に`(`が直接続く場合はレシーバなしの呼び出し
        if let Some(receiver) = operand.take() {
            if self
                .current_token()
                .map(|t| t.kind.is_accessor())
                .unwrap_or(false)
            {
                let conditional = self.check(&TokenKind::QuestionDot);
                self.advance();
                return self.parse_invocation_chain(Some(Box::new(receiver)), conditional);
            }
            return Ok(receiver);
        }

        if matches!(token.kind, TokenKind::Identifier(_))
            && matches!(self.peek(1).map(|t| &t.kind), Some(TokenKind::LeftParen))
        {
            return self.parse_invocation_chain(None, false);
        }

        Err(self.error_at("Operand expected", token.span.start))
    }

    /// `Name(args)[.Name(args) | ?.Name(args)]*`
    ///
    /// 各ホップの結果が次のホップのレシーバになります。
    fn parse_invocation_chain(
        &mut self,
        mut receiver: Option<Box<OperandExpr>>,
        mut conditional: bool,
    ) -> ParseResult<OperandExpr> {
        loop {
            let (name, name_span) = self.expect_identifier("Identifier expected")?;

            if !self.check(&TokenKind::LeftParen) {
                return Err(self.error_at("'(' expected", name_span.end));
            }
            self.advance();

            let mut args = Vec::new();
            if !self.check(&TokenKind::RightParen) {
                loop {
                    args.push(self.parse_binary_expr(0)?);
                    if !self.match_token(&TokenKind::Comma) {
                        break;
                    }
                }
            }

            let close_span = match self.current_token() {
                Some(Token {
                    kind: TokenKind::RightParen,
                    span,
                    ..
                }) => *span,
                _ => return Err(self.error_here("')' expected")),
            };
            self.advance();

            let start = receiver
                .as_ref()
                .map(|r| r.span().start)
                .unwrap_or(name_span.start);
            let invocation = OperandExpr::Invocation(InvocationExpr {
                name,
                name_span,
                args,
                receiver,
                conditional,
                span: Span::new(start, close_span.end),
            });

            if self
                .current_token()
                .map(|t| t.kind.is_accessor())
                .unwrap_or(false)
            {
                conditional = self.check(&TokenKind::QuestionDot);
                self.advance();
                receiver = Some(Box::new(invocation));
                continue;
            }
            return Ok(invocation);
        }
    }

    /// `[`の直後から：空リスト、リスト、または範囲
    fn parse_list_or_range(&mut self, open_span: Span) -> ParseResult<OperandExpr> {
        if let Some(Token {
            kind: TokenKind::RightBracket,
            span,
            ..
        }) = self.current_token()
        {
            let span = open_span.merge(*span);
            self.advance();
            return Ok(OperandExpr::List(ListExpr {
                elements: Vec::new(),
                span,
            }));
        }

        let first = self.parse_binary_expr(0)?;

        if self.match_token(&TokenKind::DotDot) {
            let to = self.parse_binary_expr(0)?;
            let close_span = match self.current_token() {
                Some(Token {
                    kind: TokenKind::RightBracket,
                    span,
                    ..
                }) => *span,
                _ => return Err(self.error_at("']' expected", to.span().end)),
            };
            self.advance();
            return Ok(OperandExpr::Range(RangeExpr {
                from: Box::new(first),
                to: Box::new(to),
                span: open_span.merge(close_span),
            }));
        }

        let mut elements = vec![first];
        while self.match_token(&TokenKind::Comma) {
            elements.push(self.parse_binary_expr(0)?);
        }

        let close_span = match self.current_token() {
            Some(Token {
                kind: TokenKind::RightBracket,
                span,
                ..
            }) => *span,
            _ => {
                let pos = elements
                    .last()
                    .map(|e| e.span().end)
                    .unwrap_or(open_span.end);
                return Err(self.error_at("']' expected", pos));
            }
        };
        self.advance();

        Ok(OperandExpr::List(ListExpr {
            elements,
            span: open_span.merge(close_span),
        }))
    }
}

fn binary_op_of(kind: &TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Subtract,
        TokenKind::Star => BinaryOp::Multiply,
        TokenKind::Slash => BinaryOp::Divide,
        TokenKind::Percent => BinaryOp::Modulo,
        TokenKind::EqEq => BinaryOp::Equal,
        TokenKind::NotEq => BinaryOp::NotEqual,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::LessEq => BinaryOp::LessEqual,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::GreaterEq => BinaryOp::GreaterEqual,
        TokenKind::AndAnd => BinaryOp::And,
        TokenKind::OrOr => BinaryOp::Or,
        _ => BinaryOp::Coalesce,
    }
}
