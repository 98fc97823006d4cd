//! メインパーサー構造とユーティリティ

use crate::ast::*;
use crate::error::CodeError;
use crate::lexer::{Token, TokenKind};

use super::ParseResult;

/// Miraパーサー
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
    /// 関数宣言に解析順で割り当てる安定ID
    pub(super) next_decl_id: u32,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            next_decl_id: 0,
        }
    }

    /// 完全なプログラムを解析
    pub fn parse(&mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        let span = match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::dummy(),
        };

        Ok(Program { statements, span })
    }

    // ==================== ユーティリティメソッド ====================

    /// 現在のトークンを取得
    pub(super) fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    /// 特定のオフセット先のトークンを取得
    pub(super) fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset)
    }

    /// 現在のスパンを取得（終端では最後のトークンの終了位置）
    pub(super) fn current_span(&self) -> Span {
        if let Some(token) = self.current_token() {
            token.span
        } else if let Some(last) = self.tokens.last() {
            Span::new(last.span.end, last.span.end)
        } else {
            Span::dummy()
        }
    }

    /// 直前のトークンの終了位置
    pub(super) fn previous_end(&self) -> usize {
        if self.current > 0 {
            self.tokens
                .get(self.current - 1)
                .map(|t| t.span.end)
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// 次のトークンに進む
    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// 終端に到達したかチェック
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        if let Some(token) = self.current_token() {
            std::mem::discriminant(&token.kind) == std::mem::discriminant(kind)
        } else {
            false
        }
    }

    /// 特定のトークンにマッチしたら進む
    pub(super) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 特定のトークンを期待し、見つからなければ指定のメッセージでエラー
    pub(super) fn expect(&mut self, kind: &TokenKind, message: &str) -> ParseResult<Span> {
        if self.check(kind) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.error_here(message))
        }
    }

    /// 識別子を期待
    pub(super) fn expect_identifier(&mut self, message: &str) -> ParseResult<(String, Span)> {
        match self.current_token() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                span,
                ..
            }) => {
                let result = (name.clone(), *span);
                self.advance();
                Ok(result)
            }
            _ => Err(self.error_here(message)),
        }
    }

    /// 現在位置でのエラーを作成
    pub(super) fn error_here(&self, message: &str) -> CodeError {
        let pos = self.current_span().start;
        CodeError::new(message, pos, pos)
    }

    /// 指定位置でのエラーを作成
    pub(super) fn error_at(&self, message: &str, pos: usize) -> CodeError {
        CodeError::new(message, pos, pos)
    }
}
