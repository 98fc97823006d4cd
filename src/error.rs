//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、Miraコンパイラ全体で使用される統一的なエラー型と
//! エラー報告システムを提供します。パーサーは単一の`CodeError`で中断し、
//! セマンティック解析は`CodeError`のリストを蓄積します。

use crate::ast::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// ソースコード上の位置付きエラー
///
/// パーサーとセマンティック解析器の両方が使う共通のエラー表現。
/// `line`は元実装との互換のため常に1（表示はオフセットから計算される）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeError {
    pub message: String,
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl CodeError {
    pub fn new(message: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            message: message.into(),
            line: 1,
            start,
            end,
        }
    }

    pub fn at_span(message: impl Into<String>, span: Span) -> Self {
        Self::new(message, span.start, span.end)
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        Diagnostic::error()
            .with_message(self.message.clone())
            .with_labels(vec![Label::primary(file_id, self.start..self.end)])
    }
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}..{}]", self.message, self.start, self.end)
    }
}

/// レキサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerError {
    #[error("認識できないトークン: '{text}'")]
    UnrecognizedToken { text: String, span: Span },
}

impl LexerError {
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        match self {
            LexerError::UnrecognizedToken { text, span } => Diagnostic::error()
                .with_message(format!("Unrecognized token: '{}'", text))
                .with_labels(vec![Label::primary(file_id, span.start..span.end)]),
        }
    }
}

/// Miraコンパイラの統一エラー型
#[derive(Error, Debug, Clone)]
pub enum MiraError {
    /// 字句解析エラー
    #[error("字句解析エラー")]
    Lexer(#[from] LexerError),

    /// 構文解析エラー（単一のエラーで解析全体が中断される）
    #[error("構文解析エラー: {0}")]
    Parser(CodeError),

    /// セマンティック解析エラー（蓄積されたエラーのリスト）
    #[error("意味解析エラー: {}件のエラー", .0.len())]
    Analyzer(Vec<CodeError>),

    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {0}")]
    Io(String),
}

impl From<std::io::Error> for MiraError {
    fn from(e: std::io::Error) -> Self {
        MiraError::Io(e.to_string())
    }
}

/// Result型のエイリアス
pub type MiraResult<T> = Result<T, MiraError>;
