//! パーサーモジュール
//!
//! このモジュールはトークンを抽象構文木（AST）に解析する責任を持ちます。
//! 再帰下降構文解析を使用し、優先順位クライミング法で二項演算子を処理します。
//!
//! ## 文の先読みディスパッチ
//!
//! 文の種類は先頭トークン（と1トークンの先読み）で決まります：
//!
//! - `識別子 =` → 代入
//! - 単純オペランド、または単項演算子＋単純オペランド → 式文
//! - `if` / `def` / `while` / `skip` / `break` / `fun` / `return` → 各構文
//! - `[<` → 外部関数インポート属性
//!
//! ## 優先順位クライミング
//!
//! 二項演算子は`precedence >= prev`の比較で再帰するため、同じ優先順位の
//! 演算子は右結合にネストします。比較演算子の連鎖（`3 < 4 < 5`）は
//! この性質に依存して意味解析器で単一の連鎖ノードに畳み込まれます。
//!
//! パーサーは最初のエラーで解析全体を中断し、単一の`CodeError`を返します。

mod expr_parser;
mod parser_impl;
mod stmt_parser;
mod type_parser;

// 公開API
pub use parser_impl::Parser;

use crate::error::CodeError;
pub type ParseResult<T> = Result<T, CodeError>;
