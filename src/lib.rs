//! Mira Language Compiler Front End Library
//!
//! This library provides lexing, parsing and semantic analysis for the
//! Mira language.

pub mod analyzer;
pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use analyzer::{Analysis, SemanticAnalyzer, TypeDescriptor};
pub use ast::{Expr, OperandExpr, Program};
pub use error::{CodeError, MiraError, MiraResult};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseResult, Parser};
