//! セマンティック解析モジュール
//!
//! このモジュールは型チェック、名前解決、リターンパス解析、
//! その他のセマンティック検証を行います。
//!
//! 解析は型付きノード木（`SemanticNode`）と、蓄積された`CodeError`の
//! リストを生成します。エラーがあっても木は構造的に完全で、エラー箇所は
//! `Invalid`型でマークされます。

pub mod control_flow;
mod nodes;
mod operators;
mod semantic_analyzer;
mod symbol;
mod type_checker;
mod types;

// 公開API
pub use nodes::{
    Analysis, AssignmentNode, BlockNode, DefId, DefInfo, DefinitionNode, FuncId, FuncInfo, IfNode,
    KeywordNode, OperandKind, OperandNode, ReturnNode, SemanticNode, WhileNode,
};
pub use semantic_analyzer::SemanticAnalyzer;
pub use type_checker::{closest_supertype, closest_supertype_all, is_assignable};
pub use types::{SimpleKind, TypeDescriptor};
