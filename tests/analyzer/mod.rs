//! セマンティック解析テストの共通モジュール
//!
//! セマンティック解析テストで使用する共通のヘルパー関数を定義する。

use miralang::analyzer::{Analysis, SemanticAnalyzer, TypeDescriptor};
use miralang::lexer::Lexer;
use miralang::parser::Parser;

/// ソースコードを構文解析し、セマンティック解析を実行するヘルパー関数
pub fn analyze_source(source: &str) -> Analysis {
    let tokens: Vec<_> = Lexer::new(source).collect();
    let mut parser = Parser::new(tokens);
    let program = parser.parse().expect("Parsing should succeed");
    SemanticAnalyzer::new().analyze(&program)
}

/// 解析がエラーなしで完了することを確認するヘルパー関数
pub fn assert_analysis_success(source: &str) -> Analysis {
    let analysis = analyze_source(source);
    assert!(
        analysis.is_ok(),
        "Analysis should succeed, got errors: {:?}",
        analysis.errors
    );
    analysis
}

/// 特定のメッセージのエラーが発生することを確認するヘルパー関数
pub fn assert_specific_error(source: &str, message: &str) -> Analysis {
    let analysis = analyze_source(source);
    assert!(
        analysis.errors.iter().any(|e| e.message == message),
        "Expected error '{}', got: {:?}",
        message,
        analysis.errors
    );
    analysis
}

/// 名前で変数定義の型を引くヘルパー関数（同名なら最後の定義が勝つ）
pub fn def_type(analysis: &Analysis, name: &str) -> TypeDescriptor {
    analysis
        .defs
        .iter()
        .rev()
        .find(|d| d.name == name)
        .unwrap_or_else(|| panic!("Definition '{}' not found", name))
        .ty
        .clone()
}

/// 名前で関数の確定済み戻り値型を引くヘルパー関数
pub fn func_return_type(analysis: &Analysis, name: &str) -> TypeDescriptor {
    analysis
        .functions
        .iter()
        .rev()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("Function '{}' not found", name))
        .return_type
        .clone()
        .expect("Return type should be resolved")
}

// サブモジュールの宣言
#[cfg(test)]
mod type_checking_test;
#[cfg(test)]
mod chain_test;
#[cfg(test)]
mod invocation_test;
#[cfg(test)]
mod error_test;
