//! 数値比較連鎖の畳み込みのテスト
//!
//! `3 < 4 < 5`のような連鎖はオペランド列と演算子列を持つ単一の
//! ノードに畳み込まれ、変数に束縛すると普通の`bool`になる。

use super::*;
use miralang::analyzer::{Analysis, OperandKind, OperandNode, SemanticNode, TypeDescriptor};
use miralang::ast::BinaryOp;

/// 最初の文の定義の右辺ノードを取り出す
fn first_definition_value(analysis: &Analysis) -> &OperandNode {
    match &analysis.nodes[0] {
        SemanticNode::Definition(def) => &def.value,
        other => panic!("Expected definition node, got: {:?}", other),
    }
}

#[test]
fn test_three_way_chain_folds_into_one_node() {
    let analysis = assert_analysis_success("def c = 3 < 4 < 5");
    let value = first_definition_value(&analysis);

    match &value.kind {
        OperandKind::NumericChain {
            operands,
            operators,
        } => {
            assert_eq!(operands.len(), 3);
            assert_eq!(operators, &vec![BinaryOp::Less, BinaryOp::Less]);
            assert!(matches!(operands[0].kind, OperandKind::Number(n) if n == 3.0));
            assert!(matches!(operands[1].kind, OperandKind::Number(n) if n == 4.0));
            assert!(matches!(operands[2].kind, OperandKind::Number(n) if n == 5.0));
        }
        other => panic!("Expected numeric chain, got: {:?}", other),
    }

    // 連鎖を変数に束縛すると普通のboolになる
    assert_eq!(def_type(&analysis, "c"), TypeDescriptor::BOOL);
}

#[test]
fn test_mixed_relational_operators() {
    let analysis = assert_analysis_success("def c = 1 <= 2 < 3");
    let value = first_definition_value(&analysis);

    match &value.kind {
        OperandKind::NumericChain { operators, .. } => {
            assert_eq!(operators, &vec![BinaryOp::LessEqual, BinaryOp::Less]);
        }
        other => panic!("Expected numeric chain, got: {:?}", other),
    }
}

#[test]
fn test_two_operand_comparison_is_also_a_chain() {
    let analysis = assert_analysis_success("def c = 1 < 2");
    let value = first_definition_value(&analysis);

    match &value.kind {
        OperandKind::NumericChain {
            operands,
            operators,
        } => {
            assert_eq!(operands.len(), 2);
            assert_eq!(operators.len(), 1);
        }
        other => panic!("Expected numeric chain, got: {:?}", other),
    }
}

#[test]
fn test_parenthesized_operand_stops_absorption() {
    let analysis = assert_analysis_success("def c = 1 < (2 < 3)");
    let value = first_definition_value(&analysis);

    match &value.kind {
        OperandKind::NumericChain {
            operands,
            operators,
        } => {
            // 括弧の内側は独立した連鎖のまま、外側のオペランドになる
            assert_eq!(operands.len(), 2);
            assert_eq!(operators, &vec![BinaryOp::Less]);
            assert!(matches!(
                operands[1].kind,
                OperandKind::Parenthesized(_)
            ));
        }
        other => panic!("Expected numeric chain, got: {:?}", other),
    }
}

#[test]
fn test_chain_is_valid_condition() {
    assert_analysis_success("if (1 < 2 < 3) { def x = 1 }");
}

#[test]
fn test_chain_combines_with_logical_operators() {
    let analysis = assert_analysis_success("def c = 1 < 2 && true");
    assert_eq!(def_type(&analysis, "c"), TypeDescriptor::BOOL);
}

#[test]
fn test_equality_is_not_folded() {
    let analysis = assert_analysis_success("def c = 1 == 1");
    let value = first_definition_value(&analysis);

    assert!(matches!(value.kind, OperandKind::Binary { .. }));
    assert_eq!(def_type(&analysis, "c"), TypeDescriptor::BOOL);
}

#[test]
fn test_chained_equality_is_invalid() {
    // `==`は連鎖しない：右側が先にboolになり、数値と比較できない
    assert_specific_error("def c = 1 == 2 == 3", "Invalid operation");
}

#[test]
fn test_chain_rejects_non_number_operand() {
    assert_specific_error(r#"def c = 1 < "two" < 3"#, "Invalid operation");
}
