//! 文レベルの構文のテスト

use super::*;
use miralang::ast::*;

#[test]
fn test_empty_program() {
    let ast = assert_parse_success("");
    assert!(ast.statements.is_empty());
}

#[test]
fn test_definition_without_type() {
    let ast = assert_parse_success("def x = 42");
    assert_eq!(ast.statements.len(), 1);

    match &ast.statements[0] {
        Expr::Definition(def) => {
            assert_eq!(def.name, "x");
            assert!(def.declared_type.is_none());
            assert!(matches!(
                def.value,
                OperandExpr::Number(NumberExpr { value, .. }) if value == 42.0
            ));
        }
        other => panic!("Expected definition, got: {:?}", other),
    }
}

#[test]
fn test_definition_with_nullable_type() {
    let ast = assert_parse_success("def x: number? = null");

    match &ast.statements[0] {
        Expr::Definition(def) => {
            assert_eq!(
                def.declared_type,
                Some(TypeExpr::Simple {
                    name: TypeName::Number,
                    nullable: true,
                    span: Span::new(7, 14),
                })
            );
            assert!(matches!(def.value, OperandExpr::Null(_)));
        }
        other => panic!("Expected definition, got: {:?}", other),
    }
}

#[test]
fn test_assignment() {
    let ast = assert_parse_success("x = 1");

    match &ast.statements[0] {
        Expr::Assignment(assign) => {
            assert_eq!(assign.name, "x");
            assert!(matches!(assign.value, OperandExpr::Number(_)));
        }
        other => panic!("Expected assignment, got: {:?}", other),
    }
}

#[test]
fn test_if_statement() {
    let ast = assert_parse_success("if (true) { def x = 1 }");

    match &ast.statements[0] {
        Expr::If(if_expr) => {
            // 条件は常に括弧付きで解析される
            assert!(matches!(if_expr.condition, OperandExpr::Parenthesized(_)));
            assert_eq!(if_expr.block.statements.len(), 1);
            assert!(if_expr.elif.is_none());
            assert!(if_expr.else_block.is_none());
        }
        other => panic!("Expected if, got: {:?}", other),
    }
}

#[test]
fn test_if_elif_else_chain() {
    let source = "if (true) { skip } elif (false) { skip } else { skip }";
    // `skip`はループ外では意味エラーだが、構文としては有効
    let ast = assert_parse_success(&format!("while (true) {{ {} }}", source));

    let while_expr = match &ast.statements[0] {
        Expr::While(w) => w,
        other => panic!("Expected while, got: {:?}", other),
    };
    let if_expr = match &while_expr.block.statements[0] {
        Expr::If(i) => i,
        other => panic!("Expected if, got: {:?}", other),
    };

    // elifはネストしたIfExprとして連鎖する
    let elif = if_expr.elif.as_ref().expect("elif expected");
    assert!(if_expr.else_block.is_none());
    assert!(elif.elif.is_none());
    assert!(elif.else_block.is_some());
}

#[test]
fn test_if_with_single_expression_body() {
    let ast = assert_parse_success("def x = 0 if (true) 1 else 2");

    match &ast.statements[1] {
        Expr::If(if_expr) => {
            assert_eq!(if_expr.block.statements.len(), 1);
            assert!(matches!(
                if_expr.block.statements[0],
                Expr::Operand(OperandExpr::Number(_))
            ));
            let else_block = if_expr.else_block.as_ref().expect("else expected");
            assert_eq!(else_block.statements.len(), 1);
        }
        other => panic!("Expected if, got: {:?}", other),
    }
}

#[test]
fn test_while_statement() {
    let ast = assert_parse_success("while (true) { break }");

    match &ast.statements[0] {
        Expr::While(while_expr) => {
            assert_eq!(while_expr.block.statements.len(), 1);
            assert!(matches!(
                while_expr.block.statements[0],
                Expr::Keyword(KeywordExpr {
                    kind: KeywordKind::Break,
                    ..
                })
            ));
        }
        other => panic!("Expected while, got: {:?}", other),
    }
}

#[test]
fn test_skip_keyword() {
    let ast = assert_parse_success("while (true) { skip }");

    match &ast.statements[0] {
        Expr::While(while_expr) => {
            assert!(matches!(
                while_expr.block.statements[0],
                Expr::Keyword(KeywordExpr {
                    kind: KeywordKind::Skip,
                    ..
                })
            ));
        }
        other => panic!("Expected while, got: {:?}", other),
    }
}

#[test]
fn test_return_with_operand() {
    let ast = assert_parse_success("fun F(): number { return 42 }");

    match &ast.statements[0] {
        Expr::FuncDefinition(func) => match &func.body.statements[0] {
            Expr::Return(ret) => {
                assert!(matches!(ret.value, Some(OperandExpr::Number(_))));
            }
            other => panic!("Expected return, got: {:?}", other),
        },
        other => panic!("Expected function, got: {:?}", other),
    }
}

#[test]
fn test_return_without_operand() {
    let ast = assert_parse_success("fun F() { return }");

    match &ast.statements[0] {
        Expr::FuncDefinition(func) => match &func.body.statements[0] {
            Expr::Return(ret) => assert!(ret.value.is_none()),
            other => panic!("Expected return, got: {:?}", other),
        },
        other => panic!("Expected function, got: {:?}", other),
    }
}

#[test]
fn test_invocation_statement() {
    let ast = assert_parse_success("Print(42)");

    match &ast.statements[0] {
        Expr::Operand(OperandExpr::Invocation(inv)) => {
            assert_eq!(inv.name, "Print");
            assert_eq!(inv.args.len(), 1);
            assert!(inv.receiver.is_none());
        }
        other => panic!("Expected invocation, got: {:?}", other),
    }
}

#[test]
fn test_nested_blocks() {
    let ast = assert_parse_success("if (true) { if (false) { def x = 1 } }");

    match &ast.statements[0] {
        Expr::If(outer) => {
            assert!(matches!(outer.block.statements[0], Expr::If(_)));
        }
        other => panic!("Expected if, got: {:?}", other),
    }
}
