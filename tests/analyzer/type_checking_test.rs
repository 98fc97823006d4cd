//! 基本的な型チェックとnullabilityのテスト

use super::*;
use miralang::analyzer::{SimpleKind, TypeDescriptor};

#[test]
fn test_inferred_definition_types() {
    let analysis = assert_analysis_success(
        r#"
        def n = 42
        def s = "hello"
        def b = true
        "#,
    );

    assert_eq!(def_type(&analysis, "n"), TypeDescriptor::NUMBER);
    assert_eq!(def_type(&analysis, "s"), TypeDescriptor::STRING);
    assert_eq!(def_type(&analysis, "b"), TypeDescriptor::BOOL);
}

#[test]
fn test_nullable_annotation_accepts_null() {
    let analysis = assert_analysis_success("def x: number? = null");
    assert_eq!(def_type(&analysis, "x"), TypeDescriptor::NUMBER_NULLABLE);
}

#[test]
fn test_non_nullable_annotation_rejects_null() {
    assert_specific_error(
        "def x: number = null",
        "Type mismatch between the expression and the variable",
    );
}

#[test]
fn test_null_without_annotation_cannot_be_inferred() {
    let analysis = assert_specific_error(
        "def x = null",
        "Expression type couldn't be inferred. Please, provide the type explicitly",
    );
    // 位置は文の先頭を指す
    assert_eq!(analysis.errors[0].start, 0);
    assert_eq!(analysis.errors[0].end, 0);
    // 変数は以降のエラー連鎖を防ぐためInvalid型で登録される
    assert_eq!(def_type(&analysis, "x"), TypeDescriptor::Invalid);
}

#[test]
fn test_empty_list_without_annotation_cannot_be_inferred() {
    assert_specific_error(
        "def l = []",
        "Expression type couldn't be inferred. Please, provide the type explicitly",
    );
}

#[test]
fn test_empty_list_with_annotation() {
    let analysis = assert_analysis_success("def l: [number] = []");
    assert_eq!(
        def_type(&analysis, "l"),
        TypeDescriptor::list(TypeDescriptor::NUMBER, false)
    );
}

#[test]
fn test_division_result_is_nullable() {
    // ゼロ除算がnullを生むため、除算の結果は常にnullable
    assert_specific_error(
        "def x: number = 1 / 2",
        "Type mismatch between the expression and the variable",
    );
    let analysis = assert_analysis_success("def x: number? = 1 / 2");
    assert_eq!(def_type(&analysis, "x"), TypeDescriptor::NUMBER_NULLABLE);
}

#[test]
fn test_modulo_result_is_nullable() {
    let analysis = assert_analysis_success("def x = 5 % 2");
    assert_eq!(def_type(&analysis, "x"), TypeDescriptor::NUMBER_NULLABLE);
}

#[test]
fn test_coalesce_takes_right_hand_type() {
    let analysis = assert_analysis_success(
        r#"
        def a: number? = null
        def b = a ?? 5
        "#,
    );
    assert_eq!(def_type(&analysis, "b"), TypeDescriptor::NUMBER);
}

#[test]
fn test_coalesce_with_nullable_right_stays_nullable() {
    let analysis = assert_analysis_success(
        r#"
        def a: number? = null
        def b = a ?? a
        "#,
    );
    assert_eq!(def_type(&analysis, "b"), TypeDescriptor::NUMBER_NULLABLE);
}

#[test]
fn test_coalesce_requires_nullable_left() {
    assert_specific_error("def x = 1 ?? 2", "Invalid operation");
}

#[test]
fn test_string_concatenation() {
    let analysis = assert_analysis_success(r#"def s = "total: " + 42"#);
    assert_eq!(def_type(&analysis, "s"), TypeDescriptor::STRING);
}

#[test]
fn test_list_elements_merge_to_supertype() {
    let analysis = assert_analysis_success("def l = [1, null, 3]");
    assert_eq!(
        def_type(&analysis, "l"),
        TypeDescriptor::list(TypeDescriptor::NUMBER_NULLABLE, false)
    );
}

#[test]
fn test_mixed_list_elements_are_rejected() {
    assert_specific_error(
        r#"def l = [1, "two"]"#,
        "Type mismatch between list elements",
    );
}

#[test]
fn test_range_produces_number_list() {
    let analysis = assert_analysis_success("def r = [1..5]");
    assert_eq!(
        def_type(&analysis, "r"),
        TypeDescriptor::list(TypeDescriptor::NUMBER, false)
    );
}

#[test]
fn test_range_rejects_nullable_endpoints() {
    assert_specific_error(
        r#"
        def a: number? = 1
        def r = [a..5]
        "#,
        "Invalid operation",
    );
}

#[test]
fn test_unary_operators() {
    let analysis = assert_analysis_success(
        r#"
        def n = -5
        def b = !true
        "#,
    );
    assert_eq!(def_type(&analysis, "n"), TypeDescriptor::NUMBER);
    assert_eq!(def_type(&analysis, "b"), TypeDescriptor::BOOL);
}

#[test]
fn test_unary_on_wrong_kind_is_invalid() {
    assert_specific_error("def e = !5", "Invalid operation");
}

#[test]
fn test_unary_preserves_nullability() {
    let analysis = assert_analysis_success(
        r#"
        def a: number? = 1
        def b = -a
        "#,
    );
    assert_eq!(
        def_type(&analysis, "b"),
        TypeDescriptor::simple(SimpleKind::Number, true)
    );
}

#[test]
fn test_condition_must_be_bool() {
    assert_specific_error("if (1) { def x = 1 }", "The type of a condition must be bool");
    assert_specific_error(
        r#"while ("s") { def x = 1 }"#,
        "The type of a condition must be bool",
    );
}

#[test]
fn test_nullable_bool_condition_is_rejected() {
    assert_specific_error(
        r#"
        def b: bool? = true
        if (b) { def x = 1 }
        "#,
        "The type of a condition must be bool",
    );
}

#[test]
fn test_assignment_type_checking() {
    assert_analysis_success(
        r#"
        def x = 1
        x = 2
        "#,
    );
    assert_specific_error(
        r#"
        def x = 1
        x = "two"
        "#,
        "Type mismatch between the expression and the variable",
    );
}

#[test]
fn test_nullable_variable_accepts_plain_value() {
    assert_analysis_success(
        r#"
        def x: number? = null
        x = 42
        "#,
    );
}
