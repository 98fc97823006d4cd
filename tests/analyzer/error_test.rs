//! 変数・文・ループ制御のエラーのテスト

use super::*;

#[test]
fn test_bare_expression_statement() {
    assert_specific_error("1 + 2", "Expressions can't be used as statements");
}

#[test]
fn test_bare_literal_statement() {
    assert_specific_error(r#""hello""#, "Expressions can't be used as statements");
}

#[test]
fn test_invocation_is_a_valid_statement() {
    assert_analysis_success(
        r#"
        [<"WriteLine">] fun Print(s: string)
        Print("hello")
        "#,
    );
}

#[test]
fn test_failed_invocation_is_still_a_statement() {
    // 未解決の呼び出しでも文としては許され、エラーは1件だけになる
    let analysis = assert_specific_error("Foo()", "Function with this name hasn't been defined");
    assert_eq!(analysis.errors.len(), 1);
}

#[test]
fn test_undefined_variable() {
    assert_specific_error(
        "def a = b",
        "The variable has not been defined at this point in code",
    );
}

#[test]
fn test_variable_not_visible_in_its_own_initializer() {
    assert_specific_error(
        "def x = x",
        "The variable has not been defined at this point in code",
    );
}

#[test]
fn test_assignment_to_undefined_variable() {
    assert_specific_error(
        "x = 1",
        "The variable has not been defined at this point in code",
    );
}

#[test]
fn test_duplicate_variable_in_scope() {
    assert_specific_error(
        r#"
        def x = 1
        def x = 2
        "#,
        "Variable with the same name is already declared in this scope",
    );
}

#[test]
fn test_shadowing_in_inner_scope_is_allowed() {
    assert_analysis_success(
        r#"
        def x = 1
        if (true) { def x = 2 }
        "#,
    );
}

#[test]
fn test_inner_scope_variables_are_not_visible_outside() {
    assert_specific_error(
        r#"
        if (true) { def y = 1 }
        y = 2
        "#,
        "The variable has not been defined at this point in code",
    );
}

#[test]
fn test_outer_variables_are_visible_inside() {
    assert_analysis_success(
        r#"
        def x = 1
        while (x < 10) { x = x + 1 }
        "#,
    );
}

#[test]
fn test_break_outside_loop() {
    assert_specific_error("break", "'break' keyword is only valid inside a loop");
}

#[test]
fn test_skip_outside_loop() {
    assert_specific_error("skip", "'skip' keyword is only valid inside a loop");
}

#[test]
fn test_break_inside_nested_block_of_loop() {
    assert_analysis_success(
        r#"
        while (true) {
            if (true) { break }
        }
        "#,
    );
}

#[test]
fn test_keyword_in_if_outside_loop() {
    assert_specific_error(
        "if (true) { skip }",
        "'skip' keyword is only valid inside a loop",
    );
}

#[test]
fn test_errors_accumulate() {
    let analysis = analyze_source(
        r#"
        def x: number = "one"
        def y: string = 2
        "#,
    );
    assert_eq!(analysis.errors.len(), 2);
}

#[test]
fn test_parameters_are_visible_in_body() {
    assert_analysis_success(
        r#"
        fun Add(x: number, y: number): number { return x + y }
        "#,
    );
}

#[test]
fn test_parameters_are_not_visible_outside() {
    assert_specific_error(
        r#"
        fun F(x: number) { return }
        def y = x
        "#,
        "The variable has not been defined at this point in code",
    );
}

#[test]
fn test_function_locals_do_not_leak() {
    assert_specific_error(
        r#"
        fun F() { def local = 1 }
        def y = local
        "#,
        "The variable has not been defined at this point in code",
    );
}
