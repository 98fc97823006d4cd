//! 関数呼び出し・拡張関数・条件付き呼び出しのテスト

use super::*;
use miralang::analyzer::TypeDescriptor;

#[test]
fn test_simple_invocation() {
    let analysis = assert_analysis_success(
        r#"
        fun Inc(x: number): number { return x + 1 }
        def y = Inc(1)
        "#,
    );
    assert_eq!(def_type(&analysis, "y"), TypeDescriptor::NUMBER);
}

#[test]
fn test_undefined_function() {
    assert_specific_error("def y = Foo()", "Function with this name hasn't been defined");
}

#[test]
fn test_argument_count_mismatch() {
    assert_specific_error(
        r#"
        fun Inc(x: number): number { return x + 1 }
        def y = Inc(1, 2)
        "#,
        "The number of required parameters is different from the number of supplied parameters",
    );
}

#[test]
fn test_argument_type_mismatch() {
    assert_specific_error(
        r#"
        fun Inc(x: number): number { return x + 1 }
        def y = Inc("one")
        "#,
        "Type mismatch between the declared parameter and the supplied one",
    );
}

#[test]
fn test_extension_invocation() {
    let analysis = assert_analysis_success(
        r#"
        fun Inc(pre x: number): number { return x + 1 }
        def y = 3.Inc()
        "#,
    );
    assert_eq!(def_type(&analysis, "y"), TypeDescriptor::NUMBER);
}

#[test]
fn test_extension_receiver_counts_as_first_parameter() {
    assert_analysis_success(
        r#"
        fun IncBy(pre x: number, amount: number): number { return x + amount }
        def y = 3.IncBy(5)
        "#,
    );
}

#[test]
fn test_extension_chain() {
    let analysis = assert_analysis_success(
        r#"
        fun Inc(pre x: number): number { return x + 1 }
        fun IncBy(pre x: number, amount: number): number { return x + amount }
        def y = 3.Inc().IncBy(5)
        "#,
    );
    assert_eq!(def_type(&analysis, "y"), TypeDescriptor::NUMBER);
}

#[test]
fn test_non_extension_cannot_take_receiver() {
    assert_specific_error(
        r#"
        fun F(x: number): number { return x }
        def y = 3.F()
        "#,
        "The function: 'F' can't be used as an extension",
    );
}

#[test]
fn test_conditional_invocation_on_nullable_receiver() {
    let analysis = assert_analysis_success(
        r#"
        fun Inc(pre x: number): number { return x + 1 }
        def a: number? = null
        def b = a?.Inc()
        "#,
    );
    // `?.`の結果はnullableになる
    assert_eq!(def_type(&analysis, "b"), TypeDescriptor::NUMBER_NULLABLE);
}

#[test]
fn test_conditional_invocation_requires_nullable_receiver() {
    assert_specific_error(
        r#"
        fun Inc(pre x: number): number { return x + 1 }
        def b = 3?.Inc()
        "#,
        "Conditional invocation is not allowed on a non-nullable variable",
    );
}

#[test]
fn test_conditional_propagates_through_chain() {
    // 連鎖の途中に`?.`があれば、最終結果もnullableになる
    let analysis = assert_analysis_success(
        r#"
        fun Inc(pre x: number): number { return x + 1 }
        def a: number? = null
        def b = a?.Inc().Inc()
        "#,
    );
    assert_eq!(def_type(&analysis, "b"), TypeDescriptor::NUMBER_NULLABLE);
}

#[test]
fn test_plain_chain_on_nullable_receiver_fails() {
    // `.`での呼び出しはnullableなレシーバを受け入れない
    assert_specific_error(
        r#"
        fun Inc(pre x: number): number { return x + 1 }
        def a: number? = null
        def b = a.Inc()
        "#,
        "Type mismatch between the declared parameter and the supplied one",
    );
}

#[test]
fn test_duplicate_function_name() {
    assert_specific_error(
        r#"
        fun F(): number { return 1 }
        fun F(): number { return 2 }
        "#,
        "Function with the same name is already defined",
    );
}

#[test]
fn test_parameter_requires_type() {
    assert_specific_error("fun F(x) { return }", "Parameter type required");
}

#[test]
fn test_duplicate_parameter_name() {
    assert_specific_error(
        "fun F(x: number, x: number) { return }",
        "Parameter with the same name is already declared",
    );
}

#[test]
fn test_recursion_requires_return_annotation() {
    assert_specific_error(
        "fun F(x: number) { return F(x) }",
        "For recursive calls please provide the return type for function: 'F' explicitly",
    );
}

#[test]
fn test_forward_call_requires_return_annotation() {
    // 前方の関数は呼べるが、戻り値型が宣言されていなければ決定できない
    assert_specific_error(
        r#"
        def y = A()
        fun A() { return 1 }
        "#,
        "For recursive calls please provide the return type for function: 'A' explicitly",
    );
}

#[test]
fn test_annotated_recursion_succeeds() {
    assert_analysis_success(
        r#"
        fun Fact(n: number): number {
            if (n < 2) { return 1 }
            return n * Fact(n - 1)
        }
        "#,
    );
}

#[test]
fn test_forward_call_with_annotation_succeeds() {
    let analysis = assert_analysis_success(
        r#"
        def y = A()
        fun A(): number { return 1 }
        "#,
    );
    assert_eq!(def_type(&analysis, "y"), TypeDescriptor::NUMBER);
}

#[test]
fn test_import_invocation() {
    let analysis = assert_analysis_success(
        r#"
        [<"ReadLine">] fun Input(): string
        def s = Input()
        "#,
    );
    assert_eq!(def_type(&analysis, "s"), TypeDescriptor::STRING);
}

#[test]
fn test_import_without_return_type_is_unit() {
    let analysis = assert_analysis_success(
        r#"
        [<"WriteLine">] fun Print(s: string)
        Print("hello")
        "#,
    );
    assert_eq!(func_return_type(&analysis, "Print"), TypeDescriptor::UNIT);
}

#[test]
fn test_generic_extension_accepts_any_list() {
    assert_analysis_success(
        r#"
        [<"Count">] fun Count(pre list: [#T]): number
        def n = [1, 2, 3].Count()
        def m = ["a", "b"].Count()
        "#,
    );
}
