//! 二項演算子の型付け規則
//!
//! 各演算子がオペランドの型の組に対して返す結果型のテーブル。
//! 規則に合わない組み合わせは`None`となり、呼び出し側が
//! "Invalid operation"として報告します。

use crate::ast::BinaryOp;

use super::types::{SimpleKind, TypeDescriptor};

/// 二項演算の結果型を返す（`??`は`coalesce_applicable`で別扱い）
pub fn binary_result(
    op: BinaryOp,
    left: &TypeDescriptor,
    right: &TypeDescriptor,
) -> Option<TypeDescriptor> {
    match op {
        BinaryOp::Add => plus(left, right),
        BinaryOp::Subtract | BinaryOp::Multiply => arithmetic(left, right, false),
        BinaryOp::Divide | BinaryOp::Modulo => arithmetic(left, right, true),
        BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
            compare(left, right)
        }
        BinaryOp::And | BinaryOp::Or => logical(left, right),
        BinaryOp::Equal | BinaryOp::NotEqual => equals(left, right),
        BinaryOp::Coalesce => None,
    }
}

/// `+`：どちらかの辺が文字列なら連結（結果は非nullableの`string`）、
/// そうでなければ数値加算
fn plus(left: &TypeDescriptor, right: &TypeDescriptor) -> Option<TypeDescriptor> {
    let left_is_string = matches!(left.as_simple(), Some((SimpleKind::String, _)));
    let right_is_string = matches!(right.as_simple(), Some((SimpleKind::String, _)));

    if (left_is_string && !right.is_invalid()) || (right_is_string && !left.is_invalid()) {
        return Some(TypeDescriptor::STRING);
    }

    arithmetic(left, right, false)
}

/// 数値演算。除算と剰余は結果を常にnullableにする（ゼロ除算は`null`）
fn arithmetic(
    left: &TypeDescriptor,
    right: &TypeDescriptor,
    force_nullable: bool,
) -> Option<TypeDescriptor> {
    match (left.as_simple(), right.as_simple()) {
        (Some((SimpleKind::Number, null_l)), Some((SimpleKind::Number, null_r))) => {
            Some(TypeDescriptor::simple(
                SimpleKind::Number,
                null_l || null_r || force_nullable,
            ))
        }
        _ => None,
    }
}

/// 比較演算。両辺が数値（または内側の比較連鎖）である必要があり、
/// 連鎖畳み込み用の`Composite`マーカーを返す
fn compare(left: &TypeDescriptor, right: &TypeDescriptor) -> Option<TypeDescriptor> {
    let valid = comparable(left) && comparable(right);
    valid.then_some(TypeDescriptor::Composite)
}

fn comparable(ty: &TypeDescriptor) -> bool {
    matches!(ty, TypeDescriptor::Composite)
        || matches!(ty.as_simple(), Some((SimpleKind::Number, _)))
}

/// `&&` / `||`。両辺がbool種別なら非nullableの`bool`
fn logical(left: &TypeDescriptor, right: &TypeDescriptor) -> Option<TypeDescriptor> {
    let valid = matches!(left.as_simple(), Some((SimpleKind::Bool, _)))
        && matches!(right.as_simple(), Some((SimpleKind::Bool, _)));
    valid.then_some(TypeDescriptor::BOOL)
}

/// `==` / `!=`。どちらかが`null`、または単純型同士で種別が一致すれば`bool`
fn equals(left: &TypeDescriptor, right: &TypeDescriptor) -> Option<TypeDescriptor> {
    if matches!(left, TypeDescriptor::Null) || matches!(right, TypeDescriptor::Null) {
        return Some(TypeDescriptor::BOOL);
    }

    match (left.as_simple(), right.as_simple()) {
        (Some((kind_l, _)), Some((kind_r, _))) => (kind_l == kind_r).then_some(TypeDescriptor::BOOL),
        _ => None,
    }
}

/// `??`が適用できるか：左辺がnullableで、両辺の単純型種別が一致すること
pub fn coalesce_applicable(left: &TypeDescriptor, right: &TypeDescriptor) -> bool {
    if !left.is_nullable() {
        return false;
    }

    match (left.as_simple(), right.as_simple()) {
        (Some((kind_l, _)), Some((kind_r, _))) => kind_l == kind_r,
        _ => false,
    }
}
