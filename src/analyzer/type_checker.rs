//! 型チェックアルゴリズム
//!
//! 型システムの2つの純粋なアルゴリズム：最近接スーパータイプの計算と
//! 代入可能性の判定。どちらも意味解析器のあらゆる場所から使われます。

use super::types::TypeDescriptor;

/// 2つの型の最も近い共通スーパータイプを返す
///
/// - どちらかが`null`なら、もう一方をnullable化した型
/// - 両方が単純型なら、種別が一致する場合にnullabilityをORした型
/// - 両方がリスト型なら、空リストはもう一方に吸収され、それ以外は
///   要素型を再帰的にマージ
/// - それ以外の組み合わせに共通スーパータイプは無い
pub fn closest_supertype(x: &TypeDescriptor, y: &TypeDescriptor) -> Option<TypeDescriptor> {
    if matches!(x, TypeDescriptor::Null) {
        return Some(y.with_nullable(true));
    }
    if matches!(y, TypeDescriptor::Null) {
        return Some(x.with_nullable(true));
    }

    if let (Some((kind_x, null_x)), Some((kind_y, null_y))) = (x.as_simple(), y.as_simple()) {
        if kind_x == kind_y {
            return Some(TypeDescriptor::simple(kind_x, null_x || null_y));
        }
        return None;
    }

    if let (
        TypeDescriptor::List {
            element: element_x,
            nullable: null_x,
        },
        TypeDescriptor::List {
            element: element_y,
            nullable: null_y,
        },
    ) = (x, y)
    {
        let nullable = *null_x || *null_y;
        return match (element_x, element_y) {
            (None, _) => Some(y.with_nullable(nullable)),
            (_, None) => Some(x.with_nullable(nullable)),
            (Some(ex), Some(ey)) => {
                let element = closest_supertype(ex, ey)?;
                Some(TypeDescriptor::list(element, nullable))
            }
        };
    }

    None
}

/// 型の列の最近接スーパータイプ。空の列や一致しない列は`None`
pub fn closest_supertype_all<I>(types: I) -> Option<TypeDescriptor>
where
    I: IntoIterator<Item = TypeDescriptor>,
{
    let mut iter = types.into_iter();
    let first = iter.next()?;
    iter.try_fold(first, |acc, ty| closest_supertype(&acc, &ty))
}

fn assignment_invalid(x: &TypeDescriptor, y: &TypeDescriptor) -> bool {
    matches!(x, TypeDescriptor::Null)
        || x.is_invalid()
        || y.is_invalid()
        || x.is_empty_list()
}

/// `y`型の値を`x`型の変数に代入できるか
///
/// - `null`型・`Invalid`型・空リスト型の変数には代入できない
/// - nullable変数は`null`を受け入れる
/// - ジェネリック型パラメータは`null`以外の何でも受け入れる
/// - 非nullable変数にnullable値は代入できない
/// - 単純型は種別の一致、リスト型は要素ごとの再帰チェック
pub fn is_assignable(x: &TypeDescriptor, y: &TypeDescriptor) -> bool {
    if assignment_invalid(x, y) {
        return false;
    }

    if x.is_nullable() && matches!(y, TypeDescriptor::Null) {
        return true;
    }

    if matches!(x, TypeDescriptor::TypeParam { .. }) && !matches!(y, TypeDescriptor::Null) {
        return true;
    }

    if !x.is_nullable() && y.is_nullable() {
        return false;
    }

    if let (Some((kind_x, _)), Some((kind_y, _))) = (x.as_simple(), y.as_simple()) {
        return kind_x == kind_y;
    }

    if let (TypeDescriptor::List { .. }, TypeDescriptor::List { .. }) = (x, y) {
        return list_assignable(x, y);
    }

    false
}

/// リスト要素の代入可能性
///
/// 外側のnullabilityは`is_assignable`で検査済み。内側では単純型の
/// nullabilityは完全一致が必要で、ネストしたリストもnullabilityが
/// 一致しなければなりません。
fn list_assignable(x: &TypeDescriptor, y: &TypeDescriptor) -> bool {
    let mut x = x;
    let mut y = y;

    loop {
        if y.is_empty_list() {
            return true;
        }
        // 空リスト型の要素はジェネリック扱いで何でも受け入れる
        if x.is_empty_list() {
            return true;
        }

        let (element_x, element_y) = match (x, y) {
            (
                TypeDescriptor::List {
                    element: Some(ex), ..
                },
                TypeDescriptor::List {
                    element: Some(ey), ..
                },
            ) => (ex.as_ref(), ey.as_ref()),
            _ => return false,
        };

        if element_x.is_nullable() && matches!(element_y, TypeDescriptor::Null) {
            return true;
        }

        if matches!(element_x, TypeDescriptor::TypeParam { .. }) {
            return true;
        }

        if let (Some((kind_x, null_x)), Some((kind_y, null_y))) =
            (element_x.as_simple(), element_y.as_simple())
        {
            return kind_x == kind_y && null_x == null_y;
        }

        match (element_x, element_y) {
            (TypeDescriptor::List { nullable: nx, .. }, TypeDescriptor::List { nullable: ny, .. }) => {
                if nx != ny {
                    return false;
                }
                x = element_x;
                y = element_y;
            }
            _ => return false,
        }
    }
}
