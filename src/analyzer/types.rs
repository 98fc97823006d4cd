//! 型記述子
//!
//! 解析中のすべての値に付与される型の表現。単純型・リスト型・ジェネリック
//! 型パラメータ・`null`型・エラー検出用の`Invalid`型、および数値比較連鎖の
//! 畳み込み中にのみ現れる一時的な`Composite`マーカーから成ります。
//! nullabilityは`Invalid`を除く各型に直交する属性として付きます。

use crate::ast::{TypeExpr, TypeName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 組み込み単純型の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimpleKind {
    Unit,
    Bool,
    Number,
    String,
}

/// 型記述子
///
/// 空リストのセンチネルは`List { element: None }`で表現されます
/// （要素型が確定する前の`[]`の型）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    Simple {
        kind: SimpleKind,
        nullable: bool,
    },
    List {
        element: Option<Box<TypeDescriptor>>,
        nullable: bool,
    },
    /// 関数シグネチャ内のジェネリック型パラメータ
    TypeParam {
        name: String,
    },
    /// `null`リテラルの型（常にnullable）
    Null,
    /// 数値比較連鎖を畳み込む際の一時マーカー（構造的には非nullableのbool）
    Composite,
    /// エラー検出用のセンチネル。連鎖的な診断を抑制する
    Invalid,
}

impl TypeDescriptor {
    pub const UNIT: TypeDescriptor = TypeDescriptor::Simple {
        kind: SimpleKind::Unit,
        nullable: false,
    };
    pub const BOOL: TypeDescriptor = TypeDescriptor::Simple {
        kind: SimpleKind::Bool,
        nullable: false,
    };
    pub const NUMBER: TypeDescriptor = TypeDescriptor::Simple {
        kind: SimpleKind::Number,
        nullable: false,
    };
    pub const NUMBER_NULLABLE: TypeDescriptor = TypeDescriptor::Simple {
        kind: SimpleKind::Number,
        nullable: true,
    };
    pub const STRING: TypeDescriptor = TypeDescriptor::Simple {
        kind: SimpleKind::String,
        nullable: false,
    };
    pub const EMPTY_LIST: TypeDescriptor = TypeDescriptor::List {
        element: None,
        nullable: false,
    };

    pub fn simple(kind: SimpleKind, nullable: bool) -> TypeDescriptor {
        TypeDescriptor::Simple { kind, nullable }
    }

    pub fn list(element: TypeDescriptor, nullable: bool) -> TypeDescriptor {
        TypeDescriptor::List {
            element: Some(Box::new(element)),
            nullable,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeDescriptor::Simple { nullable, .. } => *nullable,
            TypeDescriptor::List { nullable, .. } => *nullable,
            TypeDescriptor::Null => true,
            _ => false,
        }
    }

    /// nullabilityを差し替えた型を返す
    ///
    /// `Composite`はnullabilityを変えると普通の`bool`に落ちます。
    /// `TypeParam`、`Null`、`Invalid`は変更されません。
    pub fn with_nullable(&self, nullable: bool) -> TypeDescriptor {
        match self {
            TypeDescriptor::Simple { kind, .. } => TypeDescriptor::Simple {
                kind: *kind,
                nullable,
            },
            TypeDescriptor::Composite => TypeDescriptor::Simple {
                kind: SimpleKind::Bool,
                nullable,
            },
            TypeDescriptor::List { element, .. } => TypeDescriptor::List {
                element: element.clone(),
                nullable,
            },
            other => other.clone(),
        }
    }

    /// 単純型としての見え方（`Composite`は非nullableのboolとして扱う）
    pub fn as_simple(&self) -> Option<(SimpleKind, bool)> {
        match self {
            TypeDescriptor::Simple { kind, nullable } => Some((*kind, *nullable)),
            TypeDescriptor::Composite => Some((SimpleKind::Bool, false)),
            _ => None,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Simple {
                kind: SimpleKind::Unit,
                ..
            }
        )
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, TypeDescriptor::Invalid)
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, TypeDescriptor::List { element: None, .. })
    }

    /// `null`や空リストを（ネストの内側まで）含む、要素型が確定していない型
    pub fn not_identified(&self) -> bool {
        let mut ty = self;
        loop {
            match ty {
                TypeDescriptor::Null => return true,
                TypeDescriptor::List { element: None, .. } => return true,
                TypeDescriptor::List {
                    element: Some(inner),
                    ..
                } => ty = inner,
                _ => return false,
            }
        }
    }

    /// ジェネリック型パラメータを（ネストの内側まで）含むか
    pub fn is_generic(&self) -> bool {
        let mut ty = self;
        loop {
            match ty {
                TypeDescriptor::TypeParam { .. } => return true,
                TypeDescriptor::List {
                    element: Some(inner),
                    ..
                } => ty = inner,
                _ => return false,
            }
        }
    }

    /// 型注釈から型記述子を作る
    ///
    /// 関数型には対応する記述子が無いため`None`を返します。
    pub fn from_type_expr(expr: &TypeExpr) -> Option<TypeDescriptor> {
        match expr {
            TypeExpr::Simple { name, nullable, .. } => {
                let kind = match name {
                    TypeName::Number => SimpleKind::Number,
                    TypeName::String => SimpleKind::String,
                    TypeName::Bool => SimpleKind::Bool,
                };
                Some(TypeDescriptor::Simple {
                    kind,
                    nullable: *nullable,
                })
            }
            TypeExpr::List {
                element, nullable, ..
            } => {
                let element = TypeDescriptor::from_type_expr(element)?;
                Some(TypeDescriptor::list(element, *nullable))
            }
            TypeExpr::TypeParam { name, .. } => Some(TypeDescriptor::TypeParam {
                name: name.clone(),
            }),
            TypeExpr::Function { .. } => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Simple { kind, nullable } => {
                let name = match kind {
                    SimpleKind::Unit => "unit",
                    SimpleKind::Bool => "bool",
                    SimpleKind::Number => "number",
                    SimpleKind::String => "string",
                };
                write!(f, "{}{}", name, if *nullable { "?" } else { "" })
            }
            TypeDescriptor::List { element, nullable } => {
                write!(f, "[")?;
                if let Some(element) = element {
                    write!(f, "{}", element)?;
                }
                write!(f, "]{}", if *nullable { "?" } else { "" })
            }
            TypeDescriptor::TypeParam { name } => write!(f, "#{}", name),
            TypeDescriptor::Null => write!(f, "null"),
            TypeDescriptor::Composite => write!(f, "bool"),
            TypeDescriptor::Invalid => write!(f, "Invalid"),
        }
    }
}
