//! Abstract Syntax Tree definitions for the Mira language.
//!
//! The tree is untyped: every node carries a source span and the raw
//! structure the parser saw. Type information is attached later by the
//! semantic analyzer, which produces its own node family.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location span (half-open byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// A complete program: an ordered list of top-level statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Expr>,
    pub span: Span,
}

/// A statement-level expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Bare operand used in statement position (e.g. an invocation)
    Operand(OperandExpr),
    /// `def name[: type] = expr`
    Definition(DefinitionExpr),
    /// `name = expr`
    Assignment(AssignmentExpr),
    /// `if cond { } elif cond { } else { }`
    If(IfExpr),
    /// `while cond { }`
    While(WhileExpr),
    /// `break` / `skip`
    Keyword(KeywordExpr),
    /// `return [expr]`
    Return(ReturnExpr),
    /// `fun Name(params)[: type] { }`
    FuncDefinition(FuncDefinitionExpr),
    /// `[<"External">] fun Name(params): type`
    FuncImport(FuncImportExpr),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Operand(e) => e.span(),
            Expr::Definition(e) => e.span,
            Expr::Assignment(e) => e.span,
            Expr::If(e) => e.span,
            Expr::While(e) => e.span,
            Expr::Keyword(e) => e.span,
            Expr::Return(e) => e.span,
            Expr::FuncDefinition(e) => e.span,
            Expr::FuncImport(e) => e.span,
        }
    }
}

/// A value-producing expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperandExpr {
    Number(NumberExpr),
    Str(StrExpr),
    Bool(BoolExpr),
    Null(NullExpr),
    Identifier(IdentifierExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Parenthesized(ParenthesizedExpr),
    List(ListExpr),
    Range(RangeExpr),
    Invocation(InvocationExpr),
}

impl OperandExpr {
    pub fn span(&self) -> Span {
        match self {
            OperandExpr::Number(e) => e.span,
            OperandExpr::Str(e) => e.span,
            OperandExpr::Bool(e) => e.span,
            OperandExpr::Null(e) => e.span,
            OperandExpr::Identifier(e) => e.span,
            OperandExpr::Unary(e) => e.span,
            OperandExpr::Binary(e) => e.span,
            OperandExpr::Parenthesized(e) => e.span,
            OperandExpr::List(e) => e.span,
            OperandExpr::Range(e) => e.span,
            OperandExpr::Invocation(e) => e.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberExpr {
    pub value: f64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolExpr {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullExpr {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub operator: UnaryOp,
    pub operand: Box<OperandExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: Box<OperandExpr>,
    pub operator: BinaryOp,
    pub operator_span: Span,
    pub right: Box<OperandExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenthesizedExpr {
    pub inner: Box<OperandExpr>,
    pub span: Span,
}

/// `[e1, e2, ...]` (possibly empty)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListExpr {
    pub elements: Vec<OperandExpr>,
    pub span: Span,
}

/// `[from..to]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeExpr {
    pub from: Box<OperandExpr>,
    pub to: Box<OperandExpr>,
    pub span: Span,
}

/// A function call, possibly chained through `.` or `?.`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationExpr {
    pub name: String,
    pub name_span: Span,
    pub args: Vec<OperandExpr>,
    /// The expression the call is chained onto, if any
    pub receiver: Option<Box<OperandExpr>>,
    /// True when the call was chained with `?.`
    pub conditional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionExpr {
    pub name: String,
    pub name_span: Span,
    pub declared_type: Option<TypeExpr>,
    pub value: OperandExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentExpr {
    pub name: String,
    pub name_span: Span,
    pub value: OperandExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockExpr {
    pub statements: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfExpr {
    pub condition: OperandExpr,
    pub block: BlockExpr,
    /// `elif` continues the chain as a nested `IfExpr`
    pub elif: Option<Box<IfExpr>>,
    pub else_block: Option<BlockExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileExpr {
    pub condition: OperandExpr,
    pub block: BlockExpr,
    pub span: Span,
}

/// Loop control keyword kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordKind {
    Break,
    Skip,
}

impl fmt::Display for KeywordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordKind::Break => write!(f, "break"),
            KeywordKind::Skip => write!(f, "skip"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordExpr {
    pub kind: KeywordKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnExpr {
    pub value: Option<OperandExpr>,
    pub span: Span,
}

/// A parameter declaration in a function signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    /// Parameter types are syntactically optional; an untyped parameter
    /// is reported by the analyzer
    pub ty: Option<TypeExpr>,
    pub span: Span,
}

/// The shared part of function definitions and imports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncSignature {
    pub name: String,
    pub name_span: Span,
    /// True when the function declares a `pre`-parameter, making it
    /// callable with accessor syntax
    pub is_extension: bool,
    pub params: Vec<ParamDecl>,
    pub return_type: Option<TypeExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDefinitionExpr {
    /// Stable id assigned in parse order, used by the analyzer's
    /// signature-registration pass
    pub decl_id: u32,
    pub signature: FuncSignature,
    pub body: BlockExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncImportExpr {
    pub decl_id: u32,
    /// The external symbol name given in the attribute
    pub external_name: String,
    pub signature: FuncSignature,
    pub span: Span,
}

/// A parsed type annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// `number`, `string`, `bool`, optionally suffixed with `?`
    Simple {
        name: TypeName,
        nullable: bool,
        span: Span,
    },
    /// `[T]`, optionally suffixed with `?`
    List {
        element: Box<TypeExpr>,
        nullable: bool,
        span: Span,
    },
    /// `#T` (signature positions only)
    TypeParam { name: String, span: Span },
    /// `(T, ... => R)`, optionally suffixed with `?`
    Function {
        params: Vec<TypeExpr>,
        return_type: Option<Box<TypeExpr>>,
        nullable: bool,
        span: Span,
    },
}

impl TypeExpr {
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Simple { span, .. } => *span,
            TypeExpr::List { span, .. } => *span,
            TypeExpr::TypeParam { span, .. } => *span,
            TypeExpr::Function { span, .. } => *span,
        }
    }
}

/// Built-in simple type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeName {
    Number,
    String,
    Bool,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Number => write!(f, "number"),
            TypeName::String => write!(f, "string"),
            TypeName::Bool => write!(f, "bool"),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Simple { name, nullable, .. } => {
                write!(f, "{}{}", name, if *nullable { "?" } else { "" })
            }
            TypeExpr::List {
                element, nullable, ..
            } => write!(f, "[{}]{}", element, if *nullable { "?" } else { "" }),
            TypeExpr::TypeParam { name, .. } => write!(f, "#{}", name),
            TypeExpr::Function {
                params,
                return_type,
                nullable,
                ..
            } => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                if let Some(ret) = return_type {
                    write!(f, " => {}", ret)?;
                }
                write!(f, "){}", if *nullable { "?" } else { "" })
            }
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
    Coalesce,
}

impl BinaryOp {
    /// Binding strength; higher binds tighter. Operators of equal
    /// precedence nest to the right.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Coalesce => 1,
            BinaryOp::Or => 2,
            BinaryOp::And => 3,
            BinaryOp::Equal | BinaryOp::NotEqual => 4,
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => 5,
            BinaryOp::Add | BinaryOp::Subtract => 6,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 7,
        }
    }

    /// `<`, `<=`, `>`, `>=`
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Coalesce => "??",
        };
        write!(f, "{}", s)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Negate,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::Negate => write!(f, "-"),
        }
    }
}
