//! 型付きセマンティックノード
//!
//! パーサーの構文木と並行する、型情報付きのノード群。識別子は定義への
//! ハンドル（`DefId`）を、関数呼び出しは関数テーブルへのハンドル
//! （`FuncId`）を持ちます。ハンドルは`Analysis`内のアリーナへの
//! 安定したインデックスです。

use crate::ast::{BinaryOp, KeywordKind, Span, UnaryOp};
use crate::error::CodeError;
use serde::Serialize;

use super::types::TypeDescriptor;

/// 変数定義アリーナへのハンドル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefId(pub u32);

/// 関数アリーナへのハンドル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FuncId(pub u32);

/// 変数（またはパラメータ）定義の情報
#[derive(Debug, Clone, Serialize)]
pub struct DefInfo {
    pub name: String,
    pub ty: TypeDescriptor,
    pub span: Span,
}

/// 関数定義またはインポートの情報
#[derive(Debug, Clone, Serialize)]
pub struct FuncInfo {
    pub name: String,
    pub params: Vec<DefId>,
    /// シグネチャに書かれた戻り値型
    pub declared_return: Option<TypeDescriptor>,
    /// 確定した戻り値型。宣言があれば登録時に、なければ本体解析後に
    /// 設定される。`None`のうちは呼び出し側から型を決定できない
    pub return_type: Option<TypeDescriptor>,
    pub is_extension: bool,
    /// 定義の本体（インポートには無い）。本体解析後に設定される
    pub body: Option<BlockNode>,
    /// インポートの外部シンボル名
    pub external_name: Option<String>,
    pub span: Span,
}

/// 文レベルの型付きノード
#[derive(Debug, Clone, Serialize)]
pub enum SemanticNode {
    Operand(OperandNode),
    Definition(DefinitionNode),
    Assignment(AssignmentNode),
    If(IfNode),
    While(WhileNode),
    Keyword(KeywordNode),
    Return(ReturnNode),
    /// 関数定義・インポート文。実体は関数アリーナにある
    Function(FuncId),
}

/// 値を生むノード。解決済みの型記述子を必ず持つ
#[derive(Debug, Clone, Serialize)]
pub struct OperandNode {
    pub ty: TypeDescriptor,
    pub span: Span,
    pub kind: OperandKind,
}

#[derive(Debug, Clone, Serialize)]
pub enum OperandKind {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    Identifier {
        name: String,
        def: Option<DefId>,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<OperandNode>,
    },
    Binary {
        operator: BinaryOp,
        left: Box<OperandNode>,
        right: Box<OperandNode>,
    },
    /// 畳み込まれた数値比較連鎖。`operands`はソース順で、各隣接対の間に
    /// `operators`の演算子が入る。バックエンドは内側のオペランドを
    /// ちょうど1回だけ評価する`a && b && ...`として実現しなければならない
    NumericChain {
        operands: Vec<OperandNode>,
        operators: Vec<BinaryOp>,
    },
    Parenthesized(Box<OperandNode>),
    List(Vec<OperandNode>),
    Range {
        from: Box<OperandNode>,
        to: Box<OperandNode>,
    },
    Invocation {
        name: String,
        /// 解決された呼び出し先。未解決ならエラー済みで`None`
        func: Option<FuncId>,
        args: Vec<OperandNode>,
        receiver: Option<Box<OperandNode>>,
        /// このホップが`?.`で呼ばれたか
        conditional: bool,
        /// レシーバ連鎖のどこかに`?.`があるか（推移的）
        has_conditional: bool,
    },
    /// 型付けに失敗したオペランド
    Invalid,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefinitionNode {
    pub def: DefId,
    pub value: OperandNode,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentNode {
    pub name: String,
    /// 代入先の定義。未定義ならエラー済みで`None`
    pub target: Option<DefId>,
    pub value: OperandNode,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockNode {
    pub nodes: Vec<SemanticNode>,
    /// ブロックの型：最後のノードがオペランドならその型、そうでなければ`unit`
    pub ty: TypeDescriptor,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct IfNode {
    pub condition: OperandNode,
    pub block: BlockNode,
    pub elif: Option<Box<IfNode>>,
    pub else_block: Option<BlockNode>,
    /// 分岐の型の最近接スーパータイプ
    pub ty: TypeDescriptor,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhileNode {
    pub condition: OperandNode,
    pub block: BlockNode,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordNode {
    pub kind: KeywordKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReturnNode {
    /// 返される値の型（値が無ければ`unit`）
    pub ty: TypeDescriptor,
    pub value: Option<OperandNode>,
    pub span: Span,
}

/// 意味解析の出力
///
/// エラーがあってもノード列は構造的に完全で、エラー箇所は`Invalid`型で
/// マークされます。`errors`が空でない場合、結果を実行可能として
/// 扱ってはいけません。
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// トップレベル文の型付きノード（ソース順）
    pub nodes: Vec<SemanticNode>,
    /// 変数定義アリーナ（`DefId`で参照）
    pub defs: Vec<DefInfo>,
    /// 関数アリーナ（`FuncId`で参照、宣言順）
    pub functions: Vec<FuncInfo>,
    /// 蓄積されたエラー（発生順）
    pub errors: Vec<CodeError>,
}

impl Analysis {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn def(&self, id: DefId) -> &DefInfo {
        &self.defs[id.0 as usize]
    }

    pub fn function(&self, id: FuncId) -> &FuncInfo {
        &self.functions[id.0 as usize]
    }
}
