//! リターンパス解析
//!
//! 関数本体のブロックを走査し、すべての実行パスが値を返すか、`return`や
//! `break`が存在するかを判定する純粋な解析です。収集した`return`ノードは
//! 戻り値型の推論に使われます。

use crate::ast::KeywordKind;

use super::nodes::{BlockNode, IfNode, ReturnNode, SemanticNode, WhileNode};

/// ブロックの制御フロー特性
#[derive(Debug)]
pub struct FlowResult<'a> {
    /// すべての実行パスが`return`で終わるか
    pub always_returns: bool,
    /// どこかに`return`があるか
    pub has_return: bool,
    /// どこかに`break`があるか
    pub has_break: bool,
    /// 出現順に収集した`return`ノード
    pub return_nodes: Vec<&'a ReturnNode>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Flags {
    always_returns: bool,
    has_return: bool,
    has_break: bool,
}

/// ブロックのリターンパスを解析する
pub fn run(block: &BlockNode) -> FlowResult<'_> {
    let mut return_nodes = Vec::new();
    let flags = run_block(block, &mut return_nodes);
    FlowResult {
        always_returns: flags.always_returns,
        has_return: flags.has_return,
        has_break: flags.has_break,
        return_nodes,
    }
}

fn run_block<'a>(block: &'a BlockNode, return_nodes: &mut Vec<&'a ReturnNode>) -> Flags {
    let mut flags = Flags::default();

    for node in &block.nodes {
        match node {
            SemanticNode::If(if_node) => {
                let result = run_if(if_node, return_nodes);
                flags.always_returns = flags.always_returns || result.always_returns;
                flags.has_return = flags.has_return || result.has_return;
                flags.has_break = flags.has_break || result.has_break;
            }
            SemanticNode::While(while_node) => {
                let result = run_while(while_node, return_nodes);
                flags.always_returns = flags.always_returns || result.always_returns;
                flags.has_return = flags.has_return || result.has_return;
                flags.has_break = flags.has_break || result.has_break;
            }
            SemanticNode::Return(return_node) => {
                flags.always_returns = true;
                flags.has_return = true;
                return_nodes.push(return_node);
            }
            SemanticNode::Keyword(keyword) if keyword.kind == KeywordKind::Break => {
                flags.has_break = true;
            }
            _ => {}
        }
    }

    flags
}

/// if連鎖の合成
///
/// `always_returns`は全分岐のANDで、`else`が無ければ偽。
/// `has_return`と`has_break`は各分岐のOR。
fn run_if<'a>(node: &'a IfNode, return_nodes: &mut Vec<&'a ReturnNode>) -> Flags {
    let mut always_returns = true;
    let mut has_return = false;
    let mut has_break = false;

    let mut current = node;
    loop {
        let result = run_block(&current.block, return_nodes);
        always_returns = always_returns && result.always_returns;
        has_return = has_return || result.has_return;
        has_break = has_break || result.has_break;

        match &current.elif {
            Some(elif) => current = elif,
            None => break,
        }
    }

    match &current.else_block {
        Some(else_block) => {
            let result = run_block(else_block, return_nodes);
            always_returns = always_returns && result.always_returns;
            has_return = has_return || result.has_return;
            has_break = has_break || result.has_break;
        }
        None => {
            // elseが無い連鎖はどのパスも保証できない
            always_returns = false;
        }
    }

    Flags {
        always_returns,
        has_return,
        has_break,
    }
}

/// whileの本体が必ず`return`し、かつ`break`が無ければループ全体も必ず返す
fn run_while<'a>(node: &'a WhileNode, return_nodes: &mut Vec<&'a ReturnNode>) -> Flags {
    let result = run_block(&node.block, return_nodes);
    Flags {
        always_returns: result.has_return && !result.has_break,
        has_return: result.has_return,
        has_break: result.has_break,
    }
}
