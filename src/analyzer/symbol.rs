//! シンボルテーブル
//!
//! 変数定義の可視性を管理する追記専用のテーブル。スコープ開始時に
//! 長さを保存し、終了時にその長さまで切り詰めることで復元します。
//! 検索は末尾から行うため、内側のスコープの定義が外側をシャドウします。

use super::nodes::{DefId, DefInfo};

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<DefId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 定義を可視にする
    pub fn push(&mut self, def: DefId) {
        self.entries.push(def);
    }

    /// 現在のスコープ境界を保存
    pub fn save(&self) -> usize {
        self.entries.len()
    }

    /// 保存した境界までスコープを巻き戻す
    pub fn restore(&mut self, mark: usize) {
        self.entries.truncate(mark);
    }

    /// 名前を解決する。最後に定義されたものが勝つ
    pub fn resolve(&self, defs: &[DefInfo], name: &str) -> Option<DefId> {
        self.entries
            .iter()
            .rev()
            .find(|id| defs[id.0 as usize].name == name)
            .copied()
    }
}
