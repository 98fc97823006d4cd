//! 意味解析器
//!
//! 構文木を走査して名前解決と型チェックを行い、型付きノード木を
//! 構築します。エラーは中断せずに蓄積され、エラー箇所のノードは
//! `Invalid`型でマークされます。
//!
//! ## 関数の2パス発見
//!
//! 各スコープは2パスで処理されます。第1パスは関数定義とインポートの
//! シグネチャだけを登録し、第2パスで文と関数本体を出現順に解析します。
//! これにより前方の関数も呼び出せますが、戻り値型が宣言されていない
//! 関数は本体解析前に型を決定できないため、再帰呼び出しと同じ
//! 診断（戻り値型を明示せよ）が報告されます。

use indexmap::IndexMap;
use log::debug;

use crate::ast::*;
use crate::error::CodeError;

use super::control_flow;
use super::nodes::*;
use super::operators;
use super::symbol::SymbolTable;
use super::type_checker::{closest_supertype, closest_supertype_all, is_assignable};
use super::types::{SimpleKind, TypeDescriptor};

/// Miraの意味解析器
pub struct SemanticAnalyzer {
    defs: Vec<DefInfo>,
    functions: Vec<FuncInfo>,
    /// パーサーが割り当てた宣言IDから関数ハンドルへの対応（宣言順）
    func_by_decl: IndexMap<u32, FuncId>,
    symbols: SymbolTable,
    errors: Vec<CodeError>,
    loop_depth: u32,
    func_stack: Vec<FuncId>,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            defs: Vec::new(),
            functions: Vec::new(),
            func_by_decl: IndexMap::new(),
            symbols: SymbolTable::new(),
            errors: Vec::new(),
            loop_depth: 0,
            func_stack: Vec::new(),
        }
    }

    /// プログラム全体を解析する
    pub fn analyze(mut self, program: &Program) -> Analysis {
        debug!("semantic analysis: {} statements", program.statements.len());
        let mut scope_vars = Vec::new();
        let nodes = self.analyze_scope(&program.statements, &mut scope_vars);
        debug!("semantic analysis finished: {} errors", self.errors.len());

        Analysis {
            nodes,
            defs: self.defs,
            functions: self.functions,
            errors: self.errors,
        }
    }

    // ==================== スコープ ====================

    fn analyze_scope(
        &mut self,
        statements: &[Expr],
        scope_vars: &mut Vec<String>,
    ) -> Vec<SemanticNode> {
        // 第1パス：シグネチャの登録
        self.register_functions(statements);

        // 第2パス：文の解析
        let mark = self.symbols.save();
        let mut nodes = Vec::with_capacity(statements.len());
        for stmt in statements {
            let node = self.analyze_statement(stmt);
            self.validate_definition(&node, stmt, scope_vars);
            self.validate_keyword(&node);
            nodes.push(node);
        }
        self.symbols.restore(mark);

        nodes
    }

    fn analyze_block(
        &mut self,
        block: &BlockExpr,
        scope_vars: Option<&mut Vec<String>>,
    ) -> BlockNode {
        let mut fresh = Vec::new();
        let vars = scope_vars.unwrap_or(&mut fresh);
        let nodes = self.analyze_scope(&block.statements, vars);

        let ty = match nodes.last() {
            Some(SemanticNode::Operand(op)) => op.ty.clone(),
            _ => TypeDescriptor::UNIT,
        };

        BlockNode {
            nodes,
            ty,
            span: block.span,
        }
    }

    /// 定義文の後処理：同一スコープ内の重複チェックと可視化
    fn validate_definition(&mut self, node: &SemanticNode, expr: &Expr, scope_vars: &mut Vec<String>) {
        if let SemanticNode::Definition(definition) = node {
            let name = self.defs[definition.def.0 as usize].name.clone();
            if scope_vars.iter().any(|v| v == &name) {
                self.add_error(
                    "Variable with the same name is already declared in this scope",
                    expr.span(),
                );
            }
            scope_vars.push(name);
            self.symbols.push(definition.def);
        }
    }

    /// ループ外の`break`/`skip`を検出する
    fn validate_keyword(&mut self, node: &SemanticNode) {
        if self.loop_depth > 0 {
            return;
        }
        if let SemanticNode::Keyword(keyword) = node {
            self.add_error(
                format!("'{}' keyword is only valid inside a loop", keyword.kind),
                keyword.span,
            );
        }
    }

    // ==================== 関数の登録（第1パス） ====================

    fn register_functions(&mut self, statements: &[Expr]) {
        for stmt in statements {
            match stmt {
                Expr::FuncDefinition(func) => {
                    let id = self.register_signature(&func.signature, None);
                    self.func_by_decl.insert(func.decl_id, id);
                }
                Expr::FuncImport(import) => {
                    let id =
                        self.register_signature(&import.signature, Some(import.external_name.clone()));
                    self.func_by_decl.insert(import.decl_id, id);
                }
                _ => {}
            }
        }
    }

    fn register_signature(
        &mut self,
        sig: &FuncSignature,
        external_name: Option<String>,
    ) -> FuncId {
        if self.functions.iter().any(|f| f.name == sig.name) {
            self.add_error(
                "Function with the same name is already defined",
                sig.name_span,
            );
        }

        let mut param_names: Vec<String> = Vec::with_capacity(sig.params.len());
        let mut params = Vec::with_capacity(sig.params.len());
        for param in &sig.params {
            if param.ty.is_none() {
                self.add_error("Parameter type required", param.span);
            }
            if param_names.iter().any(|n| n == &param.name) {
                self.add_error("Parameter with the same name is already declared", param.span);
            }

            let ty = param
                .ty
                .as_ref()
                .and_then(TypeDescriptor::from_type_expr)
                .unwrap_or(TypeDescriptor::Invalid);
            let def_id = self.new_def(DefInfo {
                name: param.name.clone(),
                ty,
                span: param.span,
            });

            param_names.push(param.name.clone());
            params.push(def_id);
        }

        let declared_return = sig
            .return_type
            .as_ref()
            .and_then(TypeDescriptor::from_type_expr);

        // インポートは宣言がすべて：戻り値型が無ければunit
        let return_type = if external_name.is_some() {
            Some(match &sig.return_type {
                Some(te) => TypeDescriptor::from_type_expr(te).unwrap_or(TypeDescriptor::Invalid),
                None => TypeDescriptor::UNIT,
            })
        } else {
            declared_return.clone()
        };

        let id = FuncId(self.functions.len() as u32);
        self.functions.push(FuncInfo {
            name: sig.name.clone(),
            params,
            declared_return,
            return_type,
            is_extension: sig.is_extension,
            body: None,
            external_name,
            span: sig.span,
        });
        id
    }

    // ==================== 文の解析（第2パス） ====================

    fn analyze_statement(&mut self, expr: &Expr) -> SemanticNode {
        match expr {
            Expr::Operand(operand) => {
                let node = self.analyze_operand(operand);
                if !matches!(node.kind, OperandKind::Invocation { .. }) {
                    self.add_error("Expressions can't be used as statements", node.span);
                }
                SemanticNode::Operand(node)
            }
            Expr::Definition(definition) => self.analyze_definition(definition),
            Expr::Assignment(assignment) => self.analyze_assignment(assignment),
            Expr::If(if_expr) => SemanticNode::If(self.analyze_if(if_expr)),
            Expr::While(while_expr) => SemanticNode::While(self.analyze_while(while_expr)),
            Expr::Keyword(keyword) => SemanticNode::Keyword(KeywordNode {
                kind: keyword.kind,
                span: keyword.span,
            }),
            Expr::Return(return_expr) => SemanticNode::Return(self.analyze_return(return_expr)),
            Expr::FuncDefinition(func) => match self.func_by_decl.get(&func.decl_id).copied() {
                Some(id) => {
                    self.analyze_function_body(id, func);
                    SemanticNode::Function(id)
                }
                None => {
                    self.add_error(
                        "Functions can only be defined in the outermost scope",
                        func.signature.name_span,
                    );
                    SemanticNode::Operand(OperandNode {
                        ty: TypeDescriptor::Invalid,
                        span: func.span,
                        kind: OperandKind::Invalid,
                    })
                }
            },
            Expr::FuncImport(import) => match self.func_by_decl.get(&import.decl_id).copied() {
                Some(id) => SemanticNode::Function(id),
                None => {
                    self.add_error(
                        "Functions can only be defined in the outermost scope",
                        import.signature.name_span,
                    );
                    SemanticNode::Operand(OperandNode {
                        ty: TypeDescriptor::Invalid,
                        span: import.span,
                        kind: OperandKind::Invalid,
                    })
                }
            },
        }
    }

    fn analyze_function_body(&mut self, id: FuncId, expr: &FuncDefinitionExpr) {
        debug!("analyzing function body: {}", expr.signature.name);

        let param_ids = self.functions[id.0 as usize].params.clone();
        let mark = self.symbols.save();
        let mut scope_vars: Vec<String> = Vec::with_capacity(param_ids.len());
        for pid in &param_ids {
            self.symbols.push(*pid);
            scope_vars.push(self.defs[pid.0 as usize].name.clone());
        }

        self.func_stack.push(id);
        let body = self.analyze_block(&expr.body, Some(&mut scope_vars));
        self.func_stack.pop();
        self.symbols.restore(mark);

        let name_span = expr.signature.name_span;
        let declared = self.functions[id.0 as usize].declared_return.clone();

        let (detected, always_returns, has_return) = {
            let flow = control_flow::run(&body);
            let detected = if flow.has_return {
                closest_supertype_all(flow.return_nodes.iter().map(|n| n.ty.clone()))
            } else {
                Some(body.ty.clone())
            };
            (detected, flow.always_returns, flow.has_return)
        };

        if has_return {
            if detected.is_none() {
                self.add_error("Type mismatch between return statements", name_span);
            }

            let returns_unit = detected.as_ref().map(|t| t.is_unit()).unwrap_or(false);
            if !returns_unit && !always_returns {
                self.add_error("Not all code paths return a value", name_span);
            }
        }

        if declared.is_none() && detected.as_ref().map(|t| t.not_identified()).unwrap_or(false) {
            self.add_error(
                "Return type couldn't be inferred. Please, provide it explicitly",
                name_span,
            );
        }

        let types_match = match (&declared, &detected) {
            (Some(declared), Some(detected)) => is_assignable(declared, detected),
            _ => true,
        };
        if !types_match {
            self.add_error(
                "Type mismatch between declared and detected return types",
                name_span,
            );
        }

        let return_type = declared.or(detected).unwrap_or(TypeDescriptor::Invalid);
        let func = &mut self.functions[id.0 as usize];
        func.return_type = Some(return_type);
        func.body = Some(body);
    }

    fn analyze_definition(&mut self, expr: &DefinitionExpr) -> SemanticNode {
        let source = self.analyze_operand(&expr.value);

        let ty = if let Some(type_expr) = &expr.declared_type {
            let declared = TypeDescriptor::from_type_expr(type_expr)
                .unwrap_or(TypeDescriptor::Invalid);
            if !is_assignable(&declared, &source.ty) {
                self.add_error(
                    "Type mismatch between the expression and the variable",
                    expr.span,
                );
            }
            declared
        } else if source.ty.not_identified() {
            self.errors.push(CodeError::new(
                "Expression type couldn't be inferred. Please, provide the type explicitly",
                expr.span.start,
                expr.span.start,
            ));
            TypeDescriptor::Invalid
        } else if matches!(source.ty, TypeDescriptor::Composite) {
            // 比較連鎖を変数に入れると普通のboolになる
            TypeDescriptor::BOOL
        } else {
            source.ty.clone()
        };

        let def_id = self.new_def(DefInfo {
            name: expr.name.clone(),
            ty,
            span: expr.name_span,
        });

        SemanticNode::Definition(DefinitionNode {
            def: def_id,
            value: source,
            span: expr.span,
        })
    }

    fn analyze_assignment(&mut self, expr: &AssignmentExpr) -> SemanticNode {
        let target = self.symbols.resolve(&self.defs, &expr.name);
        if target.is_none() {
            self.add_error(
                "The variable has not been defined at this point in code",
                expr.name_span,
            );
        }

        let source = self.analyze_operand(&expr.value);

        if let Some(def_id) = target {
            let target_ty = self.defs[def_id.0 as usize].ty.clone();
            if !is_assignable(&target_ty, &source.ty) {
                self.add_error(
                    "Type mismatch between the expression and the variable",
                    expr.span,
                );
            }
        }

        SemanticNode::Assignment(AssignmentNode {
            name: expr.name.clone(),
            target,
            value: source,
            span: expr.span,
        })
    }

    fn analyze_if(&mut self, expr: &IfExpr) -> IfNode {
        let condition = self.analyze_operand(&expr.condition);
        self.check_condition_type(&condition, expr.condition.span());

        let block = self.analyze_block(&expr.block, None);
        let elif = expr
            .elif
            .as_ref()
            .map(|elif| Box::new(self.analyze_if(elif)));
        let else_block = expr
            .else_block
            .as_ref()
            .map(|block| self.analyze_block(block, None));

        let ty = if let Some(else_node) = &else_block {
            closest_supertype(&block.ty, &else_node.ty)
        } else if let Some(elif_node) = &elif {
            closest_supertype(&block.ty, &elif_node.ty)
        } else {
            Some(block.ty.clone())
        }
        .unwrap_or(TypeDescriptor::Invalid);

        IfNode {
            condition,
            block,
            elif,
            else_block,
            ty,
            span: expr.span,
        }
    }

    fn analyze_while(&mut self, expr: &WhileExpr) -> WhileNode {
        let condition = self.analyze_operand(&expr.condition);
        self.check_condition_type(&condition, expr.condition.span());

        self.loop_depth += 1;
        let block = self.analyze_block(&expr.block, None);
        self.loop_depth -= 1;

        WhileNode {
            condition,
            block,
            span: expr.span,
        }
    }

    /// 条件式は非nullableのboolでなければならない（比較連鎖は可）
    fn check_condition_type(&mut self, condition: &OperandNode, span: Span) {
        match condition.ty.as_simple() {
            Some((SimpleKind::Bool, false)) => {}
            _ => self.add_error("The type of a condition must be bool", span),
        }
    }

    fn analyze_return(&mut self, expr: &ReturnExpr) -> ReturnNode {
        if self.func_stack.is_empty() {
            self.add_error(
                "'return' keyword can only be used inside a function",
                expr.span,
            );
        }

        let value = expr.value.as_ref().map(|v| self.analyze_operand(v));
        let ty = value
            .as_ref()
            .map(|v| v.ty.clone())
            .unwrap_or(TypeDescriptor::UNIT);

        ReturnNode {
            ty,
            value,
            span: expr.span,
        }
    }

    // ==================== オペランドの解析 ====================

    fn analyze_operand(&mut self, expr: &OperandExpr) -> OperandNode {
        match expr {
            OperandExpr::Number(n) => OperandNode {
                ty: TypeDescriptor::NUMBER,
                span: n.span,
                kind: OperandKind::Number(n.value),
            },
            OperandExpr::Str(s) => OperandNode {
                ty: TypeDescriptor::STRING,
                span: s.span,
                kind: OperandKind::Str(s.value.clone()),
            },
            OperandExpr::Bool(b) => OperandNode {
                ty: TypeDescriptor::BOOL,
                span: b.span,
                kind: OperandKind::Bool(b.value),
            },
            OperandExpr::Null(n) => OperandNode {
                ty: TypeDescriptor::Null,
                span: n.span,
                kind: OperandKind::Null,
            },
            OperandExpr::Identifier(identifier) => self.analyze_identifier(identifier),
            OperandExpr::Unary(unary) => self.analyze_unary(unary),
            OperandExpr::Binary(binary) => self.analyze_binary(binary),
            OperandExpr::Parenthesized(paren) => {
                let inner = self.analyze_operand(&paren.inner);
                OperandNode {
                    ty: inner.ty.clone(),
                    span: paren.span,
                    kind: OperandKind::Parenthesized(Box::new(inner)),
                }
            }
            OperandExpr::List(list) => self.analyze_list(list),
            OperandExpr::Range(range) => self.analyze_range(range),
            OperandExpr::Invocation(invocation) => {
                let node = self.analyze_invocation(invocation);
                // 連鎖のどこかで`?.`が使われていれば結果はnullableになる
                let has_conditional = matches!(
                    node.kind,
                    OperandKind::Invocation {
                        has_conditional: true,
                        ..
                    }
                );
                let ty = node.ty.with_nullable(node.ty.is_nullable() || has_conditional);
                OperandNode {
                    ty,
                    span: node.span,
                    kind: node.kind,
                }
            }
        }
    }

    fn analyze_identifier(&mut self, expr: &IdentifierExpr) -> OperandNode {
        let def = self.symbols.resolve(&self.defs, &expr.name);
        if def.is_none() {
            self.add_error(
                "The variable has not been defined at this point in code",
                expr.span,
            );
        }

        let ty = def
            .map(|d| self.defs[d.0 as usize].ty.clone())
            .unwrap_or(TypeDescriptor::Invalid);

        OperandNode {
            ty,
            span: expr.span,
            kind: OperandKind::Identifier {
                name: expr.name.clone(),
                def,
            },
        }
    }

    fn analyze_unary(&mut self, expr: &UnaryExpr) -> OperandNode {
        let operand = self.analyze_operand(&expr.operand);

        let ty = match (expr.operator, operand.ty.as_simple()) {
            (UnaryOp::Not, Some((SimpleKind::Bool, nullable))) => {
                Some(TypeDescriptor::simple(SimpleKind::Bool, nullable))
            }
            (UnaryOp::Negate, Some((SimpleKind::Number, nullable))) => {
                Some(TypeDescriptor::simple(SimpleKind::Number, nullable))
            }
            _ => None,
        };

        match ty {
            Some(ty) => OperandNode {
                ty,
                span: expr.span,
                kind: OperandKind::Unary {
                    operator: expr.operator,
                    operand: Box::new(operand),
                },
            },
            None => {
                self.add_error("Invalid operation", expr.span);
                OperandNode {
                    ty: TypeDescriptor::Invalid,
                    span: expr.span,
                    kind: OperandKind::Invalid,
                }
            }
        }
    }

    fn analyze_binary(&mut self, expr: &BinaryExpr) -> OperandNode {
        let left = self.analyze_operand(&expr.left);
        let right = self.analyze_operand(&expr.right);

        if expr.operator == BinaryOp::Coalesce {
            if operators::coalesce_applicable(&left.ty, &right.ty) {
                let ty = right.ty.clone();
                return OperandNode {
                    ty,
                    span: expr.span,
                    kind: OperandKind::Binary {
                        operator: expr.operator,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                };
            }
        } else if let Some(ty) = operators::binary_result(expr.operator, &left.ty, &right.ty) {
            if matches!(ty, TypeDescriptor::Composite) {
                return fold_chain(expr.operator, left, right, expr.span);
            }
            return OperandNode {
                ty,
                span: expr.span,
                kind: OperandKind::Binary {
                    operator: expr.operator,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            };
        }

        self.add_error("Invalid operation", left.span);
        OperandNode {
            ty: TypeDescriptor::Invalid,
            span: expr.span,
            kind: OperandKind::Invalid,
        }
    }

    fn analyze_list(&mut self, expr: &ListExpr) -> OperandNode {
        let items: Vec<OperandNode> = expr
            .elements
            .iter()
            .map(|e| self.analyze_operand(e))
            .collect();

        let ty = if items.is_empty() {
            TypeDescriptor::EMPTY_LIST
        } else {
            match closest_supertype_all(items.iter().map(|i| i.ty.clone())) {
                Some(element) => TypeDescriptor::list(element, false),
                None => {
                    self.add_error("Type mismatch between list elements", expr.span);
                    TypeDescriptor::Invalid
                }
            }
        };

        OperandNode {
            ty,
            span: expr.span,
            kind: OperandKind::List(items),
        }
    }

    fn analyze_range(&mut self, expr: &RangeExpr) -> OperandNode {
        let from = self.analyze_operand(&expr.from);
        let to = self.analyze_operand(&expr.to);

        let valid = matches!(from.ty.as_simple(), Some((SimpleKind::Number, false)))
            && matches!(to.ty.as_simple(), Some((SimpleKind::Number, false)));

        let ty = if valid {
            TypeDescriptor::list(TypeDescriptor::NUMBER, false)
        } else {
            self.add_error("Invalid operation", expr.span);
            TypeDescriptor::Invalid
        };

        OperandNode {
            ty,
            span: expr.span,
            kind: OperandKind::Range {
                from: Box::new(from),
                to: Box::new(to),
            },
        }
    }

    fn analyze_invocation(&mut self, expr: &InvocationExpr) -> OperandNode {
        // レシーバの呼び出しはラップ前の素の型で解析する。
        // `?.`由来のnullabilityは連鎖全体の最後で一度だけ付与される
        let receiver = expr.receiver.as_ref().map(|r| match r.as_ref() {
            OperandExpr::Invocation(inner) => self.analyze_invocation(inner),
            other => self.analyze_operand(other),
        });
        let args: Vec<OperandNode> = expr.args.iter().map(|a| self.analyze_operand(a)).collect();

        let receiver_conditional = receiver
            .as_ref()
            .map(|r| {
                matches!(
                    r.kind,
                    OperandKind::Invocation {
                        has_conditional: true,
                        ..
                    }
                )
            })
            .unwrap_or(false);
        let has_conditional = expr.conditional || receiver_conditional;

        let resolved = self
            .functions
            .iter()
            .enumerate()
            .rev()
            .find(|(_, f)| f.name == expr.name)
            .map(|(i, f)| {
                (
                    FuncId(i as u32),
                    f.return_type.clone(),
                    f.is_extension,
                    f.params.clone(),
                    f.span,
                )
            });

        let invalid_invocation = |receiver: Option<OperandNode>, args: Vec<OperandNode>| OperandNode {
            ty: TypeDescriptor::Invalid,
            span: expr.span,
            kind: OperandKind::Invocation {
                name: expr.name.clone(),
                func: None,
                args,
                receiver: receiver.map(Box::new),
                conditional: expr.conditional,
                has_conditional,
            },
        };

        let Some((func_id, return_type, is_extension, param_ids, func_span)) = resolved else {
            self.add_error("Function with this name hasn't been defined", expr.name_span);
            return invalid_invocation(receiver, args);
        };

        // 戻り値型が未確定＝本体が未解析（再帰または前方呼び出し）
        let Some(return_type) = return_type else {
            self.add_error(
                format!(
                    "For recursive calls please provide the return type for function: '{}' explicitly",
                    expr.name
                ),
                func_span,
            );
            return invalid_invocation(receiver, args);
        };

        if !is_extension && receiver.is_some() {
            self.add_error(
                format!("The function: '{}' can't be used as an extension", expr.name),
                expr.name_span,
            );
        }

        let supplied: Vec<&OperandNode> = receiver.iter().chain(args.iter()).collect();

        if param_ids.len() != supplied.len() {
            self.add_error(
                "The number of required parameters is different from the number of supplied parameters",
                expr.name_span,
            );
        } else {
            let mut param_errors = Vec::new();
            for (i, (param_id, node)) in param_ids.iter().zip(&supplied).enumerate() {
                let declared = &self.defs[param_id.0 as usize].ty;
                // 型の無いパラメータはエラー報告済み。連鎖的な診断を抑制する
                if declared.is_invalid() {
                    continue;
                }

                let mut supplied_ty = node.ty.clone();
                if i == 0 && expr.conditional {
                    if supplied_ty.is_nullable() {
                        // レシーバは呼び出し地点で非nullであることが保証される
                        supplied_ty = supplied_ty.with_nullable(false);
                    } else {
                        param_errors.push((
                            "Conditional invocation is not allowed on a non-nullable variable",
                            node.span,
                        ));
                    }
                }

                if !is_assignable(declared, &supplied_ty) {
                    param_errors.push((
                        "Type mismatch between the declared parameter and the supplied one",
                        node.span,
                    ));
                }
            }
            for (message, span) in param_errors {
                self.add_error(message, span);
            }
        }

        OperandNode {
            ty: return_type,
            span: expr.span,
            kind: OperandKind::Invocation {
                name: expr.name.clone(),
                func: Some(func_id),
                args,
                receiver: receiver.map(Box::new),
                conditional: expr.conditional,
                has_conditional,
            },
        }
    }

    // ==================== ユーティリティ ====================

    fn new_def(&mut self, info: DefInfo) -> DefId {
        let id = DefId(self.defs.len() as u32);
        self.defs.push(info);
        id
    }

    fn add_error(&mut self, message: impl Into<String>, span: Span) {
        self.errors.push(CodeError::at_span(message, span));
    }
}

/// 比較連鎖の畳み込み
///
/// 右オペランドが既に畳み込まれた連鎖なら吸収し、そうでなければ
/// 2オペランドの連鎖を新しく作ります。オペランドはソース順に並びます。
fn fold_chain(
    operator: BinaryOp,
    left: OperandNode,
    right: OperandNode,
    span: Span,
) -> OperandNode {
    let (tail_operands, tail_operators) = match right.kind {
        OperandKind::NumericChain {
            operands,
            operators,
        } => (operands, operators),
        kind => (
            vec![OperandNode {
                ty: right.ty,
                span: right.span,
                kind,
            }],
            Vec::new(),
        ),
    };

    let mut operands = Vec::with_capacity(tail_operands.len() + 1);
    operands.push(left);
    operands.extend(tail_operands);

    let mut operators = Vec::with_capacity(tail_operators.len() + 1);
    operators.push(operator);
    operators.extend(tail_operators);

    OperandNode {
        ty: TypeDescriptor::Composite,
        span,
        kind: OperandKind::NumericChain {
            operands,
            operators,
        },
    }
}
